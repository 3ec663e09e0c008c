//! Shared styles for the gallery.

use ratatui::style::{Color, Modifier, Style};

/// Card title.
pub const TITLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// `#tag` row.
pub const TAG: Style = Style::new().fg(Color::Cyan);

/// Byline and read time.
pub const META: Style = Style::new().fg(Color::DarkGray);

/// Category badge in the card border.
pub const BADGE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);

/// Secondary text: hints, counters.
pub const MUTED_TEXT: Style = Style::new().fg(Color::Gray);

/// Error messages.
pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// In-progress messages.
pub const LOADING: Style = Style::new().fg(Color::Yellow);

/// End-of-feed message.
pub const DONE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Header bar.
pub const HEADER: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Key names in the hint bar.
pub const KEY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
