//! Feed status: full-page states, the footer under the grid, and the
//! header and hint bars.

use crate::layout::LayoutStrategy;
use crate::loader::LoadState;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use super::styles;

/// What the body area shows for a given loader state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScreen {
    /// Nothing loaded yet, first page pending.
    Loading,
    /// The first page failed; nothing to show.
    InitialError(String),
    /// The source is exhausted and returned nothing.
    Empty,
    /// At least one item is loaded.
    Grid,
}

impl FeedScreen {
    /// Pick the screen for `state`.
    pub fn for_state<T>(state: &LoadState<T>) -> Self {
        if !state.is_initial() {
            return FeedScreen::Grid;
        }
        if let Some(error) = state.error() {
            FeedScreen::InitialError(error.to_string())
        } else if state.is_exhausted() && !state.is_busy() {
            FeedScreen::Empty
        } else {
            FeedScreen::Loading
        }
    }

    /// Lines shown centered in the body for non-grid screens.
    pub fn lines(&self) -> Vec<Line<'static>> {
        match self {
            FeedScreen::Loading => vec![Line::styled("Loading articles...", styles::LOADING)],
            FeedScreen::InitialError(error) => vec![
                Line::styled("Could not load articles", styles::ERROR),
                Line::raw(error.clone()),
                Line::default(),
                Line::styled("Press r to retry", styles::MUTED_TEXT),
            ],
            FeedScreen::Empty => vec![
                Line::raw("No articles found"),
                Line::styled("Press R to reload", styles::MUTED_TEXT),
            ],
            FeedScreen::Grid => Vec::new(),
        }
    }
}

/// Rows drawn under the grid.
///
/// While more pages may exist the first row doubles as the load sentinel,
/// so the footer is never empty until the feed is exhausted.
pub fn footer_lines<T>(state: &LoadState<T>) -> Vec<Line<'static>> {
    if state.is_loading_more() {
        return vec![Line::styled("Loading more articles...", styles::LOADING)];
    }
    if let Some(error) = state.error() {
        return vec![
            Line::styled(error.to_string(), styles::ERROR),
            Line::styled("Press r to retry", styles::MUTED_TEXT),
        ];
    }
    if state.has_more() {
        return vec![Line::default()];
    }
    let count = state.items().len();
    vec![
        Line::styled("You've reached the end!", styles::DONE),
        Line::styled(
            format!(
                "{count} article{} loaded",
                if count == 1 { "" } else { "s" }
            ),
            styles::MUTED_TEXT,
        ),
    ]
}

/// Draw `lines` centered horizontally and vertically in `area`.
pub fn render_centered(lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = area.height.saturating_sub(rows) / 2;
    let inner = Rect::new(
        area.x,
        area.y + top,
        area.width,
        rows.min(area.height.saturating_sub(top)),
    );
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

/// Title bar content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderInfo {
    /// Items loaded so far.
    pub loaded: usize,
    /// Active layout strategy.
    pub strategy: LayoutStrategy,
    /// Column count, once the width is known.
    pub columns: Option<usize>,
    /// Whether the published layout is current.
    pub ready: bool,
}

impl HeaderInfo {
    /// The header line.
    pub fn line(&self) -> Line<'static> {
        let mut text = format!(" Masonry Feed │ {} loaded │ {}", self.loaded, self.strategy);
        if let Some(columns) = self.columns {
            text.push_str(&format!(" │ {columns} col"));
        }
        if !self.ready {
            text.push_str(" │ arranging…");
        }
        Line::from(Span::styled(text, styles::HEADER))
    }
}

/// Key hints shown on the bottom row.
pub fn hint_line() -> Line<'static> {
    const HINTS: [(&str, &str); 6] = [
        ("j/k", "scroll"),
        ("g/G", "top/bottom"),
        ("r", "retry"),
        ("R", "reset"),
        ("s", "strategy"),
        ("q", "quit"),
    ];
    let mut spans = vec![Span::raw(" ")];
    for (index, (key, label)) in HINTS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, styles::KEY));
        spans.push(Span::styled(format!(" {label}"), styles::MUTED_TEXT));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageNumber;

    fn state(items: Vec<u8>) -> LoadState<u8> {
        LoadState {
            items,
            ..LoadState::new(PageNumber::FIRST)
        }
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    // ===== FeedScreen =====

    #[test]
    fn fresh_state_shows_loading() {
        assert_eq!(FeedScreen::for_state(&state(vec![])), FeedScreen::Loading);
    }

    #[test]
    fn initial_error_carries_message() {
        let mut failed = state(vec![]);
        failed.error = Some("Timed out loading page 1".to_string());

        let screen = FeedScreen::for_state(&failed);

        assert_eq!(
            screen,
            FeedScreen::InitialError("Timed out loading page 1".to_string())
        );
        assert!(text(&screen.lines()).contains(&"Press r to retry".to_string()));
    }

    #[test]
    fn exhausted_without_items_is_empty() {
        let mut empty = state(vec![]);
        empty.has_more = false;
        assert_eq!(FeedScreen::for_state(&empty), FeedScreen::Empty);
    }

    #[test]
    fn items_show_grid_even_with_error() {
        let mut partial = state(vec![1, 2]);
        partial.error = Some("boom".to_string());
        assert_eq!(FeedScreen::for_state(&partial), FeedScreen::Grid);
    }

    // ===== footer =====

    #[test]
    fn footer_reserves_sentinel_row_while_more_pages_exist() {
        assert_eq!(text(&footer_lines(&state(vec![1]))), vec![""]);
    }

    #[test]
    fn footer_shows_loading_more() {
        let mut busy = state(vec![1]);
        busy.loading_more = true;
        assert_eq!(
            text(&footer_lines(&busy)),
            vec!["Loading more articles..."]
        );
    }

    #[test]
    fn footer_shows_inline_error_with_retry_hint() {
        let mut failed = state(vec![1]);
        failed.error = Some("Failed to load page 2: down".to_string());
        assert_eq!(
            text(&footer_lines(&failed)),
            vec!["Failed to load page 2: down", "Press r to retry"]
        );
    }

    #[test]
    fn footer_shows_end_message_with_count() {
        let mut done = state(vec![0; 50]);
        done.has_more = false;
        assert_eq!(
            text(&footer_lines(&done)),
            vec!["You've reached the end!", "50 articles loaded"]
        );
    }

    // ===== bars =====

    #[test]
    fn header_mentions_strategy_and_columns() {
        let header = HeaderInfo {
            loaded: 24,
            strategy: LayoutStrategy::Breakpoints,
            columns: Some(3),
            ready: true,
        };
        assert_eq!(
            header.line().to_string(),
            " Masonry Feed │ 24 loaded │ breakpoints │ 3 col"
        );
    }

    #[test]
    fn header_flags_pending_layout() {
        let header = HeaderInfo {
            loaded: 0,
            strategy: LayoutStrategy::ShortestColumn,
            columns: None,
            ready: false,
        };
        assert!(header.line().to_string().ends_with("arranging…"));
    }

    #[test]
    fn centered_lines_land_in_middle_row() {
        let area = Rect::new(0, 0, 21, 5);
        let mut buf = Buffer::empty(area);

        render_centered(vec![Line::raw("hello")], area, &mut buf);

        let row: String = (0..21u16).map(|x| buf[(x, 2u16)].symbol().to_string()).collect();
        assert_eq!(row, "        hello        ");
    }
}
