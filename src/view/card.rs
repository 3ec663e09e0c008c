//! Article cards: text wrapping, measurement and rendering.
//!
//! A card is pre-wrapped to its inner width before it is either measured or
//! drawn, so the row count the layout engine sees is exactly the row count
//! that ends up on screen.

use crate::layout::Measure;
use crate::model::Article;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles;

/// Columns taken by the border and padding on both sides.
const HORIZONTAL_CHROME: u16 = 4;

/// Rows taken by the top and bottom border.
const VERTICAL_CHROME: u16 = 2;

/// Tags shown per card.
const MAX_TAGS: usize = 3;

/// Greedy word wrap by display width.
///
/// Words wider than `width` are broken at character boundaries. Whitespace
/// runs collapse to single spaces. Empty input yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Text width available inside a card `card_width` cells wide.
pub fn inner_width(card_width: u16) -> usize {
    usize::from(card_width.saturating_sub(HORIZONTAL_CHROME).max(1))
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    lines.extend(
        wrap_text(text, width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, style))),
    );
}

/// Body lines of a card, already wrapped to `width`.
pub fn card_lines(article: &Article, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    push_wrapped(&mut lines, &article.title, width, styles::TITLE);
    lines.push(Line::default());
    push_wrapped(&mut lines, &article.excerpt, width, Style::default());

    let tags = article
        .tags
        .iter()
        .take(MAX_TAGS)
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ");
    if !tags.is_empty() {
        lines.push(Line::default());
        push_wrapped(&mut lines, &tags, width, styles::TAG);
    }

    push_wrapped(
        &mut lines,
        &format!("{} · {}", article.author, article.display_date()),
        width,
        styles::META,
    );
    push_wrapped(
        &mut lines,
        &format!("{} min read", article.read_time_minutes),
        width,
        styles::META,
    );

    lines
}

/// Total rows a card occupies at `card_width`, borders included.
pub fn card_height(article: &Article, card_width: u16) -> u16 {
    let body = card_lines(article, inner_width(card_width)).len();
    u16::try_from(body)
        .unwrap_or(u16::MAX)
        .saturating_add(VERTICAL_CHROME)
}

/// The card widget for `article` at `card_width`.
pub fn card_widget(article: &Article, card_width: u16) -> Paragraph<'static> {
    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", article.category), styles::BADGE))
        .padding(Padding::horizontal(1));
    Paragraph::new(card_lines(article, inner_width(card_width))).block(block)
}

/// Render a card whose top edge is `top` rows below the top of `viewport`.
///
/// `top` may be negative or past the bottom; only the rows that fall inside
/// `viewport` are drawn.
pub fn render_card_clipped(
    buf: &mut Buffer,
    viewport: Rect,
    article: &Article,
    x: u16,
    top: i32,
    width: u16,
) {
    let height = card_height(article, width);
    let bottom = top + i32::from(height);
    if width == 0 || bottom <= 0 || top >= i32::from(viewport.height) {
        return;
    }

    let card_area = Rect::new(0, 0, width, height);
    let mut scratch = Buffer::empty(card_area);
    card_widget(article, width).render(card_area, &mut scratch);

    for row in 0..height {
        let screen_row = top + i32::from(row);
        if screen_row < 0 || screen_row >= i32::from(viewport.height) {
            continue;
        }
        let Ok(screen_row) = u16::try_from(screen_row) else {
            continue;
        };
        for col in 0..width {
            let screen_x = viewport.x.saturating_add(x).saturating_add(col);
            if screen_x >= viewport.right() {
                break;
            }
            let screen_y = viewport.y + screen_row;
            if let (Some(src), Some(dst)) = (
                scratch.cell((col, row)),
                buf.cell_mut((screen_x, screen_y)),
            ) {
                *dst = src.clone();
            }
        }
    }
}

/// Measures cards for the layout engine.
///
/// Column widths arrive as fractional cells; cards are always drawn at the
/// floor of that width, so measurement uses the same.
#[derive(Debug, Clone, Copy)]
pub struct CardMeasurer<'a> {
    articles: &'a [Article],
}

impl<'a> CardMeasurer<'a> {
    /// Measure cards for `articles`.
    pub fn new(articles: &'a [Article]) -> Self {
        Self { articles }
    }
}

impl Measure for CardMeasurer<'_> {
    fn measure(&mut self, index: usize, width: f32) -> f32 {
        self.articles
            .get(index)
            .map(|article| f32::from(card_height(article, cell_width(width))))
            .unwrap_or(0.0)
    }
}

/// Whole cells available for a fractional column width.
pub fn cell_width(width: f32) -> u16 {
    if width.is_finite() && width > 0.0 {
        width.floor().min(f32::from(u16::MAX)) as u16
    } else {
        0
    }
}
