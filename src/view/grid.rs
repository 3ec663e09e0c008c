//! Scrolled grid of cards plus the footer beneath it.
//!
//! Content coordinates start at the top of the grid. The footer begins one
//! gap below the tallest column; its first row is where the load sentinel
//! sits.

use super::card::{cell_width, render_card_clipped};
use crate::layout::MasonryLayout;
use crate::loader::Span as ContentSpan;
use crate::model::Article;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

/// Vertical extents of the scrollable content, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedGeometry {
    /// First footer row.
    pub footer_top: u16,
    /// Total scrollable height, footer included.
    pub content_height: u16,
}

impl FeedGeometry {
    /// Geometry for `layout` followed by `footer_rows` rows of footer.
    pub fn new(layout: &MasonryLayout, gap: f32, footer_rows: usize) -> Self {
        let grid = if layout.is_empty() {
            0.0
        } else {
            layout.container_height + gap
        };
        let footer_top = to_rows(grid);
        let footer_rows = u16::try_from(footer_rows).unwrap_or(u16::MAX);
        Self {
            footer_top,
            content_height: footer_top.saturating_add(footer_rows),
        }
    }

    /// The sentinel's extent: the first footer row.
    pub fn sentinel(&self) -> ContentSpan {
        ContentSpan::new(f32::from(self.footer_top), 1.0)
    }

    /// Largest scroll offset that still fills a viewport `rows` tall.
    pub fn max_scroll(&self, rows: u16) -> u16 {
        self.content_height.saturating_sub(rows)
    }
}

fn to_rows(value: f32) -> u16 {
    if value.is_finite() && value > 0.0 {
        value.ceil().min(f32::from(u16::MAX)) as u16
    } else {
        0
    }
}

fn to_row_offset(value: f32) -> i32 {
    if value.is_finite() {
        value.floor() as i32
    } else {
        0
    }
}

/// Cards and footer, scrolled by `scroll` rows.
pub struct GridView<'a> {
    articles: &'a [Article],
    layout: &'a MasonryLayout,
    geometry: FeedGeometry,
    footer: Vec<Line<'static>>,
    scroll: u16,
}

impl<'a> GridView<'a> {
    /// Build the view.
    pub fn new(
        articles: &'a [Article],
        layout: &'a MasonryLayout,
        geometry: FeedGeometry,
        footer: Vec<Line<'static>>,
        scroll: u16,
    ) -> Self {
        Self {
            articles,
            layout,
            geometry,
            footer,
            scroll,
        }
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let top = f32::from(self.scroll);
        let bottom = top + f32::from(area.height);
        let scroll = i32::from(self.scroll);

        for index in self.layout.visible_indices(top, bottom) {
            let (Some(position), Some(article)) =
                (self.layout.positions.get(index), self.articles.get(index))
            else {
                continue;
            };
            render_card_clipped(
                buf,
                area,
                article,
                cell_width(position.x),
                to_row_offset(position.y) - scroll,
                cell_width(position.width),
            );
        }

        for (offset, line) in self.footer.into_iter().enumerate() {
            let row = i32::from(self.geometry.footer_top) + offset as i32 - scroll;
            let Ok(row) = u16::try_from(row) else {
                continue;
            };
            if row >= area.height {
                break;
            }
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, area.y + row, area.width, 1), buf);
        }
    }
}
