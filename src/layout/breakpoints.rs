//! Breakpoint-driven column layout.
//!
//! A coarser alternative to shortest-column packing: the column count comes
//! from a fixed breakpoint table and items are dealt out round-robin, the way
//! CSS multi-column masonry libraries distribute children. Heights are still
//! measured so items can be stacked, but columns are not balanced.

use super::masonry::{container_height, metrics_for_count};
use super::measure::Measure;
use super::types::{ItemPosition, LayoutParams, MasonryLayout};

/// Column counts keyed by maximum container width.
///
/// The smallest breakpoint that is `>= width` decides; wider containers use
/// `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointColumns {
    default: usize,
    /// `(max_width, columns)`, sorted by `max_width` ascending.
    breakpoints: Vec<(f32, usize)>,
}

impl BreakpointColumns {
    /// Build a table. Column counts below 1 are raised to 1.
    pub fn new(default: usize, breakpoints: impl IntoIterator<Item = (f32, usize)>) -> Self {
        let mut breakpoints: Vec<(f32, usize)> = breakpoints
            .into_iter()
            .filter(|(width, _)| *width > 0.0)
            .map(|(width, columns)| (width, columns.max(1)))
            .collect();
        breakpoints.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            default: default.max(1),
            breakpoints,
        }
    }

    /// Same table with every breakpoint divided by `divisor`.
    ///
    /// Converts a pixel table to another unit, e.g. terminal cells.
    pub fn scaled(&self, divisor: f32) -> Self {
        if !(divisor.is_finite() && divisor > 0.0) {
            return self.clone();
        }
        Self::new(
            self.default,
            self.breakpoints
                .iter()
                .map(|(width, columns)| (width / divisor, *columns)),
        )
    }

    /// Column count for `container_width`.
    pub fn columns_for(&self, container_width: f32) -> usize {
        self.breakpoints
            .iter()
            .find(|(max_width, _)| container_width <= *max_width)
            .map(|(_, columns)| *columns)
            .unwrap_or(self.default)
    }
}

impl Default for BreakpointColumns {
    /// 3 columns by default; 6 up to 3600, 5 up to 2200, 4 up to 1800,
    /// 3 up to 1600, 2 up to 700, 1 up to 500.
    fn default() -> Self {
        Self::new(
            3,
            [
                (3600.0, 6),
                (2200.0, 5),
                (1800.0, 4),
                (1600.0, 3),
                (700.0, 2),
                (500.0, 1),
            ],
        )
    }
}

/// Lay out items round-robin across breakpoint-determined columns.
///
/// Item `i` goes to column `i % count` and is stacked under the previous item
/// in that column.
pub fn layout_breakpoints<M>(
    item_count: usize,
    container_width: f32,
    params: &LayoutParams,
    table: &BreakpointColumns,
    measurer: &mut M,
) -> MasonryLayout
where
    M: Measure + ?Sized,
{
    let metrics = metrics_for_count(container_width, table.columns_for(container_width), params.gap);
    if item_count == 0 {
        return MasonryLayout::empty(metrics);
    }

    let mut column_heights = vec![0.0_f32; metrics.count];
    let mut positions = Vec::with_capacity(item_count);
    let mut columns = Vec::with_capacity(item_count);

    for index in 0..item_count {
        let column = index % metrics.count;
        let height = measurer.measure(index, metrics.width).max(0.0);

        positions.push(ItemPosition {
            x: metrics.column_x(column, params.gap),
            y: column_heights[column],
            width: metrics.width,
            height,
        });
        columns.push(column);

        column_heights[column] += height + params.gap;
    }

    MasonryLayout {
        metrics,
        positions,
        columns,
        container_height: container_height(&column_heights, params.gap, item_count),
    }
}
