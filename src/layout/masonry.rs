//! Shortest-column packing.
//!
//! Items are visited in their original order (never re-sorted by height) and
//! each one is dropped into whichever column is currently shortest. Ties go
//! to the lowest column index, so the result is fully determined by the
//! item order, the container width and the measured heights.

use super::measure::Measure;
use super::types::{ColumnMetrics, ItemPosition, LayoutParams, MasonryLayout};

/// Column count and width for `container_width`.
///
/// `count = max(1, floor(container_width / min_column_width))` and
/// `width = (container_width - (count - 1) * gap) / count`, so that
/// `count * width + (count - 1) * gap == container_width`.
///
/// Degenerate inputs (non-positive or non-finite minimum width, negative
/// container width) collapse to a single column.
pub fn column_metrics(container_width: f32, params: &LayoutParams) -> ColumnMetrics {
    let container_width = container_width.max(0.0);
    let count = if params.min_column_width.is_finite() && params.min_column_width > 0.0 {
        ((container_width / params.min_column_width).floor() as usize).max(1)
    } else {
        1
    };
    metrics_for_count(container_width, count, params.gap)
}

/// Uniform column width for an explicit column count (>= 1).
pub fn metrics_for_count(container_width: f32, count: usize, gap: f32) -> ColumnMetrics {
    let count = count.max(1);
    let width = (container_width.max(0.0) - (count - 1) as f32 * gap) / count as f32;
    ColumnMetrics {
        count,
        width: width.max(0.0),
    }
}

/// Index of the shortest column; the lowest index wins ties.
///
/// Returns 0 for an empty slice.
pub fn shortest_column(heights: &[f32]) -> usize {
    let mut best_index = 0;
    let mut best = match heights.first() {
        Some(height) => *height,
        None => return 0,
    };
    for (index, height) in heights.iter().enumerate().skip(1) {
        if *height < best {
            best = *height;
            best_index = index;
        }
    }
    best_index
}

/// Container height from final column heights: the tallest column minus
/// the trailing gap every placement adds. Zero when nothing was placed.
pub fn container_height(column_heights: &[f32], gap: f32, item_count: usize) -> f32 {
    if item_count == 0 {
        return 0.0;
    }
    let tallest = column_heights.iter().copied().fold(0.0_f32, f32::max);
    (tallest - gap).max(0.0)
}

/// Lay out `item_count` items with shortest-column packing.
///
/// Every item is measured at the column width before it is placed. The
/// returned layout is complete; callers never see a partial pass.
///
/// # Examples
///
/// ```
/// use masonry_feed::layout::{layout_shortest_column, FixedHeights, LayoutParams};
///
/// let params = LayoutParams::new(10.0, 100.0);
/// let mut heights = FixedHeights(vec![50.0, 20.0, 30.0]);
/// let layout = layout_shortest_column(3, 210.0, &params, &mut heights);
///
/// assert_eq!(layout.metrics.count, 2);
/// assert_eq!(layout.columns, vec![0, 1, 1]);
/// assert_eq!(layout.positions[2].y, 30.0);
/// assert_eq!(layout.container_height, 60.0);
/// ```
pub fn layout_shortest_column<M>(
    item_count: usize,
    container_width: f32,
    params: &LayoutParams,
    measurer: &mut M,
) -> MasonryLayout
where
    M: Measure + ?Sized,
{
    let metrics = column_metrics(container_width, params);
    if item_count == 0 {
        return MasonryLayout::empty(metrics);
    }

    let mut column_heights = vec![0.0_f32; metrics.count];
    let mut positions = Vec::with_capacity(item_count);
    let mut columns = Vec::with_capacity(item_count);

    for index in 0..item_count {
        let height = measurer.measure(index, metrics.width).max(0.0);
        let column = shortest_column(&column_heights);

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
