//! Core layout value types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Global parameters that shape the grid.
///
/// Units are whatever the rendering surface uses (pixels on the web, cells
/// in a terminal). Two params compare equal iff they produce identical
/// layouts for the same width and heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Spacing between columns and between items in a column.
    pub gap: f32,
    /// Narrowest column allowed before dropping to fewer columns.
    pub min_column_width: f32,
}

impl LayoutParams {
    /// Create new layout params.
    pub fn new(gap: f32, min_column_width: f32) -> Self {
        Self {
            gap,
            min_column_width,
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            gap: 24.0,
            min_column_width: 320.0,
        }
    }
}

/// Absolute placement of one item inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemPosition {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width the item was measured at (the column width).
    pub width: f32,
    /// Measured height.
    pub height: f32,
}

impl ItemPosition {
    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Column count and uniform column width for a container width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    /// Number of columns, always >= 1.
    pub count: usize,
    /// Width of every column.
    pub width: f32,
}

impl ColumnMetrics {
    /// Left edge of column `index`.
    pub fn column_x(&self, index: usize, gap: f32) -> f32 {
        index as f32 * (self.width + gap)
    }
}

/// Result of one full layout pass.
///
/// `positions[i]` and `columns[i]` describe item `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasonryLayout {
    /// Column geometry used for this pass.
    pub metrics: ColumnMetrics,
    /// Per-item placement, in item order.
    pub positions: Vec<ItemPosition>,
    /// Column each item landed in.
    pub columns: Vec<usize>,
    /// Height of the tallest column, trailing gap removed.
    pub container_height: f32,
}

impl MasonryLayout {
    /// Layout with no items.
    pub fn empty(metrics: ColumnMetrics) -> Self {
        Self {
            metrics,
            positions: Vec::new(),
            columns: Vec::new(),
            container_height: 0.0,
        }
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no items were placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices of items whose vertical extent intersects `[top, bottom)`.
    pub fn visible_indices(&self, top: f32, bottom: f32) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.y < bottom && p.bottom() > top)
            .map(|(index, _)| index)
    }
}

/// How items are assigned to columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Each item goes to the currently shortest column. Balanced.
    #[default]
    #[serde(rename = "shortest")]
    ShortestColumn,
    /// Breakpoint-driven column count, round-robin distribution. Not balanced.
    Breakpoints,
}

/// Error for an unrecognised strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout strategy '{0}' (expected 'shortest' or 'breakpoints')")]
pub struct UnknownStrategy(pub String);

impl LayoutStrategy {
    /// Name used in config files, env vars and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::ShortestColumn => "shortest",
            LayoutStrategy::Breakpoints => "breakpoints",
        }
    }

    /// The other strategy.
    pub fn toggled(&self) -> Self {
        match self {
            LayoutStrategy::ShortestColumn => LayoutStrategy::Breakpoints,
            LayoutStrategy::Breakpoints => LayoutStrategy::ShortestColumn,
        }
    }
}

impl FromStr for LayoutStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortest" => Ok(LayoutStrategy::ShortestColumn),
            "breakpoints" => Ok(LayoutStrategy::Breakpoints),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
