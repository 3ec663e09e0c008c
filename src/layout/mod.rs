//! Masonry layout: column metrics, column assignment and recompute scheduling.
//!
//! The pure functions ([`layout_shortest_column`], [`layout_breakpoints`])
//! compute a complete [`MasonryLayout`] from an item count, a container width
//! and a [`Measure`] implementation. [`MasonryEngine`] wraps them with
//! debounced triggers and readiness gating.

pub mod breakpoints;
pub mod debounce;
pub mod engine;
pub mod masonry;
pub mod measure;
pub mod types;

pub use breakpoints::{layout_breakpoints, BreakpointColumns};
pub use debounce::Debouncer;
pub use engine::{EngineTimings, MasonryEngine};
pub use masonry::{column_metrics, container_height, layout_shortest_column, shortest_column};
pub use measure::{FixedHeights, Measure};
pub use types::{
    ColumnMetrics, ItemPosition, LayoutParams, LayoutStrategy, MasonryLayout, UnknownStrategy,
};
