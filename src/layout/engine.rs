//! MasonryEngine - owns the layout state and decides when to recompute.
//!
//! Triggers (item count or container width changes) only mark the layout
//! stale and schedule a debounced recompute. The recompute itself is
//! synchronous and replaces the whole position mapping; there is no
//! incremental diffing. Positions are published only when a pass completes.

use super::breakpoints::{layout_breakpoints, BreakpointColumns};
use super::debounce::Debouncer;
use super::masonry::{column_metrics, layout_shortest_column};
use super::measure::Measure;
use super::types::{ColumnMetrics, ItemPosition, LayoutParams, LayoutStrategy, MasonryLayout};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Debounce delays for the two recompute triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimings {
    /// Delay after an item-count change.
    pub item_debounce: Duration,
    /// Delay after a container width change.
    pub resize_debounce: Duration,
}

impl Default for EngineTimings {
    fn default() -> Self {
        Self {
            item_debounce: Duration::from_millis(50),
            resize_debounce: Duration::from_millis(100),
        }
    }
}

/// Layout engine for a masonry container.
///
/// # Invariants
/// - `is_ready()` is false whenever a recompute is pending or the container
///   width is unknown
/// - `layout()` returns `Some` only when ready
/// - Every published layout covers exactly `item_count()` items
#[derive(Debug, Clone)]
pub struct MasonryEngine {
    params: LayoutParams,
    strategy: LayoutStrategy,
    breakpoints: BreakpointColumns,
    timings: EngineTimings,
    container_width: Option<f32>,
    item_count: usize,
    layout: Option<MasonryLayout>,
    ready: bool,
    debouncer: Debouncer,
    passes: u64,
}

impl MasonryEngine {
    /// Create an engine with no container width and no items.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            strategy: LayoutStrategy::default(),
            breakpoints: BreakpointColumns::default(),
            timings: EngineTimings::default(),
            container_width: None,
            item_count: 0,
            layout: None,
            ready: false,
            debouncer: Debouncer::new(),
            passes: 0,
        }
    }

    /// Use a different column assignment strategy.
    pub fn with_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use a different breakpoint table for [`LayoutStrategy::Breakpoints`].
    pub fn with_breakpoints(mut self, breakpoints: BreakpointColumns) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Use different debounce delays.
    pub fn with_timings(mut self, timings: EngineTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Layout parameters.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Active strategy.
    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    /// Last known container width.
    pub fn container_width(&self) -> Option<f32> {
        self.container_width
    }

    /// Item count the next pass will lay out.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether the published layout matches current inputs.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether a debounced recompute is waiting.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time until the pending recompute is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Completed layout passes so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Report a new container width.
    ///
    /// `None` detaches the engine from its surface; layout is deferred until a
    /// width arrives again. Unchanged widths are ignored.
    pub fn set_container_width(&mut self, width: Option<f32>, now: Instant) {
        if self.container_width == width {
            return;
        }
        debug!(?width, previous = ?self.container_width, "Container width changed");
        self.container_width = width;
        self.invalidate(now, self.timings.resize_debounce);
    }

    /// Report a new item count. Unchanged counts are ignored.
    pub fn set_item_count(&mut self, count: usize, now: Instant) {
        if self.item_count == count {
            return;
        }
        debug!(count, previous = self.item_count, "Item count changed");
        self.item_count = count;
        self.invalidate(now, self.timings.item_debounce);
    }

    /// Switch strategy; schedules a recompute like an item change.
    pub fn set_strategy(&mut self, strategy: LayoutStrategy, now: Instant) {
        if self.strategy == strategy {
            return;
        }
        self.strategy = strategy;
        self.invalidate(now, self.timings.item_debounce);
    }

    /// Mark the layout stale and (re)schedule a recompute `delay` from `now`.
    ///
    /// Use when item content changed without the count changing.
    pub fn invalidate(&mut self, now: Instant, delay: Duration) {
        self.ready = false;
        self.debouncer.schedule(now, delay);
    }

    /// Run the pending recompute if its deadline has passed.
    ///
    /// Returns `true` when a new layout was published.
    pub fn tick<M>(&mut self, now: Instant, measurer: &mut M) -> bool
    where
        M: Measure + ?Sized,
    {
        if !self.debouncer.fire(now) {
            return false;
        }
        self.recompute(measurer)
    }

    /// Recompute immediately, cancelling any pending deadline.
    ///
    /// Returns `false` (and stays not-ready) while the width is unknown.
    pub fn recompute<M>(&mut self, measurer: &mut M) -> bool
    where
        M: Measure + ?Sized,
    {
        self.debouncer.cancel();
        let Some(width) = self.container_width else {
            debug!("Layout deferred: container width unknown");
            self.ready = false;
            return false;
        };

        let layout = match self.strategy {
            LayoutStrategy::ShortestColumn => {
                layout_shortest_column(self.item_count, width, &self.params, measurer)
            }
            LayoutStrategy::Breakpoints => layout_breakpoints(
                self.item_count,
                width,
                &self.params,
                &self.breakpoints,
                measurer,
            ),
        };

        self.passes += 1;
        info!(
            items = self.item_count,
            width,
            columns = layout.metrics.count,
            column_width = layout.metrics.width,
            container_height = layout.container_height,
            strategy = %self.strategy,
            pass = self.passes,
            "Layout recomputed"
        );
        self.layout = Some(layout);
        self.ready = true;
        true
    }

    /// Published layout, only while ready.
    pub fn layout(&self) -> Option<&MasonryLayout> {
        if self.ready {
            self.layout.as_ref()
        } else {
            None
        }
    }

    /// Position of item `index`, only while ready.
    pub fn position(&self, index: usize) -> Option<ItemPosition> {
        self.layout()
            .and_then(|layout| layout.positions.get(index).copied())
    }

    /// Height of the tallest column, only while ready.
    pub fn container_height(&self) -> Option<f32> {
        self.layout().map(|layout| layout.container_height)
    }

    /// Column geometry for the current width, if known.
    ///
    /// Available even while a recompute is pending.
    pub fn column_metrics(&self) -> Option<ColumnMetrics> {
        let width = self.container_width?;
        Some(match self.strategy {
            LayoutStrategy::ShortestColumn => column_metrics(width, &self.params),
            LayoutStrategy::Breakpoints => super::masonry::metrics_for_count(
                width,
                self.breakpoints.columns_for(width),
                self.params.gap,
            ),
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
