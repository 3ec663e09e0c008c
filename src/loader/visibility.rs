//! Sentinel visibility, computed with intersection-observer semantics.
//!
//! The observer is a plain value fed with geometry by whoever owns the
//! viewport. Nothing here is global, so tests drive it with synthetic spans.

/// A vertical extent in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Top edge.
    pub top: f32,
    /// Extent downwards from `top`. May be zero.
    pub height: f32,
}

impl Span {
    /// Create a span.
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Edge reported when the sentinel's visibility flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Sentinel entered the margin-expanded viewport.
    Entered,
    /// Sentinel left it.
    Left,
}

impl VisibilityChange {
    /// Visibility after this change.
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityChange::Entered)
    }
}

/// Decides whether the trailing sentinel counts as visible.
///
/// The viewport is grown by `root_margin` on both edges so the next page is
/// requested before the sentinel actually scrolls into view.
#[derive(Debug, Clone, PartialEq)]
pub struct SentinelObserver {
    threshold: f32,
    root_margin: f32,
    last: Option<bool>,
}

impl SentinelObserver {
    /// Create an observer. `threshold` is clamped to `[0, 1]`.
    pub fn new(threshold: f32, root_margin: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
            last: None,
        }
    }

    /// Fraction of `sentinel` inside the margin-expanded `viewport`.
    ///
    /// A zero-height sentinel is either fully in (1.0) or out (0.0).
    pub fn intersection_ratio(&self, sentinel: Span, viewport: Span) -> f32 {
        let root_top = viewport.top - self.root_margin;
        let root_bottom = viewport.bottom() + self.root_margin;

        if sentinel.height == 0.0 {
            return if sentinel.top >= root_top && sentinel.top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = sentinel.bottom().min(root_bottom) - sentinel.top.max(root_top);
        if overlap <= 0.0 {
            0.0
        } else {
            (overlap / sentinel.height).min(1.0)
        }
    }

    /// Whether the sentinel counts as visible for this geometry.
    pub fn is_visible(&self, sentinel: Span, viewport: Span) -> bool {
        let ratio = self.intersection_ratio(sentinel, viewport);
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Re-evaluate after a scroll or resize.
    ///
    /// Returns a change only when visibility differs from the previous call
    /// (the first call always reports).
    pub fn observe(&mut self, sentinel: Span, viewport: Span) -> Option<VisibilityChange> {
        let visible = self.is_visible(sentinel, viewport);
        if self.last == Some(visible) {
            return None;
        }
        self.last = Some(visible);
        Some(if visible {
            VisibilityChange::Entered
        } else {
            VisibilityChange::Left
        })
    }

    /// Forget the last observation, e.g. when the sentinel is removed.
    pub fn disconnect(&mut self) -> Option<VisibilityChange> {
        match self.last.take() {
            Some(true) => Some(VisibilityChange::Left),
            _ => None,
        }
    }
}
