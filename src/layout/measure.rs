//! Measurement contract between the layout engine and the rendering surface.
//!
//! Layout needs each item's rendered height, and that height depends on the
//! width the item is rendered at. The engine therefore always picks the
//! column width first and asks the surface to render at exactly that width
//! before reading the height back.

/// Renders an item at a given width and reports its height.
///
/// # Contract
/// - MUST be deterministic for the same `(index, width)` within one pass
/// - MUST return a non-negative height
/// - Called once per item per layout pass, in item order
pub trait Measure {
    /// Height of item `index` when rendered `width` wide.
    fn measure(&mut self, index: usize, width: f32) -> f32;
}

impl<F> Measure for F
where
    F: FnMut(usize, f32) -> f32,
{
    fn measure(&mut self, index: usize, width: f32) -> f32 {
        self(index, width)
    }
}

/// Pre-measured heights that do not depend on width.
///
/// Out-of-range indices measure as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedHeights(pub Vec<f32>);

impl Measure for FixedHeights {
    fn measure(&mut self, index: usize, _width: f32) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_measurers() {
        let mut measurer = |index: usize, width: f32| index as f32 + width;
        assert_eq!(Measure::measure(&mut measurer, 2, 10.0), 12.0);
    }

    #[test]
    fn fixed_heights_ignore_width() {
        let mut heights = FixedHeights(vec![3.0, 7.0]);
        assert_eq!(heights.measure(1, 10.0), 7.0);
        assert_eq!(heights.measure(1, 999.0), 7.0);
    }

    #[test]
    fn fixed_heights_out_of_range_is_zero() {
        let mut heights = FixedHeights(vec![3.0]);
        assert_eq!(heights.measure(5, 10.0), 0.0);
    }
}
