//! Pagination primitives shared by the loader and data sources.

use std::fmt;

/// 1-based page index. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

/// Error returned when attempting to create a PageNumber of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("PageNumber must be >= 1 (got {0})")]
pub struct InvalidPageNumber(pub u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Smart constructor that validates the page number is >= 1.
    pub fn new(page: u32) -> Result<Self, InvalidPageNumber> {
        if page == 0 {
            Err(InvalidPageNumber(page))
        } else {
            Ok(Self(page))
        }
    }

    /// Get the raw 1-based value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The page after this one, saturating at `u32::MAX`.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// 0-based offset of this page's first item for a fixed page size.
    pub fn start_offset(&self, page_size: usize) -> usize {
        (self.0 as usize - 1).saturating_mul(page_size)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of results from a data source.
///
/// Distinct pages never overlap; the loader appends them as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in display order.
    pub items: Vec<T>,
    /// Whether pages after this one exist.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// Number of items on the page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_rejects_zero() {
        assert_eq!(PageNumber::new(0), Err(InvalidPageNumber(0)));
    }

    #[test]
    fn page_number_accepts_one() {
        assert_eq!(PageNumber::new(1), Ok(PageNumber::FIRST));
    }

    #[test]
    fn next_increments() {
        let page = PageNumber::new(3).unwrap();
        assert_eq!(page.next().get(), 4);
    }

    #[test]
    fn next_saturates_at_max() {
        let page = PageNumber::new(u32::MAX).unwrap();
        assert_eq!(page.next().get(), u32::MAX);
    }

    #[test]
    fn start_offset_is_zero_for_first_page() {
        assert_eq!(PageNumber::FIRST.start_offset(12), 0);
    }

    #[test]
    fn start_offset_scales_with_page_size() {
        let page = PageNumber::new(4).unwrap();
        assert_eq!(page.start_offset(12), 36);
    }

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(PageNumber::new(7).unwrap().to_string(), "7");
    }

    #[test]
    fn page_len_and_is_empty() {
        let page = Page::new(vec![1, 2, 3], true);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert!(Page::<u8>::new(Vec::new(), false).is_empty());
    }
}
