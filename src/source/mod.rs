//! Paginated data sources.
//!
//! This module provides the page source contract and its implementations:
//! - `PageSource` trait: blocking fetch of one page
//! - `MockArticleSource`: deterministic synthetic article catalogue
//! - `FetchWorker`: background thread that runs a source off the event loop

use crate::model::{FetchError, Page, PageNumber};

pub mod mock;
pub mod worker;

pub use mock::{FailurePlan, MockArticleSource};
pub use worker::{Completion, FetchWorker};

/// A paginated source of items.
///
/// # Contract
/// - Distinct pages never share items
/// - `has_more` is false on the last page and on every page past the end
/// - Failures are values; implementations MUST NOT panic
pub trait PageSource<T> {
    /// Fetch one page. May block.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the page cannot be served.
    fn fetch_page(&mut self, page: PageNumber) -> Result<Page<T>, FetchError>;
}

impl<T, S> PageSource<T> for Box<S>
where
    S: PageSource<T> + ?Sized,
{
    fn fetch_page(&mut self, page: PageNumber) -> Result<Page<T>, FetchError> {
        (**self).fetch_page(page)
    }
}

/// Blocking in-memory source over a fixed item list.
///
/// Pages are consecutive `page_size` slices. Useful for headless runs and
/// tests where the catalogue is already in hand.
#[derive(Debug, Clone, PartialEq)]
pub struct VecSource<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T> VecSource<T> {
    /// Serve `items` in pages of `page_size` (raised to at least 1).
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }
}

impl<T: Clone> PageSource<T> for VecSource<T> {
    fn fetch_page(&mut self, page: PageNumber) -> Result<Page<T>, FetchError> {
        Ok(slice_page(&self.items, page, self.page_size))
    }
}

/// Cut page `page` of size `page_size` out of `items`.
pub(crate) fn slice_page<T: Clone>(items: &[T], page: PageNumber, page_size: usize) -> Page<T> {
    let start = page.start_offset(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page::new(
        items[start..end].to_vec(),
        start.saturating_add(page_size) < items.len(),
    )
}
