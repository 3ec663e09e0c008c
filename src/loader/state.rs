//! Observable loader state and fetch tickets.

use crate::model::PageNumber;

/// Snapshot of the incremental loader, read by the view layer.
///
/// # Invariants
/// - At most one of `loading` / `loading_more` is true.
/// - `items` only grows between resets.
/// - `has_more == false` is terminal until reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) loading: bool,
    pub(crate) loading_more: bool,
    pub(crate) has_more: bool,
    pub(crate) error: Option<String>,
    pub(crate) next_page: PageNumber,
}

impl<T> LoadState<T> {
    /// Fresh state positioned at `initial_page`.
    pub fn new(initial_page: PageNumber) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loading_more: false,
            has_more: true,
            error: None,
            next_page: initial_page,
        }
    }

    /// Loaded items in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// True only while the very first page is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while any later page is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Whether further pages may exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Message from the most recent failed fetch, cleared when the next fetch starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The page the next load-more will request.
    pub fn next_page(&self) -> PageNumber {
        self.next_page
    }

    /// Whether nothing has been loaded yet.
    ///
    /// An error while this holds is an initial-load error; otherwise it is a
    /// load-more error and existing items stay visible.
    pub fn is_initial(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }

    /// Whether the source reported its last page.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more
    }
}

/// Which flavour of fetch a ticket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// The first page of a session; result replaces `items`.
    Initial,
    /// A later page; result is appended.
    More,
}

/// One outstanding fetch.
///
/// Issued by the loader, carried through whatever performs the fetch, and
/// handed back with the result. A ticket from before a reset never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    page: PageNumber,
    kind: FetchKind,
    generation: u64,
}

impl FetchTicket {
    pub(crate) fn new(page: PageNumber, kind: FetchKind, generation: u64) -> Self {
        Self {
            page,
            kind,
            generation,
        }
    }

    /// Page to request from the source.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Initial or load-more.
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Loader generation this ticket was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of handing a fetch result back to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The page was applied; `added` items are now visible.
    Applied {
        /// Number of items the page contributed.
        added: usize,
    },
    /// The fetch failed and the error slot was set.
    Failed,
    /// The ticket no longer matches (reset or duplicate); nothing changed.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty_and_hopeful() {
        let state: LoadState<u8> = LoadState::new(PageNumber::FIRST);
        assert!(state.items().is_empty());
        assert!(state.has_more());
        assert!(!state.is_busy());
        assert!(state.is_initial());
        assert_eq!(state.error(), None);
        assert_eq!(state.next_page(), PageNumber::FIRST);
    }

    #[test]
    fn exhausted_mirrors_has_more() {
        let mut state: LoadState<u8> = LoadState::new(PageNumber::FIRST);
        assert!(!state.is_exhausted());
        state.has_more = false;
        assert!(state.is_exhausted());
    }

    #[test]
    fn tickets_differ_by_generation() {
        let a = FetchTicket::new(PageNumber::FIRST, FetchKind::Initial, 0);
        let b = FetchTicket::new(PageNumber::FIRST, FetchKind::Initial, 1);
        assert_ne!(a, b);
    }
}
