//! Incremental loader: owns the growing item list and the pagination cursor.
//!
//! The loader never performs I/O. Operations that decide to fetch return a
//! [`FetchTicket`]; the caller fetches `ticket.page()` however it likes and
//! hands the outcome back through [`InfiniteLoader::resolve`]. While a ticket
//! is outstanding the loader sits in `loading` / `loading_more`, and every
//! guard refuses to issue a second one.
//!
//! # Module Structure
//!
//! - `state`: LoadState snapshot, FetchTicket, Resolution
//! - `visibility`: SentinelObserver - intersection test for the trailing sentinel

pub mod state;
pub mod visibility;

pub use state::{FetchKind, FetchTicket, LoadState, Resolution};
pub use visibility::{SentinelObserver, Span, VisibilityChange};

use crate::model::{FetchError, Page, PageNumber};
use tracing::{debug, info, warn};

/// Tunables for the loader and its sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderOptions {
    /// Page requested by the initial load.
    pub initial_page: PageNumber,
    /// Fraction of the sentinel that must be visible before it counts.
    pub visibility_threshold: f32,
    /// Distance beyond the viewport edges at which the sentinel already counts.
    pub root_margin: f32,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            initial_page: PageNumber::FIRST,
            visibility_threshold: 0.1,
            root_margin: 100.0,
        }
    }
}

impl LoaderOptions {
    /// Observer configured with this loader's threshold and margin.
    pub fn observer(&self) -> SentinelObserver {
        SentinelObserver::new(self.visibility_threshold, self.root_margin)
    }
}

/// Scroll-driven paginated loader.
///
/// One state machine covers both the first load and every later page; the
/// two error flavours differ only in whether `items` is empty.
#[derive(Debug, Clone)]
pub struct InfiniteLoader<T> {
    state: LoadState<T>,
    options: LoaderOptions,
    /// Latch: the initial load has been issued in this generation.
    initialized: bool,
    generation: u64,
    in_flight: Option<FetchTicket>,
    sentinel_visible: bool,
}

impl<T> InfiniteLoader<T> {
    /// Create an idle loader. Call [`load_initial`](Self::load_initial) on mount.
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            state: LoadState::new(options.initial_page),
            options,
            initialized: false,
            generation: 0,
            in_flight: None,
            sentinel_visible: false,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Loaded items in display order.
    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    /// Options this loader was built with.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// The ticket the loader is waiting on, if any.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Last visibility reported for the sentinel.
    pub fn sentinel_visible(&self) -> bool {
        self.sentinel_visible
    }

    /// Issue the first fetch of this generation.
    ///
    /// Latched: returns `None` on every call after the first until
    /// [`retry`](Self::retry) (with no items) or [`reset`](Self::reset)
    /// clears the latch. Also refuses while another fetch is in flight.
    pub fn load_initial(&mut self) -> Option<FetchTicket> {
        if self.initialized || self.state.is_busy() {
            return None;
        }
        self.initialized = true;
        self.state.loading = true;
        self.state.error = None;

        let ticket = FetchTicket::new(
            self.options.initial_page,
            FetchKind::Initial,
            self.generation,
        );
        self.in_flight = Some(ticket);
        debug!(page = %ticket.page(), generation = self.generation, "Initial load issued");
        Some(ticket)
    }

    /// Issue a fetch for the page at the cursor.
    ///
    /// Returns `None` before the initial load has been issued, when the
    /// source is exhausted, or while a fetch is already in flight. Does not
    /// look at visibility or the error slot; that is [`poll`](Self::poll)'s
    /// job.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.initialized || !self.state.has_more || self.state.is_busy() {
            return None;
        }
        self.state.loading_more = true;
        self.state.error = None;

        let ticket = FetchTicket::new(self.state.next_page, FetchKind::More, self.generation);
        self.in_flight = Some(ticket);
        debug!(page = %ticket.page(), "Load more issued");
        Some(ticket)
    }

    /// Record the sentinel's visibility and re-evaluate the load-more guards.
    pub fn set_sentinel_visible(&mut self, visible: bool) -> Option<FetchTicket> {
        self.sentinel_visible = visible;
        self.poll()
    }

    /// Re-evaluate the automatic load-more trigger against current state.
    ///
    /// Call after every event (visibility change, fetch completion). Fires
    /// when the sentinel is visible, more pages exist, nothing is in flight,
    /// no error is pending and the initial load has been issued. Because a
    /// fetch makes the loader busy, a continuously visible sentinel yields
    /// exactly one fetch per page.
    pub fn poll(&mut self) -> Option<FetchTicket> {
        if !self.sentinel_visible || !self.initialized || self.state.error.is_some() {
            return None;
        }
        self.load_more()
    }

    /// Hand back the outcome of a fetch.
    ///
    /// Results for any ticket other than the one in flight (issued before a
    /// reset, or already resolved) are discarded as [`Resolution::Stale`].
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<T>, FetchError>,
    ) -> Resolution {
        if self.in_flight != Some(ticket) || ticket.generation() != self.generation {
            warn!(
                page = %ticket.page(),
                ticket_generation = ticket.generation(),
                generation = self.generation,
                "Discarding stale fetch result"
            );
            return Resolution::Stale;
        }
        self.in_flight = None;

        match ticket.kind() {
            FetchKind::Initial => self.state.loading = false,
            FetchKind::More => self.state.loading_more = false,
        }

        match result {
            Ok(page) => {
                let added = page.items.len();
                match ticket.kind() {
                    FetchKind::Initial => self.state.items = page.items,
                    FetchKind::More => self.state.items.extend(page.items),
                }
                self.state.has_more = page.has_more;
                self.state.next_page = ticket.page().next();
                info!(
                    page = %ticket.page(),
                    added,
                    total = self.state.items.len(),
                    has_more = self.state.has_more,
                    "Page applied"
                );
                Resolution::Applied { added }
            }
            Err(err) => {
                warn!(page = %ticket.page(), kind = ?ticket.kind(), error = %err, "Fetch failed");
                self.state.error = Some(err.to_string());
                Resolution::Failed
            }
        }
    }

    /// User-initiated retry.
    ///
    /// With nothing loaded, re-runs the initial load; otherwise re-attempts
    /// load-more from the current cursor.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.state.is_initial() {
            if self.state.is_busy() {
                return None;
            }
            debug!("Retrying initial load");
            self.initialized = false;
            self.load_initial()
        } else {
            debug!(page = %self.state.next_page, "Retrying load more");
            self.load_more()
        }
    }

    /// Discard everything and start over with a fresh initial load.
    ///
    /// Any in-flight fetch becomes stale. Always issues exactly one ticket.
    pub fn reset(&mut self) -> Option<FetchTicket> {
        self.generation = self.generation.wrapping_add(1);
        self.state = LoadState::new(self.options.initial_page);
        self.in_flight = None;
        self.initialized = false;
        info!(generation = self.generation, "Loader reset");
        self.load_initial()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
