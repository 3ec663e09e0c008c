//! Background fetch worker.
//!
//! Runs a `PageSource` on its own thread so slow fetches never block the
//! event loop. Tickets go in over one channel; completions come back over
//! another, tagged with the ticket they answer. The worker never touches
//! loader state.

use super::PageSource;
use crate::loader::FetchTicket;
use crate::model::{FetchError, Page};
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// A finished fetch, ready to hand to `InfiniteLoader::resolve`.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    /// Ticket the fetch was issued for.
    pub ticket: FetchTicket,
    /// Outcome from the source.
    pub result: Result<Page<T>, FetchError>,
}

/// Handle to the fetch thread.
///
/// Dropping the handle closes the request channel; the thread finishes its
/// current fetch and exits.
#[derive(Debug)]
pub struct FetchWorker<T> {
    requests: Option<Sender<FetchTicket>>,
    completions: Receiver<Completion<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> FetchWorker<T> {
    /// Spawn a worker thread that owns `source`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<S>(mut source: S) -> io::Result<Self>
    where
        S: PageSource<T> + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<FetchTicket>();
        let (completion_tx, completion_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("fetch-worker".to_string())
            .spawn(move || {
                for ticket in request_rx {
                    debug!(page = %ticket.page(), kind = ?ticket.kind(), "Fetching");
                    let result = source.fetch_page(ticket.page());
                    if completion_tx.send(Completion { ticket, result }).is_err() {
                        // Event loop is gone.
                        break;
                    }
                }
                debug!("Fetch worker exiting");
            })?;

        Ok(Self {
            requests: Some(request_tx),
            completions: completion_rx,
            handle: Some(handle),
        })
    }
}

impl<T> FetchWorker<T> {
    /// Queue a fetch.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerDisconnected` if the thread has exited.
    pub fn submit(&self, ticket: FetchTicket) -> Result<(), FetchError> {
        let requests = self
            .requests
            .as_ref()
            .ok_or(FetchError::WorkerDisconnected)?;
        requests.send(ticket).map_err(|_| {
            warn!(page = %ticket.page(), "Fetch worker is gone");
            FetchError::WorkerDisconnected
        })
    }

    /// Take one finished fetch without blocking.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerDisconnected` once the thread has exited
    /// and every completion has been drained.
    pub fn try_recv(&self) -> Result<Option<Completion<T>>, FetchError> {
        match self.completions.try_recv() {
            Ok(completion) => Ok(Some(completion)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(FetchError::WorkerDisconnected),
        }
    }

    /// Wait up to `timeout` for one finished fetch.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerDisconnected` if the thread has exited.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Completion<T>>, FetchError> {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => Ok(Some(completion)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(FetchError::WorkerDisconnected),
        }
    }

    /// Drain every completion currently available.
    pub fn drain(&self) -> Vec<Completion<T>> {
        self.completions.try_iter().collect()
    }
}

impl<T> Drop for FetchWorker<T> {
    fn drop(&mut self) {
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Fetch worker panicked");
            }
        }
    }
}
