//! Error types for masonry-feed.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - `ConfigError` - config file read/parse/validation failures
//!   - `LoggingError` - tracing subscriber setup failures
//!   - `std::io::Error` - terminal failures
//! - [`FetchError`] - data-source failures. These are **non-fatal**: the
//!   loader catches them at its boundary and turns them into a display
//!   message in `LoadState::error`.
//!
//! Layout has no error type. Its only failure-like state is "not ready".

use super::page::PageNumber;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use masonry_feed::model::error::AppError;
///
/// fn run() -> Result<(), AppError> {
///     let _config = masonry_feed::config::load_config_with_precedence(None)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A fetch failed in a context where it cannot be shown to the user
    /// (headless `--dump-layout` runs).
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Layout output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Terminal or stdout I/O error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure reported by a page source.
///
/// Converted to a user-displayable string by the loader; the `Display` text
/// is exactly what the gallery shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source could not serve the page.
    ///
    /// # Examples
    ///
    /// ```
    /// use masonry_feed::model::{FetchError, PageNumber};
    ///
    /// let err = FetchError::Unavailable {
    ///     page: PageNumber::new(2).unwrap(),
    ///     reason: "server returned 503".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Failed to load page 2: server returned 503");
    /// ```
    #[error("Failed to load page {page}: {reason}")]
    Unavailable {
        /// The page that failed.
        page: PageNumber,
        /// Source-specific detail.
        reason: String,
    },

    /// The source gave up waiting for the page.
    #[error("Timed out loading page {page}")]
    Timeout {
        /// The page that timed out.
        page: PageNumber,
    },

    /// The background fetch worker is gone; no further pages can arrive.
    #[error("Fetch worker disconnected")]
    WorkerDisconnected,
}

impl FetchError {
    /// The page this error refers to, if any.
    pub fn page(&self) -> Option<PageNumber> {
        match self {
            FetchError::Unavailable { page, .. } | FetchError::Timeout { page } => Some(*page),
            FetchError::WorkerDisconnected => None,
        }
    }
}
