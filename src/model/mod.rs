//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod article;
pub mod error;
pub mod key_action;
pub mod page;

// Re-export for convenience
pub use article::{Article, ArticleId, InvalidArticleId};
pub use error::{AppError, FetchError};
pub use key_action::KeyAction;
pub use page::{InvalidPageNumber, Page, PageNumber};
