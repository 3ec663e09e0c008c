//! Article: the gallery item type.
//!
//! Layout treats articles as opaque blocks; only the presentation layer and
//! the measurer look inside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable article identifier.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleId(String);

/// Error returned for an empty article identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ArticleId must not be empty")]
pub struct InvalidArticleId;

impl ArticleId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidArticleId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidArticleId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Identifier for the `index`-th (0-based) item of a numbered catalogue.
    pub fn from_index(index: usize) -> Self {
        Self((index + 1).to_string())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArticleId {
    type Error = InvalidArticleId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArticleId> for String {
    fn from(id: ArticleId) -> Self {
        id.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A blog article shown as one card in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier.
    pub id: ArticleId,
    /// Headline.
    pub title: String,
    /// Short teaser; its length is the main source of height variation.
    pub excerpt: String,
    /// Full body text (not shown on the card).
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
    /// Cover image location.
    pub image_url: String,
    /// Category badge text.
    pub category: String,
    /// Estimated reading time.
    pub read_time_minutes: u32,
    /// Topic tags, without the leading `#`.
    pub tags: Vec<String>,
}

impl Article {
    /// Publication date formatted like "Mar 4, 2024".
    pub fn display_date(&self) -> String {
        self.published_at.format("%b %-d, %Y").to_string()
    }
}
