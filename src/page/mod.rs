//! Page identity for the crawl graph
//!
//! Every node, frontier entry, and visited record is keyed by a [`PageId`]:
//! the normalized last path segment of a page's canonical address. Both full
//! URLs (`https://en.wikipedia.org/wiki/Rust_(programming_language)`) and
//! bare titles (`Rust (programming language)`) normalize to the same key.

mod normalize;

pub use normalize::normalize_identifier;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while normalizing a page identifier
#[derive(Debug, Error)]
pub enum PageIdError {
    #[error("Page identifier is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no page segment: {0}")]
    MissingSegment(String),
}

/// Result type for page identifier operations
pub type PageIdResult<T> = std::result::Result<T, PageIdError>;

/// Normalized identity of one Wikipedia page
///
/// The inner string is the canonical URL segment (underscores, percent
/// escapes preserved), so `PageId`s compare equal exactly when the
/// underlying pages are the same article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Parses a page identifier from a URL or a bare title
    ///
    /// # Errors
    ///
    /// Returns [`PageIdError`] if the input is empty, a malformed URL, or a
    /// URL with no usable path segment. Callers seeding a crawl should treat
    /// this as fatal input validation, before any store is touched.
    pub fn parse(input: &str) -> PageIdResult<Self> {
        normalize_identifier(input).map(PageId)
    }

    /// Returns the normalized segment as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }

    /// Reconstructs the canonical article URL under the given base
    ///
    /// `base` is the scheme+host part, e.g. `https://en.wikipedia.org`.
    pub fn to_url(&self, base: &str) -> String {
        format!("{}/wiki/{}", base.trim_end_matches('/'), self.0)
    }

    /// Wraps an already-normalized segment without validation
    ///
    /// Used by the storage layer when reading back rows it wrote itself.
    pub(crate) fn from_normalized(segment: String) -> Self {
        PageId(segment)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
