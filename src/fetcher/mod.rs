//! Page fetching boundary
//!
//! The orchestrator only depends on the [`PageFetcher`] trait: given a page
//! identifier, produce the set of outbound article links and category
//! labels. Network and parse failures never cross this boundary; they
//! collapse to an empty [`PageData`] so a single bad page cannot abort a
//! crawl.

mod parser;
mod wikipedia;

pub use parser::extract_page_data;
pub use wikipedia::{build_http_client, WikipediaFetcher};

use crate::page::PageId;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Outbound links and category labels of one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub links: BTreeSet<PageId>,
    pub categories: BTreeSet<String>,
}

impl PageData {
    /// The degraded result for a page that could not be fetched or parsed
    pub fn empty() -> Self {
        Self::default()
    }
}

/// External collaborator that resolves a page into its link/category data
///
/// Implementations must not fail past this boundary: any fetch or parse
/// error yields [`PageData::empty`].
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, page: &PageId) -> PageData;
}
