//! HTTP fetcher for live Wikipedia pages

use crate::config::FetcherConfig;
use crate::fetcher::parser::extract_page_data;
use crate::fetcher::{PageData, PageFetcher};
use crate::page::PageId;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for article fetches
///
/// Wikipedia returns 403 Forbidden to default library user agents, so the
/// configured agent string (a browser-like default) is mandatory.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher that resolves pages against a live Wikipedia-shaped host
///
/// The base URL is configurable so tests can point it at a mock server.
pub struct WikipediaFetcher {
    client: Client,
    base_url: String,
}

impl WikipediaFetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a fetcher with an existing client and base URL
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PageFetcher for WikipediaFetcher {
    /// Fetches one article and extracts its links and categories
    ///
    /// Every failure mode (connect error, timeout, non-2xx status, body read
    /// error) degrades to [`PageData::empty`]; the error is logged and the
    /// crawl moves on.
    async fn fetch(&self, page: &PageId) -> PageData {
        let url = page.to_url(&self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", page, e);
                return PageData::empty();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Fetch for {} returned HTTP {}", page, status.as_u16());
            return PageData::empty();
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Failed to read body for {}: {}", page, e);
                return PageData::empty();
            }
        };

        let data = extract_page_data(&body);
        tracing::debug!(
            "Fetched {}: {} links, {} categories",
            page,
            data.links.len(),
            data.categories.len()
        );

        data
    }
}
