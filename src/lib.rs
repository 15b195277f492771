//! Wikigraph: an incremental Wikipedia link-graph crawler
//!
//! This crate crawls outbound links between Wikipedia pages into a directed
//! graph, persisting the crawl frontier and visited set so a run can stop and
//! resume. The captured graph exports to flat CSV tables, and shortest-path
//! queries run against the exported edge list.

pub mod config;
pub mod crawler;
pub mod export;
pub mod fetcher;
pub mod page;
pub mod path;
pub mod scorer;
pub mod session;
pub mod storage;

use thiserror::Error;

/// Main error type for wikigraph operations
#[derive(Debug, Error)]
pub enum WikigraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid page identifier: {0}")]
    Page(#[from] page::PageIdError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StoreError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for wikigraph operations
pub type Result<T> = std::result::Result<T, WikigraphError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    CancellationToken, CrawlOutcome, CrawlPhase, CrawlPolicy, Orchestrator, ProgressEvent,
};
pub use fetcher::{PageData, PageFetcher, WikipediaFetcher};
pub use page::PageId;
pub use path::PathResult;
pub use scorer::{RelevanceScorer, TokenOverlapScorer};
pub use session::Session;
pub use storage::{DequeueOrder, GraphStore, SqliteStore};
