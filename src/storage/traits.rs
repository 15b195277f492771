//! Storage trait and error types

use crate::page::PageId;
use crate::storage::{DequeueOrder, EdgeRecord, GraphCounts, NodeRecord};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during storage operations
///
/// These are the fatal kind: the store itself is corrupt or unreachable.
/// Expected "already exists" outcomes are not errors; they surface as
/// `false` returns from the insert operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt row in {table}: {message}")]
    CorruptRow { table: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for crawl-graph storage backends
///
/// One implementation instance backs exactly one crawl session; the
/// orchestrator is the sole writer, while exporters may read concurrently.
pub trait GraphStore {
    // ===== Frontier =====

    /// Queues a page for a future visit
    ///
    /// Returns `false` without mutating anything if the page is already
    /// visited or already has a live frontier entry. The visited check and
    /// the insert are a single atomic operation, so concurrent duplicate
    /// enqueues cannot produce two entries for one page.
    fn enqueue(&mut self, page: &PageId, priority: f64) -> StoreResult<bool>;

    /// Removes one entry per the given ordering and marks it visited
    ///
    /// Removal and the visited insert commit together; a crash between them
    /// can neither lose nor duplicate the entry. Returns `None` when the
    /// frontier is empty.
    fn dequeue(&mut self, order: DequeueOrder) -> StoreResult<Option<PageId>>;

    /// Number of live frontier entries
    fn frontier_size(&self) -> StoreResult<u64>;

    // ===== Visited set =====

    /// Whether the page has already been processed
    ///
    /// Visited pages are permanent for the life of the session; there is no
    /// deletion operation.
    fn is_visited(&self, page: &PageId) -> StoreResult<bool>;

    /// Number of visited pages
    fn visited_size(&self) -> StoreResult<u64>;

    // ===== Graph =====

    /// Inserts a node; first write wins
    ///
    /// Returns `false` if a node with this page id already exists (a no-op,
    /// never an overwrite). Legitimate on resumed sessions.
    fn add_node(&mut self, page: &PageId, categories: &BTreeSet<String>) -> StoreResult<bool>;

    /// Inserts a directed edge; duplicates are tolerated
    fn add_edge(&mut self, origin: &PageId, target: &PageId) -> StoreResult<bool>;

    /// All nodes, ordered by page id
    fn all_nodes(&self) -> StoreResult<Vec<NodeRecord>>;

    /// All edges, ordered by origin then target
    ///
    /// The ordering is deterministic so exports reproduce byte-for-byte
    /// given identical content.
    fn all_edges(&self) -> StoreResult<Vec<EdgeRecord>>;

    /// Node and edge totals
    fn counts(&self) -> StoreResult<GraphCounts>;
}
