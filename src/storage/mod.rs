//! Storage module for persisting crawl state
//!
//! One crawl session owns four persisted tables: the frontier (pages queued
//! for a visit), the visited set (pages permanently processed), and the
//! node/edge tables of the captured graph. This module defines the typed
//! records, the [`GraphStore`] trait, and the SQLite implementation behind
//! it.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{GraphStore, StoreError, StoreResult};

use crate::page::PageId;
use std::collections::BTreeSet;

/// A graph vertex: one crawled page and its category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub page: PageId,
    pub categories: BTreeSet<String>,
}

/// A directed arc from an origin page to a linked page
///
/// Edges carry no uniqueness constraint, and the target may not have a node
/// row yet; both are expected, not integrity violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeRecord {
    pub origin: PageId,
    pub target: PageId,
}

/// Node/edge totals for the graph tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphCounts {
    pub nodes: u64,
    pub edges: u64,
}

/// Selection policy for [`GraphStore::dequeue`]
///
/// The comparator is data rather than code: a scorer's output can read as a
/// cost (lower is better) or as a similarity (higher is better), so the
/// store takes the ordering explicitly on every dequeue. Ties always break
/// by earliest enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DequeueOrder {
    /// Strict arrival order; reproduces breadth-first expansion
    #[default]
    Fifo,

    /// Lowest priority value first; priorities read as cost estimates
    LowestPriorityFirst,

    /// Highest priority value first; priorities read as similarity scores
    HighestPriorityFirst,
}

impl DequeueOrder {
    /// SQL ORDER BY clause implementing this policy
    pub(crate) fn sql_order(self) -> &'static str {
        match self {
            DequeueOrder::Fifo => "id ASC",
            DequeueOrder::LowestPriorityFirst => "priority ASC, id ASC",
            DequeueOrder::HighestPriorityFirst => "priority DESC, id ASC",
        }
    }
}
