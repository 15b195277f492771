//! Progress events and cooperative cancellation
//!
//! The orchestrator runs on a dedicated task; a driving process talks to it
//! over two one-directional channels. Progress flows out through an
//! unbounded sender so the crawl loop never blocks on a slow consumer, and
//! cancellation flows in through a shared flag polled at step boundaries.

use crate::page::PageId;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal for one crawl session
///
/// Cloned into whatever drives the crawl; the orchestrator polls it between
/// steps, so an in-flight fetch always completes before cancellation takes
/// effect.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the crawl stop at the next step boundary
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Snapshot emitted after each processed page
///
/// The sole contract between the crawl loop and any presentation layer;
/// consumers drain these from the channel without feeding anything back.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Zero-based index of this step within the run
    pub index: u64,
    /// The page processed in this step
    pub current_page: PageId,
    /// Category labels recorded for the page
    pub categories: BTreeSet<String>,
    /// Outbound links found on the page
    pub children: Vec<PageId>,
    /// Edges written this step
    pub edges_added: u64,
    /// Live frontier size after the step
    pub frontier_size: u64,
    /// Visited-set size after the step
    pub visited_size: u64,
    /// Total nodes in the graph store
    pub node_count: u64,
    /// Total edges in the graph store
    pub edge_count: u64,
    /// Lowest-cost child enqueued this step, if any
    pub most_relevant_pending_child: Option<PageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_clear() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn test_cancel_visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_cancelled());
    }
}
