//! Crawl orchestration state machine
//!
//! Drives the dequeue/fetch/record/enqueue loop against the session store:
//!
//! 1. Poll the cancellation token
//! 2. Dequeue one page (empty frontier completes the crawl)
//! 3. Fetch its links and categories (failures degrade to empty data)
//! 4. Record the node, then one edge per outbound link
//! 5. Enqueue eligible children, scored under the directed policy
//! 6. Emit a progress event and check the page budget
//!
//! On any termination the graph is exported exactly once; a directed crawl
//! that reached its target additionally answers the shortest-path query
//! over the fresh export.

use crate::crawler::{CancellationToken, ProgressEvent};
use crate::export::{export_graph, ExportPaths};
use crate::fetcher::{PageData, PageFetcher};
use crate::page::PageId;
use crate::path::{find_shortest_path, PathResult};
use crate::scorer::RelevanceScorer;
use crate::storage::{DequeueOrder, GraphCounts, GraphStore};
use crate::{ConfigError, Result, WikigraphError};
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Lifecycle of one crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running,
    /// Budget exhausted or frontier drained
    Completed,
    /// Cancellation observed at a step boundary
    Cancelled,
    /// Directed crawl saw its target among a page's children
    TargetFound,
}

/// Expansion policy for the crawl
pub enum CrawlPolicy {
    /// Breadth-first: children enqueue at priority 0 and dequeue in strict
    /// arrival order
    Plain,

    /// Target-directed: children enqueue at the scorer's cost estimate and
    /// the cheapest pending page dequeues first
    Directed {
        target: PageId,
        scorer: Box<dyn RelevanceScorer + Send>,
    },
}

impl CrawlPolicy {
    fn dequeue_order(&self) -> DequeueOrder {
        match self {
            CrawlPolicy::Plain => DequeueOrder::Fifo,
            CrawlPolicy::Directed { .. } => DequeueOrder::LowestPriorityFirst,
        }
    }

    fn target(&self) -> Option<&PageId> {
        match self {
            CrawlPolicy::Plain => None,
            CrawlPolicy::Directed { target, .. } => Some(target),
        }
    }
}

impl fmt::Debug for CrawlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlPolicy::Plain => f.write_str("Plain"),
            CrawlPolicy::Directed { target, .. } => {
                f.debug_struct("Directed").field("target", target).finish()
            }
        }
    }
}

/// Termination payload of a crawl run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The terminal phase the run ended in
    pub phase: CrawlPhase,
    /// Pages fully processed during this run
    pub pages_processed: u64,
    /// Graph totals at termination
    pub counts: GraphCounts,
    /// Locations of the exported node/edge tables
    pub export: ExportPaths,
    /// Shortest path from seed to target; present only on `TargetFound`
    pub shortest_path: Option<PathResult>,
}

/// Single-writer crawl driver for one session
///
/// Owns the session store for the duration of the run; fetcher and scorer
/// are injected collaborators. The loop is single-threaded and cooperative:
/// one page is fully processed before the next dequeue, which keeps store
/// mutations consistent without locking.
pub struct Orchestrator<S: GraphStore, F: PageFetcher> {
    store: S,
    fetcher: F,
    policy: CrawlPolicy,
    seed: PageId,
    page_budget: u64,
    export_stem: PathBuf,
    cancel: CancellationToken,
    progress: Option<UnboundedSender<ProgressEvent>>,
    phase: CrawlPhase,
    processed: u64,
}

impl<S: GraphStore, F: PageFetcher> Orchestrator<S, F> {
    /// Creates an orchestrator in the `Idle` phase
    ///
    /// # Errors
    ///
    /// Fails fast on a zero page budget, before any store mutation. Seed
    /// and target malformation is already ruled out by [`PageId`] parsing.
    pub fn new(
        store: S,
        fetcher: F,
        seed: PageId,
        policy: CrawlPolicy,
        page_budget: u64,
        export_stem: PathBuf,
    ) -> Result<Self> {
        if page_budget == 0 {
            return Err(WikigraphError::Config(ConfigError::Validation(
                "page budget must be positive".to_string(),
            )));
        }

        Ok(Self {
            store,
            fetcher,
            policy,
            seed,
            page_budget,
            export_stem,
            cancel: CancellationToken::new(),
            progress: None,
            phase: CrawlPhase::Idle,
            processed: 0,
        })
    }

    /// Installs a cancellation token shared with the driving process
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Installs a progress-event sender
    ///
    /// The channel is unbounded on the producer side, so emitting never
    /// slows the crawl loop; a dropped receiver is silently tolerated.
    pub fn with_progress(mut self, sender: UnboundedSender<ProgressEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to a terminal phase and returns its payload
    ///
    /// A brand-new session (empty frontier and visited set) is seeded with
    /// the seed page at priority 0; otherwise the run resumes from the
    /// persisted frontier. Store failures are fatal and propagate; fetch
    /// failures are absorbed per page.
    pub async fn run(&mut self) -> Result<CrawlOutcome> {
        if self.store.frontier_size()? == 0 && self.store.visited_size()? == 0 {
            self.store.enqueue(&self.seed, 0.0)?;
            tracing::info!("Seeded new session at {}", self.seed);
        } else {
            tracing::info!(
                "Resuming session: {} pending, {} visited",
                self.store.frontier_size()?,
                self.store.visited_size()?
            );
        }

        self.phase = CrawlPhase::Running;
        let order = self.policy.dequeue_order();

        while self.phase == CrawlPhase::Running {
            // Cancellation is only observed here, between steps; the step
            // just finished is always fully applied.
            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation observed after {} pages", self.processed);
                self.phase = CrawlPhase::Cancelled;
                break;
            }

            let current = match self.store.dequeue(order)? {
                Some(page) => page,
                None => {
                    tracing::info!("Frontier drained after {} pages", self.processed);
                    self.phase = CrawlPhase::Completed;
                    break;
                }
            };

            self.step(&current).await?;
        }

        self.finish()
    }

    /// Processes one dequeued page: node, edges, child enqueues, progress
    async fn step(&mut self, current: &PageId) -> Result<()> {
        tracing::debug!("{}. Processing {}", self.processed, current);

        let data = self.fetcher.fetch(current).await;

        // No-op on resumed sessions that already hold this node.
        self.store.add_node(current, &data.categories)?;

        let mut edges_added = 0u64;
        let mut best_pending: Option<(f64, PageId)> = None;

        for child in &data.links {
            self.store.add_edge(current, child)?;
            edges_added += 1;

            if self.policy.target() == Some(child) {
                tracing::info!("Target {} reached via {}", child, current);
                self.phase = CrawlPhase::TargetFound;
                break;
            }

            let priority = match &self.policy {
                CrawlPolicy::Plain => 0.0,
                CrawlPolicy::Directed { target, scorer } => scorer.score(target, child),
            };

            if self.store.enqueue(child, priority)? {
                let improves = best_pending
                    .as_ref()
                    .map_or(true, |(best, _)| priority < *best);
                if improves {
                    best_pending = Some((priority, child.clone()));
                }
            }
        }

        self.emit_progress(current, &data, edges_added, best_pending)?;

        self.processed += 1;
        if self.phase == CrawlPhase::Running && self.processed >= self.page_budget {
            tracing::info!("Page budget of {} exhausted", self.page_budget);
            self.phase = CrawlPhase::Completed;
        }

        Ok(())
    }

    fn emit_progress(
        &self,
        current: &PageId,
        data: &PageData,
        edges_added: u64,
        best_pending: Option<(f64, PageId)>,
    ) -> Result<()> {
        let Some(sender) = &self.progress else {
            return Ok(());
        };

        let counts = self.store.counts()?;
        let event = ProgressEvent {
            index: self.processed,
            current_page: current.clone(),
            categories: data.categories.clone(),
            children: data.links.iter().cloned().collect(),
            edges_added,
            frontier_size: self.store.frontier_size()?,
            visited_size: self.store.visited_size()?,
            node_count: counts.nodes,
            edge_count: counts.edges,
            most_relevant_pending_child: best_pending.map(|(_, page)| page),
        };

        // The consumer may be gone; the crawl does not care.
        let _ = sender.send(event);
        Ok(())
    }

    /// Exports the graph and assembles the termination payload
    fn finish(&mut self) -> Result<CrawlOutcome> {
        let export = export_graph(&self.store, &self.export_stem)?;

        let shortest_path = match (&self.phase, self.policy.target()) {
            (CrawlPhase::TargetFound, Some(target)) => Some(find_shortest_path(
                &export.edges,
                self.seed.as_str(),
                target.as_str(),
            )?),
            _ => None,
        };

        Ok(CrawlOutcome {
            phase: self.phase,
            pages_processed: self.processed,
            counts: self.store.counts()?,
            export,
            shortest_path,
        })
    }
}
