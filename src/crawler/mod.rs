//! Crawl orchestration
//!
//! This module contains the core crawl loop and its driving-process
//! contract:
//! - The [`Orchestrator`] state machine over a session store
//! - Plain (breadth-first) and directed (target-biased) policies
//! - [`CancellationToken`] polling and [`ProgressEvent`] emission

mod orchestrator;
mod progress;

pub use orchestrator::{CrawlOutcome, CrawlPhase, CrawlPolicy, Orchestrator};
pub use progress::{CancellationToken, ProgressEvent};

use crate::config::Config;
use crate::fetcher::WikipediaFetcher;
use crate::session::Session;
use crate::storage::SqliteStore;
use crate::Result;
use tokio::sync::mpsc::UnboundedSender;

/// Opens a session's store and runs a crawl against live Wikipedia
///
/// Convenience wiring for the CLI: creates the data directory, opens (or
/// resumes) the session database, builds the HTTP fetcher, and runs the
/// orchestrator to termination. The policy is directed when the session
/// has a target, plain otherwise.
pub async fn run_session(
    config: &Config,
    session: &Session,
    cancel: CancellationToken,
    progress: Option<UnboundedSender<ProgressEvent>>,
) -> Result<CrawlOutcome> {
    std::fs::create_dir_all(&config.output.data_dir)?;

    let store = SqliteStore::open(&session.database_path())?;
    let fetcher = WikipediaFetcher::new(&config.fetcher)?;

    let policy = match session.target() {
        Some(target) => CrawlPolicy::Directed {
            target: target.clone(),
            scorer: Box::new(crate::scorer::TokenOverlapScorer),
        },
        None => CrawlPolicy::Plain,
    };

    let mut orchestrator = Orchestrator::new(
        store,
        fetcher,
        session.seed().clone(),
        policy,
        config.crawl.page_budget,
        session.export_stem(),
    )?
    .with_cancellation(cancel);

    if let Some(sender) = progress {
        orchestrator = orchestrator.with_progress(sender);
    }

    orchestrator.run().await
}
