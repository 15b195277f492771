//! Wikigraph command-line interface

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikigraph::config::load_config_or_default;
use wikigraph::crawler::{run_session, CancellationToken, CrawlPhase};
use wikigraph::export::export_graph;
use wikigraph::page::PageId;
use wikigraph::path::find_shortest_path;
use wikigraph::session::Session;
use wikigraph::storage::{GraphStore, SqliteStore};

/// Wikigraph: an incremental Wikipedia link-graph crawler
///
/// Crawls outbound links between Wikipedia pages into a directed graph,
/// persisting state so a run can stop and resume, and answers
/// shortest-path queries over the exported graph.
#[derive(Parser, Debug)]
#[command(name = "wikigraph")]
#[command(version = "1.0.0")]
#[command(about = "Incremental Wikipedia link-graph crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from a seed page, optionally directed toward a target
    Crawl {
        /// Seed page: a Wikipedia URL or a bare title
        seed: String,

        /// Target page; enables the directed policy
        #[arg(short, long)]
        target: Option<String>,

        /// Page budget for this run (overrides the config file)
        #[arg(short, long)]
        budget: Option<u64>,

        /// Discard any persisted state for this session and start over
        #[arg(long)]
        fresh: bool,
    },

    /// Find the shortest path between two pages in an exported edge list
    Path {
        /// Path to an exported `*_edges.csv` file
        edges: PathBuf,

        /// Start page identifier
        start: String,

        /// Goal page identifier
        goal: String,
    },

    /// Export a session's graph to CSV without crawling
    Export {
        /// Seed page naming the session
        seed: String,

        /// Target page, if the session was directed
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Show store counts for an existing session
    Stats {
        /// Seed page naming the session
        seed: String,

        /// Target page, if the session was directed
        #[arg(short, long)]
        target: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Command::Crawl {
            seed,
            target,
            budget,
            fresh,
        } => {
            let mut config = config;
            if let Some(budget) = budget {
                config.crawl.page_budget = budget;
            }
            let session = build_session(&seed, target.as_deref(), &config.output.data_dir)?;
            handle_crawl(config, session, fresh).await
        }
        Command::Path { edges, start, goal } => handle_path(&edges, &start, &goal),
        Command::Export { seed, target } => {
            let session = build_session(&seed, target.as_deref(), &config.output.data_dir)?;
            handle_export(&session)
        }
        Command::Stats { seed, target } => {
            let session = build_session(&seed, target.as_deref(), &config.output.data_dir)?;
            handle_stats(&session)
        }
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikigraph=info,warn"),
            1 => EnvFilter::new("wikigraph=debug,info"),
            2 => EnvFilter::new("wikigraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Resolves seed/target arguments into a session key
fn build_session(seed: &str, target: Option<&str>, data_dir: &str) -> anyhow::Result<Session> {
    let seed = PageId::parse(seed).context("invalid seed page")?;
    let data_dir = Path::new(data_dir);

    match target {
        Some(t) => {
            let target = PageId::parse(t).context("invalid target page")?;
            Ok(Session::directed(seed, target, data_dir))
        }
        None => Ok(Session::plain(seed, data_dir)),
    }
}

/// Runs a crawl session on a worker task, draining progress events
async fn handle_crawl(
    config: wikigraph::Config,
    session: Session,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        let db = session.database_path();
        if db.exists() {
            std::fs::remove_file(&db)
                .with_context(|| format!("failed to remove {}", db.display()))?;
            tracing::info!("Removed previous session state at {}", db.display());
        }
    }

    let cancel = CancellationToken::new();
    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel();

    // Ctrl-C requests a stop at the next step boundary; the in-flight
    // fetch is allowed to finish.
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current page");
            ctrl_c_token.cancel();
        }
    });

    let worker = tokio::spawn(async move {
        run_session(&config, &session, cancel, Some(progress_tx)).await
    });

    while let Some(event) = progress_rx.recv().await {
        tracing::info!(
            "{}. {} ({} children, frontier {}, visited {}, {} nodes / {} edges)",
            event.index,
            event.current_page,
            event.children.len(),
            event.frontier_size,
            event.visited_size,
            event.node_count,
            event.edge_count
        );
        if let Some(best) = &event.most_relevant_pending_child {
            tracing::debug!("Most relevant pending child: {}", best);
        }
    }

    let outcome = worker.await.context("crawl worker panicked")??;

    tracing::info!(
        "Crawl ended in {:?}: {} pages processed, {} nodes, {} edges",
        outcome.phase,
        outcome.pages_processed,
        outcome.counts.nodes,
        outcome.counts.edges
    );
    println!("Exported nodes: {}", outcome.export.nodes.display());
    println!("Exported edges: {}", outcome.export.edges.display());

    if outcome.phase == CrawlPhase::TargetFound {
        if let Some(result) = &outcome.shortest_path {
            print_path_result(result);
        }
    }

    Ok(())
}

/// Answers a shortest-path query over an exported edge list
fn handle_path(edges: &Path, start: &str, goal: &str) -> anyhow::Result<()> {
    let start = PageId::parse(start).context("invalid start page")?;
    let goal = PageId::parse(goal).context("invalid goal page")?;

    let result = find_shortest_path(edges, start.as_str(), goal.as_str())?;
    print_path_result(&result);

    Ok(())
}

fn print_path_result(result: &wikigraph::PathResult) {
    if result.is_reachable() {
        println!("Shortest path (cost {}):", result.cost);
        println!("  {}", result.pages.join(" -> "));
    } else {
        println!("No path found");
    }
}

/// Exports an existing session's graph without crawling
fn handle_export(session: &Session) -> anyhow::Result<()> {
    let store = SqliteStore::open(&session.database_path())?;
    let paths = export_graph(&store, &session.export_stem())?;

    println!("Exported nodes: {}", paths.nodes.display());
    println!("Exported edges: {}", paths.edges.display());

    Ok(())
}

/// Prints store counts for an existing session
fn handle_stats(session: &Session) -> anyhow::Result<()> {
    let store = SqliteStore::open(&session.database_path())?;
    let counts = store.counts()?;

    println!("Session: {}", session.slug());
    println!("  Frontier: {}", store.frontier_size()?);
    println!("  Visited:  {}", store.visited_size()?);
    println!("  Nodes:    {}", counts.nodes);
    println!("  Edges:    {}", counts.edges);

    Ok(())
}
