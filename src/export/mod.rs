//! CSV export of the captured graph
//!
//! Two flat tables: `<stem>_nodes.csv` with header `page_name,categories`
//! and `<stem>_edges.csv` with header `Source,Target`. These files feed the
//! shortest-path finder and external analytics tooling, so the column names
//! and quoting are compatibility-bearing: category text with commas or
//! non-ASCII must survive a round trip bit-exact.

use crate::storage::{EdgeRecord, GraphStore, NodeRecord};
use crate::page::PageId;
use crate::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Locations of one export's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

/// Snapshots the store's node and edge tables to CSV
///
/// Reads only; safe to call while a crawl is in progress. Rows come out in
/// the store's deterministic order, so identical graph content produces
/// identical files. Categories are written as a JSON array string inside a
/// single CSV field; the csv crate's quoting handles the rest.
pub fn export_graph<S: GraphStore>(store: &S, stem: &Path) -> Result<ExportPaths> {
    let paths = export_paths(stem);

    let mut nodes_writer = csv::Writer::from_path(&paths.nodes)?;
    nodes_writer.write_record(["page_name", "categories"])?;
    for node in store.all_nodes()? {
        let categories = serde_json::to_string(&node.categories)
            .unwrap_or_else(|_| "[]".to_string());
        nodes_writer.write_record([node.page.as_str(), &categories])?;
    }
    nodes_writer.flush()?;

    let mut edges_writer = csv::Writer::from_path(&paths.edges)?;
    edges_writer.write_record(["Source", "Target"])?;
    for edge in store.all_edges()? {
        edges_writer.write_record([edge.origin.as_str(), edge.target.as_str()])?;
    }
    edges_writer.flush()?;

    tracing::info!(
        "Exported graph to {} and {}",
        paths.nodes.display(),
        paths.edges.display()
    );

    Ok(paths)
}

/// Artifact paths for a given export stem
pub fn export_paths(stem: &Path) -> ExportPaths {
    let stem_str = stem.to_string_lossy();
    ExportPaths {
        nodes: PathBuf::from(format!("{}_nodes.csv", stem_str)),
        edges: PathBuf::from(format!("{}_edges.csv", stem_str)),
    }
}

/// Reads a node table back into records
///
/// Used for round-trip verification and by consumers that want the node
/// set rather than the edge list.
pub fn read_node_table(path: &Path) -> Result<Vec<NodeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut nodes = Vec::new();

    for record in reader.records() {
        let record = record?;
        let page = record.get(0).unwrap_or("").to_string();
        let categories: BTreeSet<String> = record
            .get(1)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        nodes.push(NodeRecord {
            page: PageId::parse(&page)?,
            categories,
        });
    }

    Ok(nodes)
}

/// Reads an edge table back into records
pub fn read_edge_table(path: &Path) -> Result<Vec<EdgeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut edges = Vec::new();

    for record in reader.records() {
        let record = record?;
        let origin = record.get(0).unwrap_or("");
        let target = record.get(1).unwrap_or("");
        edges.push(EdgeRecord {
            origin: PageId::parse(origin)?,
            target: PageId::parse(target)?,
        });
    }

    Ok(edges)
}
