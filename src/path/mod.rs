//! Shortest-path queries over an exported edge list
//!
//! Loads the `Source,Target[,Weight]` table the exporter produces and runs
//! an A* search (zero heuristic by default, which reduces to Dijkstra).
//! Edges are directed: a row contributes `Source -> Target` only.

use crate::Result;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::path::Path;

/// Adjacency view of a directed, weighted edge list
pub type EdgeGraph = HashMap<String, Vec<(String, f64)>>;

/// Outcome of a shortest-path query
///
/// "No path" is a normal result value, not an error: `cost` is infinite and
/// `pages` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Total path cost; `f64::INFINITY` when the goal is unreachable
    pub cost: f64,
    /// Page sequence from start to goal inclusive; empty when unreachable
    pub pages: Vec<String>,
}

impl PathResult {
    /// The sentinel for an unreachable goal
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            pages: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Loads a directed edge list from a CSV file
///
/// Expects the exporter's `Source,Target` header; a `Weight` column is
/// optional and defaults to 1.0 per edge.
pub fn read_edge_list(path: &Path) -> Result<EdgeGraph> {
    let mut reader = csv::Reader::from_path(path)?;

    let weight_column = reader
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("weight"));

    let mut graph = EdgeGraph::new();
    for record in reader.records() {
        let record = record?;
        let source = match record.get(0) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => continue,
        };
        let target = match record.get(1) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => continue,
        };
        let weight = weight_column
            .and_then(|i| record.get(i))
            .and_then(|w| w.parse::<f64>().ok())
            .unwrap_or(1.0);

        graph.entry(source).or_default().push((target, weight));
    }

    Ok(graph)
}

// Min-heap entry: lowest f-cost pops first, FIFO among equals.
struct SearchEntry {
    f_cost: f64,
    seq: u64,
    node: String,
}

impl PartialEq for SearchEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for SearchEntry {}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap behaves as a min-heap; earlier insertions
        // win ties.
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes a least-cost path between two page identifiers
///
/// A* over the directed graph: the frontier is ordered by
/// `g_cost + heuristic(node)`. With no heuristic this is Dijkstra. The
/// search exits early when the goal is popped.
pub fn shortest_path(
    graph: &EdgeGraph,
    start: &str,
    goal: &str,
    heuristic: Option<&dyn Fn(&str) -> f64>,
) -> PathResult {
    let mut frontier = BinaryHeap::new();
    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut parent: HashMap<String, Option<String>> = HashMap::new();
    let mut seq: u64 = 0;

    dist.insert(start.to_string(), 0.0);
    parent.insert(start.to_string(), None);
    frontier.push(SearchEntry {
        f_cost: 0.0,
        seq,
        node: start.to_string(),
    });

    while let Some(SearchEntry { node, .. }) = frontier.pop() {
        if node == goal {
            break;
        }

        let current_dist = dist.get(&node).copied().unwrap_or(f64::INFINITY);

        let Some(neighbors) = graph.get(&node) else {
            continue;
        };

        for (neighbor, weight) in neighbors {
            let g_cost = current_dist + weight;
            if g_cost < dist.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                dist.insert(neighbor.clone(), g_cost);
                parent.insert(neighbor.clone(), Some(node.clone()));

                let f_cost = g_cost + heuristic.map_or(0.0, |h| h(neighbor));
                seq += 1;
                frontier.push(SearchEntry {
                    f_cost,
                    seq,
                    node: neighbor.clone(),
                });
            }
        }
    }

    if !parent.contains_key(goal) {
        return PathResult::unreachable();
    }

    let mut pages = Vec::new();
    let mut cursor = Some(goal.to_string());
    while let Some(node) = cursor {
        cursor = parent.get(&node).cloned().flatten();
        pages.push(node);
    }
    pages.reverse();

    PathResult {
        cost: dist.get(goal).copied().unwrap_or(f64::INFINITY),
        pages,
    }
}

/// Convenience wrapper: load an edge-list CSV and query it
pub fn find_shortest_path(edges_csv: &Path, start: &str, goal: &str) -> Result<PathResult> {
    let graph = read_edge_list(edges_csv)?;
    Ok(shortest_path(&graph, start, goal, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(edges: &[(&str, &str, f64)]) -> EdgeGraph {
        let mut graph = EdgeGraph::new();
        for (u, v, w) in edges {
            graph
                .entry(u.to_string())
                .or_default()
                .push((v.to_string(), *w));
        }
        graph
    }

    #[test]
    fn test_prefers_cheaper_multi_hop_route() {
        let graph = graph_from(&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);

        let result = shortest_path(&graph, "A", "C", None);
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.pages, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unreachable_goal_returns_sentinel() {
        let graph = graph_from(&[("A", "B", 1.0)]);

        let result = shortest_path(&graph, "A", "Z", None);
        assert_eq!(result, PathResult::unreachable());
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_edges_are_directed() {
        let graph = graph_from(&[("A", "B", 1.0)]);
        assert!(!shortest_path(&graph, "B", "A", None).is_reachable());
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = graph_from(&[("A", "B", 1.0)]);

        let result = shortest_path(&graph, "A", "A", None);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.pages, vec!["A"]);
    }

    #[test]
    fn test_heuristic_reduces_to_dijkstra_when_zero() {
        let graph = graph_from(&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);

        let zero = |_: &str| 0.0;
        let with_heuristic = shortest_path(&graph, "A", "C", Some(&zero));
        let without = shortest_path(&graph, "A", "C", None);
        assert_eq!(with_heuristic, without);
    }

    #[test]
    fn test_read_edge_list_default_weight() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        std::fs::write(&path, "Source,Target\nA,B\nA,C\n").unwrap();

        let graph = read_edge_list(&path).unwrap();
        assert_eq!(graph["A"], vec![("B".to_string(), 1.0), ("C".to_string(), 1.0)]);
    }

    #[test]
    fn test_read_edge_list_weighted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        std::fs::write(&path, "Source,Target,Weight\nA,B,2.5\n").unwrap();

        let graph = read_edge_list(&path).unwrap();
        assert_eq!(graph["A"], vec![("B".to_string(), 2.5)]);
    }

    #[test]
    fn test_query_over_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        std::fs::write(&path, "Source,Target\nA,B\nB,C\nA,C\n").unwrap();

        let result = find_shortest_path(&path, "A", "C").unwrap();
        assert_eq!(result.cost, 1.0);
        assert_eq!(result.pages, vec!["A", "C"]);
    }
}
