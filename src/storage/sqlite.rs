//! SQLite implementation of the graph store

use crate::page::PageId;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{GraphStore, StoreError, StoreResult};
use crate::storage::{DequeueOrder, EdgeRecord, GraphCounts, NodeRecord};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::Path;

/// SQLite-backed session store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates a session database at the given path
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or the schema
    /// cannot be initialized; this is the fatal, session-cannot-continue
    /// case.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory session store, used by tests
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn decode_categories(raw: &str) -> StoreResult<BTreeSet<String>> {
        serde_json::from_str(raw).map_err(|e| StoreError::CorruptRow {
            table: "nodes",
            message: format!("bad categories JSON: {}", e),
        })
    }
}

impl GraphStore for SqliteStore {
    fn enqueue(&mut self, page: &PageId, priority: f64) -> StoreResult<bool> {
        let now = Utc::now().to_rfc3339();

        // Single statement keeps the visited check atomic with the insert;
        // the UNIQUE constraint on page absorbs duplicate frontier entries.
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO frontier (page, priority, enqueued_at)
             SELECT ?1, ?2, ?3
             WHERE NOT EXISTS (SELECT 1 FROM visited WHERE page = ?1)",
            params![page.as_str(), priority, now],
        )?;

        Ok(changed == 1)
    }

    fn dequeue(&mut self, order: DequeueOrder) -> StoreResult<Option<PageId>> {
        let tx = self.conn.transaction()?;

        let selected: Option<(i64, String)> = tx
            .query_row(
                &format!(
                    "SELECT id, page FROM frontier ORDER BY {} LIMIT 1",
                    order.sql_order()
                ),
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (id, page) = match selected {
            Some(row) => row,
            None => return Ok(None),
        };

        tx.execute("DELETE FROM frontier WHERE id = ?1", params![id])?;
        tx.execute(
            "INSERT INTO visited (page, visited_at) VALUES (?1, ?2)",
            params![page, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        Ok(Some(PageId::from_normalized(page)))
    }

    fn frontier_size(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM frontier", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn is_visited(&self, page: &PageId) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM visited WHERE page = ?1 LIMIT 1",
                params![page.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn visited_size(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM visited", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn add_node(&mut self, page: &PageId, categories: &BTreeSet<String>) -> StoreResult<bool> {
        // BTreeSet serializes in sorted order, so identical category sets
        // always produce identical rows.
        let encoded = serde_json::to_string(categories).map_err(|e| StoreError::CorruptRow {
            table: "nodes",
            message: format!("failed to encode categories: {}", e),
        })?;

        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO nodes (page, categories) VALUES (?1, ?2)",
            params![page.as_str(), encoded],
        )?;

        Ok(changed == 1)
    }

    fn add_edge(&mut self, origin: &PageId, target: &PageId) -> StoreResult<bool> {
        self.conn.execute(
            "INSERT INTO edges (origin, target) VALUES (?1, ?2)",
            params![origin.as_str(), target.as_str()],
        )?;
        Ok(true)
    }

    fn all_nodes(&self) -> StoreResult<Vec<NodeRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT page, categories FROM nodes ORDER BY page")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut nodes = Vec::new();
        for row in rows {
            let (page, raw) = row?;
            nodes.push(NodeRecord {
                page: PageId::from_normalized(page),
                categories: Self::decode_categories(&raw)?,
            });
        }

        Ok(nodes)
    }

    fn all_edges(&self) -> StoreResult<Vec<EdgeRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT origin, target FROM edges ORDER BY origin, target")?;

        let edges = stmt
            .query_map([], |row| {
                Ok(EdgeRecord {
                    origin: PageId::from_normalized(row.get(0)?),
                    target: PageId::from_normalized(row.get(1)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }

    fn counts(&self) -> StoreResult<GraphCounts> {
        let nodes: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        let edges: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;

        Ok(GraphCounts {
            nodes: nodes as u64,
            edges: edges as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(s: &str) -> PageId {
        PageId::parse(s).unwrap()
    }

    #[test]
    fn test_enqueue_then_dequeue() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        assert!(store.enqueue(&page("a"), 0.0).unwrap());
        assert_eq!(store.dequeue(DequeueOrder::Fifo).unwrap(), Some(page("a")));
    }

    #[test]
    fn test_dequeue_empty_returns_none() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.dequeue(DequeueOrder::Fifo).unwrap(), None);
        assert_eq!(store.visited_size().unwrap(), 0);
    }

    #[test]
    fn test_fifo_order_is_arrival_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        for p in ["first", "second", "third"] {
            assert!(store.enqueue(&page(p), 0.0).unwrap());
        }

        assert_eq!(store.dequeue(DequeueOrder::Fifo).unwrap(), Some(page("first")));
        assert_eq!(store.dequeue(DequeueOrder::Fifo).unwrap(), Some(page("second")));
        assert_eq!(store.dequeue(DequeueOrder::Fifo).unwrap(), Some(page("third")));
    }

    #[test]
    fn test_lowest_priority_first() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.enqueue(&page("far"), 0.9).unwrap();
        store.enqueue(&page("near"), 0.1).unwrap();
        store.enqueue(&page("mid"), 0.5).unwrap();

        let order = DequeueOrder::LowestPriorityFirst;
        assert_eq!(store.dequeue(order).unwrap(), Some(page("near")));
        assert_eq!(store.dequeue(order).unwrap(), Some(page("mid")));
        assert_eq!(store.dequeue(order).unwrap(), Some(page("far")));
    }

    #[test]
    fn test_priority_ties_break_by_arrival() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.enqueue(&page("older"), 0.5).unwrap();
        store.enqueue(&page("newer"), 0.5).unwrap();

        assert_eq!(
            store.dequeue(DequeueOrder::LowestPriorityFirst).unwrap(),
            Some(page("older"))
        );
    }

    #[test]
    fn test_duplicate_enqueue_rejected() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        assert!(store.enqueue(&page("a"), 0.0).unwrap());
        assert!(!store.enqueue(&page("a"), 0.0).unwrap());
        assert_eq!(store.frontier_size().unwrap(), 1);
    }

    #[test]
    fn test_visited_page_never_requeued() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.enqueue(&page("a"), 0.0).unwrap();
        store.dequeue(DequeueOrder::Fifo).unwrap();

        assert!(store.is_visited(&page("a")).unwrap());
        assert!(!store.enqueue(&page("a"), 0.0).unwrap());
        assert_eq!(store.frontier_size().unwrap(), 0);
    }

    #[test]
    fn test_page_in_exactly_one_of_frontier_or_visited() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.enqueue(&page("a"), 0.0).unwrap();
        assert_eq!(store.frontier_size().unwrap(), 1);
        assert!(!store.is_visited(&page("a")).unwrap());

        store.dequeue(DequeueOrder::Fifo).unwrap();
        assert_eq!(store.frontier_size().unwrap(), 0);
        assert!(store.is_visited(&page("a")).unwrap());
    }

    #[test]
    fn test_add_node_first_write_wins() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let original: BTreeSet<String> = ["Video games".to_string()].into_iter().collect();
        let other: BTreeSet<String> = ["Different".to_string()].into_iter().collect();

        assert!(store.add_node(&page("a"), &original).unwrap());
        assert!(!store.add_node(&page("a"), &other).unwrap());

        let nodes = store.all_nodes().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].categories, original);
    }

    #[test]
    fn test_duplicate_edges_tolerated() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        assert!(store.add_edge(&page("a"), &page("b")).unwrap());
        assert!(store.add_edge(&page("a"), &page("b")).unwrap());

        assert_eq!(store.counts().unwrap().edges, 2);
    }

    #[test]
    fn test_edge_target_without_node_allowed() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.add_node(&page("a"), &BTreeSet::new()).unwrap();
        store.add_edge(&page("a"), &page("never_visited")).unwrap();

        assert_eq!(store.counts().unwrap(), GraphCounts { nodes: 1, edges: 1 });
    }

    #[test]
    fn test_all_edges_deterministic_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.add_edge(&page("b"), &page("z")).unwrap();
        store.add_edge(&page("a"), &page("y")).unwrap();
        store.add_edge(&page("a"), &page("x")).unwrap();

        let edges = store.all_edges().unwrap();
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.origin.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "x"), ("a", "y"), ("b", "z")]);
    }

    #[test]
    fn test_categories_with_commas_and_unicode_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let cats: BTreeSet<String> = [
            "Cities, towns and villages".to_string(),
            "Sagas islandaises médiévales".to_string(),
        ]
        .into_iter()
        .collect();

        store.add_node(&page("a"), &cats).unwrap();
        assert_eq!(store.all_nodes().unwrap()[0].categories, cats);
    }
}
