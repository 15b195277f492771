//! Database schema for one crawl session

/// SQL schema for a session database
///
/// The frontier's autoincrement id doubles as arrival order: FIFO dequeue
/// and priority tie-breaking both read it. Categories are stored as a JSON
/// array string so arbitrary category text survives export intact.
pub const SCHEMA_SQL: &str = r#"
-- Pages queued for a visit
CREATE TABLE IF NOT EXISTS frontier (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page TEXT NOT NULL UNIQUE,
    priority REAL NOT NULL DEFAULT 0,
    enqueued_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_frontier_priority ON frontier(priority);

-- Pages already processed; append-only
CREATE TABLE IF NOT EXISTS visited (
    page TEXT PRIMARY KEY,
    visited_at TEXT NOT NULL
);

-- Graph vertices: one row per crawled page
CREATE TABLE IF NOT EXISTS nodes (
    page TEXT PRIMARY KEY,
    categories TEXT NOT NULL
);

-- Directed arcs; no uniqueness constraint, targets may lack a node row
CREATE TABLE IF NOT EXISTS edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    origin TEXT NOT NULL,
    target TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_edges_origin ON edges(origin);
CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(target);
"#;

/// Initializes the session schema on a connection
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
