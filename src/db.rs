use crate::error::{GraphError, Result};
use crate::graph::{Graph, node_name};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// Database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database connection
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable foreign keys
        conn.pragma_update(None, "foreign_keys", "ON")?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Database { conn })
    }

    /// Initialize the database schema
    pub fn init(&self) -> Result<()> {
        self.create_tables()?;
        self.create_indexes()?;
        Ok(())
    }

    fn create_tables(&self) -> Result<()> {
        // Declaration order is the id order
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS nodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        // Successor order is the id order
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS edges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
                target INTEGER NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
                UNIQUE (source, target)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn create_indexes(&self) -> Result<()> {
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_edges_source ON edges(source)",
            [],
        )?;
        Ok(())
    }

    /// Check if database is initialized
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='nodes'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ==================== Node Operations ====================

    pub fn add_node(&self, name: &str) -> Result<()> {
        let name = node_name(name)?;
        if self.node_id(name)?.is_some() {
            return Err(GraphError::NodeAlreadyExists(name.to_string()));
        }
        self.conn.execute("INSERT INTO nodes (name) VALUES (?1)", [name])?;
        debug!(node = name, "Stored node");
        Ok(())
    }

    pub fn node_exists(&self, name: &str) -> Result<bool> {
        Ok(self.node_id(name)?.is_some())
    }

    fn node_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM nodes WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| e.into())
    }

    // ==================== Edge Operations ====================

    pub fn add_edge(&self, from: &str, to: &str) -> Result<()> {
        let (from, to) = (node_name(from)?, node_name(to)?);
        let source = self
            .node_id(from)?
            .ok_or_else(|| GraphError::NodeNotFound(from.to_string()))?;
        let target = self
            .node_id(to)?
            .ok_or_else(|| GraphError::NodeNotFound(to.to_string()))?;

        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM edges WHERE source = ?1 AND target = ?2",
                (source, target),
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(GraphError::EdgeAlreadyExists {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO edges (source, target) VALUES (?1, ?2)",
            (source, target),
        )?;
        debug!(from, to, "Stored edge");
        Ok(())
    }

    // ==================== Whole-graph Operations ====================

    /// Rebuild the stored graph, preserving declaration and successor order
    pub fn load_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();

        let mut stmt = self.conn.prepare("SELECT name FROM nodes ORDER BY id")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for name in names {
            graph.try_add_node(&name?)?;
        }

        let mut stmt = self.conn.prepare(
            "SELECT s.name, t.name
             FROM edges e
             JOIN nodes s ON s.id = e.source
             JOIN nodes t ON t.id = e.target
             ORDER BY e.id",
        )?;
        let edges = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for edge in edges {
            let (from, to) = edge?;
            graph.try_add_edge(&from, &to)?;
        }

        Ok(graph)
    }

    /// Remove every node and edge. Config is kept.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM edges", [])?;
        self.conn.execute("DELETE FROM nodes", [])?;
        Ok(())
    }

    /// Replace the stored graph with `graph` in one transaction
    pub fn replace_graph(&mut self, graph: &Graph) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM edges", [])?;
        tx.execute("DELETE FROM nodes", [])?;
        {
            let mut insert_node = tx.prepare("INSERT INTO nodes (name) VALUES (?1)")?;
            for name in graph.nodes() {
                insert_node.execute([name])?;
            }

            let mut insert_edge = tx.prepare(
                "INSERT INTO edges (source, target)
                 SELECT s.id, t.id FROM nodes s, nodes t
                 WHERE s.name = ?1 AND t.name = ?2",
            )?;
            for (from, to) in graph.edges() {
                insert_edge.execute([from, to])?;
            }
        }
        tx.commit()?;
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "Replaced stored graph"
        );
        Ok(())
    }

    // ==================== Config Operations ====================

    pub fn get_config(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| e.into())
    }

    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    pub fn delete_config(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }
}
