use crate::db::Database;
use crate::error::{GraphError, Result};
use crate::graph::{self, BfsForest, Coverage, DfsForest, Graph};
use crate::models::TopologicalOrder;
use std::path::Path;

/// Config key holding the default start node
const ROOT_KEY: &str = "root";

/// Stored graph plus the traversals that run over it
pub struct GraphWorkspace {
    db: Database,
}

impl GraphWorkspace {
    /// Open the database at `path`
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::open(path)?;
        Ok(GraphWorkspace { db })
    }

    pub fn is_initialized(&self) -> Result<bool> {
        self.db.is_initialized()
    }

    pub fn init(&self) -> Result<()> {
        self.db.init()
    }

    // ==================== Graph Editing ====================

    pub fn add_node(&self, name: &str) -> Result<()> {
        self.db.add_node(name)
    }

    pub fn add_edge(&self, from: &str, to: &str) -> Result<()> {
        self.db.add_edge(from, to)
    }

    pub fn graph(&self) -> Result<Graph> {
        self.db.load_graph()
    }

    /// Remove all nodes and edges, and the root that pointed into them
    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        self.db.delete_config(ROOT_KEY)
    }

    /// Replace the stored graph with the bundled sample graph
    pub fn load_sample(&mut self) -> Result<Graph> {
        let sample = Graph::sample()?;
        self.db.replace_graph(&sample)?;
        self.db.delete_config(ROOT_KEY)?;
        Ok(sample)
    }

    // ==================== Root ====================

    pub fn set_root(&self, name: &str) -> Result<()> {
        let name = graph::node_name(name)?;
        if !self.db.node_exists(name)? {
            return Err(GraphError::NodeNotFound(name.to_string()));
        }
        self.db.set_config(ROOT_KEY, name)
    }

    pub fn get_root(&self) -> Result<Option<String>> {
        self.db.get_config(ROOT_KEY)
    }

    /// The explicit start node, or the stored root
    fn resolve_start(&self, start: Option<&str>) -> Result<String> {
        match start {
            Some(start) => Ok(graph::node_name(start)?.to_string()),
            None => self.get_root()?.ok_or(GraphError::NoStartNode),
        }
    }

    // ==================== Traversals ====================

    pub fn dfs(&self, start: Option<&str>, coverage: Coverage) -> Result<DfsForest> {
        let start = self.resolve_start(start)?;
        graph::depth_first(&self.graph()?, &start, coverage)
    }

    pub fn bfs(&self, start: Option<&str>) -> Result<BfsForest> {
        let start = self.resolve_start(start)?;
        graph::breadth_first(&self.graph()?, &start)
    }

    /// Topological order by decreasing finishing time
    pub fn topo(&self, start: Option<&str>, coverage: Coverage) -> Result<TopologicalOrder> {
        let forest = self.dfs(start, coverage)?;
        Ok(graph::topological_sort(&forest))
    }
}
