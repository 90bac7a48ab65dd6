//! Directed adjacency-list graph and the traversal engine that runs over it.
//!
//! The engine only ever borrows a [`Graph`]; every traversal returns an owned
//! result and leaves the graph untouched.

pub mod bfs;
pub mod dfs;
pub mod topo;

pub use bfs::{BfsForest, breadth_first};
pub use dfs::{Coverage, DfsForest, depth_first};
pub use topo::{topological_order, topological_sort, topological_times};

use crate::error::{GraphError, Result};
use std::collections::HashMap;

const SAMPLE: [(&str, &[&str]); 10] = [
    ("a", &["b", "d", "e"]),
    ("b", &["c", "d"]),
    ("c", &["g", "h"]),
    ("d", &["f"]),
    ("e", &["d", "f"]),
    ("f", &["j"]),
    ("g", &[]),
    ("h", &["g"]),
    ("i", &["g", "h"]),
    ("j", &[]),
];

/// Trimmed node name, rejecting names that are blank
pub(crate) fn node_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GraphError::EmptyNodeName);
    }
    Ok(name)
}

/// A directed graph with string labels.
///
/// Nodes keep their declaration order and each node keeps its successors in
/// edge-addition order. Both orders drive traversal order, so they are part
/// of the graph's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(node, successors)` pairs.
    ///
    /// Every node is declared first, in list order, so successors may refer to
    /// nodes that appear later in the list.
    pub fn from_adjacency(list: &[(&str, &[&str])]) -> Result<Self> {
        let mut graph = Graph::new();
        for (name, _) in list {
            graph.try_add_node(name)?;
        }
        for (name, successors) in list {
            for successor in *successors {
                graph.try_add_edge(name, successor)?;
            }
        }
        Ok(graph)
    }

    /// The ten-node graph used in the classroom exercise.
    pub fn sample() -> Result<Self> {
        Self::from_adjacency(&SAMPLE)
    }

    /// Declare a node. Returns false if it already exists or the name is
    /// blank. Surrounding whitespace is dropped.
    pub fn add_node(&mut self, name: &str) -> bool {
        self.try_add_node(name).is_ok()
    }

    pub fn try_add_node(&mut self, name: &str) -> Result<()> {
        let name = node_name(name)?;
        if self.index.contains_key(name) {
            return Err(GraphError::NodeAlreadyExists(name.to_string()));
        }
        self.index.insert(name.to_string(), self.names.len());
        self.names.push(name.to_string());
        self.successors.push(Vec::new());
        Ok(())
    }

    /// Add a directed edge. Returns false if an endpoint is undeclared or the
    /// edge already exists.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.try_add_edge(from, to).is_ok()
    }

    pub fn try_add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        let (from, to) = (node_name(from)?, node_name(to)?);
        let source = self
            .index_of(from)
            .ok_or_else(|| GraphError::NodeNotFound(from.to_string()))?;
        let target = self
            .index_of(to)
            .ok_or_else(|| GraphError::NodeNotFound(to.to_string()))?;

        if self.successors[source].contains(&target) {
            return Err(GraphError::EdgeAlreadyExists {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.successors[source].push(target);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Successors of `name` in edge-addition order, or `None` for an unknown
    /// node.
    pub fn successors(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let node = self.index_of(name)?;
        Some(
            self.successors[node]
                .iter()
                .map(|&succ| self.names[succ].as_str()),
        )
    }

    /// All edges, grouped by source in declaration order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.successors.iter().enumerate().flat_map(move |(source, succs)| {
            succs
                .iter()
                .map(move |&target| (self.names[source].as_str(), self.names[target].as_str()))
        })
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.index.clear();
        self.successors.clear();
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn name(&self, node: usize) -> &str {
        &self.names[node]
    }

    pub(crate) fn successor_indices(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }
}
