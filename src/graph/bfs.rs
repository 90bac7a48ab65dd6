//! Breadth-first search producing shortest-path layers for every component.

use super::Graph;
use crate::error::{GraphError, Result};
use crate::models::{NodeLayer, TreeEdge};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Result of a breadth-first search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BfsForest {
    /// Root of each BFS tree, starting with the requested start node
    pub roots: Vec<String>,
    /// Distance and parent of every node, in graph declaration order
    pub layers: Vec<NodeLayer>,
    /// Edges used to reach each node, in the order they were taken
    pub tree_edges: Vec<TreeEdge>,
}

impl BfsForest {
    /// Edge count from the root of the node's component
    pub fn distance(&self, node: &str) -> Option<u32> {
        self.layer(node).and_then(|l| l.distance)
    }

    pub fn parent(&self, node: &str) -> Option<&str> {
        self.layer(node).and_then(|l| l.parent.as_deref())
    }

    /// Nodes grouped by distance, each group in declaration order
    pub fn levels(&self) -> Vec<Vec<&str>> {
        let mut levels: Vec<Vec<&str>> = Vec::new();
        for layer in &self.layers {
            let Some(distance) = layer.distance else {
                continue;
            };
            let distance = distance as usize;
            if levels.len() <= distance {
                levels.resize_with(distance + 1, Vec::new);
            }
            levels[distance].push(&layer.node);
        }
        levels
    }

    fn layer(&self, node: &str) -> Option<&NodeLayer> {
        self.layers.iter().find(|l| l.node == node)
    }
}

struct BfsContext<'g> {
    graph: &'g Graph,
    distance: Vec<Option<u32>>,
    parent: Vec<Option<usize>>,
    tree_edges: Vec<(usize, usize)>,
}

impl<'g> BfsContext<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            distance: vec![None; graph.len()],
            parent: vec![None; graph.len()],
            tree_edges: Vec::new(),
        }
    }

    fn is_visited(&self, node: usize) -> bool {
        self.distance[node].is_some()
    }

    /// Explore the component of `root`, which starts at distance zero
    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        let mut queue = VecDeque::new();
        self.distance[root] = Some(0);
        queue.push_back((root, 0));

        while let Some((current, distance)) = queue.pop_front() {
            for &next in graph.successor_indices(current) {
                if self.is_visited(next) {
                    continue;
                }
                self.distance[next] = Some(distance + 1);
                self.parent[next] = Some(current);
                self.tree_edges.push((current, next));
                debug!(
                    node = graph.name(next),
                    parent = graph.name(current),
                    distance = distance + 1,
                    "Reached node"
                );
                queue.push_back((next, distance + 1));
            }
        }
    }

    fn into_forest(self, roots: Vec<usize>) -> BfsForest {
        let graph = self.graph;
        let name = |node: usize| graph.name(node).to_string();

        BfsForest {
            roots: roots.into_iter().map(name).collect(),
            layers: (0..graph.len())
                .map(|node| NodeLayer {
                    node: name(node),
                    distance: self.distance[node],
                    parent: self.parent[node].map(name),
                })
                .collect(),
            tree_edges: self
                .tree_edges
                .iter()
                .map(|&(parent, child)| TreeEdge {
                    parent: name(parent),
                    child: name(child),
                })
                .collect(),
        }
    }
}

/// Run a breadth-first search from `start`, then from every node left
/// unvisited, in declaration order. Each later root starts its own layering
/// at distance zero.
pub fn breadth_first(graph: &Graph, start: &str) -> Result<BfsForest> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    let start = graph
        .index_of(start)
        .ok_or_else(|| GraphError::InvalidStartNode(start.to_string()))?;

    let mut ctx = BfsContext::new(graph);
    let mut roots = vec![start];
    ctx.visit(start);

    for node in 0..graph.len() {
        if !ctx.is_visited(node) {
            debug!(root = graph.name(node), "Starting new BFS tree");
            roots.push(node);
            ctx.visit(node);
        }
    }

    Ok(ctx.into_forest(roots))
}
