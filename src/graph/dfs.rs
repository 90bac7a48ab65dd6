//! Depth-first search with discovery/finishing times and edge classification.
//!
//! The search is iterative: each stack frame remembers how far it has walked
//! its successor list, so arbitrarily deep graphs cannot exhaust the call
//! stack. Classification matches the textbook recursive formulation exactly.

use super::Graph;
use crate::error::{GraphError, Result};
use crate::models::{ClassifiedEdge, EdgeKind, NodeTimes};
use serde::Serialize;
use tracing::{debug, trace};

/// Clock value of a node that has not been stamped yet. Real times start at 1.
const UNSTAMPED: u32 = 0;

/// How much of the graph a depth-first search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coverage {
    /// Only nodes reachable from the start node
    Reachable,
    /// Restart from every undiscovered node in declaration order
    #[default]
    Forest,
}

/// Result of a depth-first search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfsForest {
    /// Root of each DFS tree, in the order the trees were grown
    pub roots: Vec<String>,
    /// Times of every visited node, in graph declaration order
    pub times: Vec<NodeTimes>,
    /// Every edge met during the search, in the order it was classified
    pub edges: Vec<ClassifiedEdge>,
}

impl DfsForest {
    pub fn discovery(&self, node: &str) -> Option<u32> {
        self.node_times(node).map(|t| t.discovery)
    }

    pub fn finishing(&self, node: &str) -> Option<u32> {
        self.node_times(node).map(|t| t.finishing)
    }

    pub fn classification(&self, source: &str, target: &str) -> Option<EdgeKind> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
            .map(|e| e.kind)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &ClassifiedEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn tree_edges(&self) -> impl Iterator<Item = &ClassifiedEdge> {
        self.edges_of_kind(EdgeKind::Tree)
    }

    /// A back edge means the graph has a cycle
    pub fn has_back_edge(&self) -> bool {
        self.edges.iter().any(|e| e.kind == EdgeKind::Back)
    }

    fn node_times(&self, node: &str) -> Option<&NodeTimes> {
        self.times.iter().find(|t| t.node == node)
    }
}

/// A node on the DFS stack and its position in its successor list
struct Frame {
    node: usize,
    cursor: usize,
}

/// Mutable state shared by every tree of one search
struct DfsContext<'g> {
    graph: &'g Graph,
    clock: u32,
    discovery: Vec<u32>,
    finishing: Vec<u32>,
    edges: Vec<ClassifiedEdge>,
}

impl<'g> DfsContext<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            clock: 0,
            discovery: vec![UNSTAMPED; graph.len()],
            finishing: vec![UNSTAMPED; graph.len()],
            edges: Vec::new(),
        }
    }

    fn is_discovered(&self, node: usize) -> bool {
        self.discovery[node] != UNSTAMPED
    }

    /// Grow one DFS tree from `root`
    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        self.discover(root);
        let mut stack = vec![Frame {
            node: root,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(&next) = graph.successor_indices(node).get(frame.cursor) else {
                stack.pop();
                self.finish(node);
                continue;
            };
            frame.cursor += 1;

            let kind = self.classify(node, next);
            trace!(
                source = graph.name(node),
                target = graph.name(next),
                kind = %kind,
                "Classified edge"
            );
            self.edges.push(ClassifiedEdge {
                source: graph.name(node).to_string(),
                target: graph.name(next).to_string(),
                kind,
            });

            if kind == EdgeKind::Tree {
                self.discover(next);
                stack.push(Frame {
                    node: next,
                    cursor: 0,
                });
            }
        }
    }

    fn classify(&self, node: usize, next: usize) -> EdgeKind {
        if !self.is_discovered(next) {
            EdgeKind::Tree
        } else if self.finishing[next] == UNSTAMPED {
            EdgeKind::Back
        } else if self.discovery[next] > self.discovery[node] {
            EdgeKind::Forward
        } else {
            EdgeKind::Cross
        }
    }

    fn discover(&mut self, node: usize) {
        self.clock += 1;
        self.discovery[node] = self.clock;
        debug!(node = self.graph.name(node), time = self.clock, "Discovered node");
    }

    fn finish(&mut self, node: usize) {
        self.clock += 1;
        self.finishing[node] = self.clock;
        debug!(node = self.graph.name(node), time = self.clock, "Finished node");
    }

    fn into_forest(self, roots: Vec<usize>) -> DfsForest {
        let graph = self.graph;
        let times = (0..graph.len())
            .filter(|&node| self.is_discovered(node))
            .map(|node| NodeTimes {
                node: graph.name(node).to_string(),
                discovery: self.discovery[node],
                finishing: self.finishing[node],
            })
            .collect();

        DfsForest {
            roots: roots
                .into_iter()
                .map(|root| graph.name(root).to_string())
                .collect(),
            times,
            edges: self.edges,
        }
    }
}

/// Run a depth-first search from `start`.
///
/// With [`Coverage::Forest`] the search then restarts from every node still
/// undiscovered, in declaration order, sharing one clock across all trees.
pub fn depth_first(graph: &Graph, start: &str, coverage: Coverage) -> Result<DfsForest> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    let start = graph
        .index_of(start)
        .ok_or_else(|| GraphError::InvalidStartNode(start.to_string()))?;

    let mut ctx = DfsContext::new(graph);
    let mut roots = vec![start];
    ctx.visit(start);

    if coverage == Coverage::Forest {
        for node in 0..graph.len() {
            if !ctx.is_discovered(node) {
                debug!(root = graph.name(node), "Starting new DFS tree");
                roots.push(node);
                ctx.visit(node);
            }
        }
    }

    Ok(ctx.into_forest(roots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn triangle() -> Graph {
        Graph::from_adjacency(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])]).unwrap()
    }

    fn reachable_from(graph: &Graph, start: &str) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if seen.insert(node) {
                stack.extend(graph.successors(node).unwrap());
            }
        }
        seen.len()
    }

    #[test]
    fn test_classifies_triangle() {
        let forest = depth_first(&triangle(), "a", Coverage::Forest).unwrap();

        assert_eq!(forest.discovery("a"), Some(1));
        assert_eq!(forest.discovery("b"), Some(2));
        assert_eq!(forest.discovery("c"), Some(3));
        assert_eq!(forest.finishing("c"), Some(4));
        assert_eq!(forest.finishing("b"), Some(5));
        assert_eq!(forest.finishing("a"), Some(6));

        assert_eq!(forest.classification("a", "b"), Some(EdgeKind::Tree));
        assert_eq!(forest.classification("a", "c"), Some(EdgeKind::Forward));
        assert_eq!(forest.classification("b", "c"), Some(EdgeKind::Tree));
        assert_eq!(forest.classification("c", "a"), Some(EdgeKind::Back));
        assert!(forest.has_back_edge());
    }

    #[test]
    fn test_edges_recorded_in_classification_order() {
        let forest = depth_first(&triangle(), "a", Coverage::Forest).unwrap();
        let order: Vec<(&str, &str)> = forest
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(order, vec![("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")]);
    }

    #[test]
    fn test_cross_edge() {
        // b finishes before c is discovered, so c -> b crosses between subtrees
        let graph =
            Graph::from_adjacency(&[("a", &["b", "c"]), ("b", &[]), ("c", &["b"])]).unwrap();
        let forest = depth_first(&graph, "a", Coverage::Forest).unwrap();

        assert_eq!(forest.classification("c", "b"), Some(EdgeKind::Cross));
        assert!(!forest.has_back_edge());
    }

    #[test]
    fn test_cross_edge_between_trees() {
        let graph = Graph::from_adjacency(&[("a", &[]), ("b", &["a"])]).unwrap();
        let forest = depth_first(&graph, "a", Coverage::Forest).unwrap();

        assert_eq!(forest.roots, vec!["a", "b"]);
        assert_eq!(forest.classification("b", "a"), Some(EdgeKind::Cross));
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let graph = Graph::from_adjacency(&[("a", &["a"])]).unwrap();
        let forest = depth_first(&graph, "a", Coverage::Forest).unwrap();

        assert_eq!(forest.classification("a", "a"), Some(EdgeKind::Back));
        assert_eq!(forest.discovery("a"), Some(1));
        assert_eq!(forest.finishing("a"), Some(2));
    }

    #[test]
    fn test_start_without_successors() {
        let graph = Graph::from_adjacency(&[("a", &["b"]), ("b", &[])]).unwrap();
        let forest = depth_first(&graph, "b", Coverage::Reachable).unwrap();

        assert_eq!(forest.discovery("b"), Some(1));
        assert_eq!(forest.finishing("b"), Some(2));
        assert_eq!(forest.tree_edges().count(), 0);
        assert_eq!(forest.discovery("a"), None);
    }

    #[test]
    fn test_forest_covers_disconnected_components() {
        let graph = Graph::sample().unwrap();
        let forest = depth_first(&graph, "a", Coverage::Forest).unwrap();

        assert_eq!(forest.roots, vec!["a", "i"]);
        assert_eq!(forest.times.len(), graph.len());
        assert_eq!(forest.edges.len(), graph.edge_count());
        // One clock for the whole forest: i starts after a's tree is done
        assert_eq!(forest.finishing("a"), Some(18));
        assert_eq!(forest.discovery("i"), Some(19));
        assert_eq!(forest.finishing("i"), Some(20));
        assert_eq!(forest.classification("i", "g"), Some(EdgeKind::Cross));
        assert_eq!(forest.classification("i", "h"), Some(EdgeKind::Cross));
    }

    #[test]
    fn test_reachable_only() {
        let graph = Graph::sample().unwrap();
        let forest = depth_first(&graph, "a", Coverage::Reachable).unwrap();

        assert_eq!(forest.roots, vec!["a"]);
        assert_eq!(forest.times.len(), 9);
        assert_eq!(forest.discovery("i"), None);
        assert_eq!(forest.classification("i", "g"), None);
    }

    #[test]
    fn test_sample_classification() {
        let forest = depth_first(&Graph::sample().unwrap(), "a", Coverage::Forest).unwrap();

        assert_eq!(forest.classification("a", "d"), Some(EdgeKind::Forward));
        assert_eq!(forest.classification("e", "d"), Some(EdgeKind::Cross));
        assert_eq!(forest.classification("e", "f"), Some(EdgeKind::Cross));
        assert_eq!(forest.classification("h", "g"), Some(EdgeKind::Cross));
        assert!(!forest.has_back_edge());
    }

    #[test]
    fn test_tree_edges_nest_intervals() {
        let mut graph = Graph::sample().unwrap();
        graph.add_edge("j", "b");
        graph.add_edge("g", "c");
        let forest = depth_first(&graph, "e", Coverage::Forest).unwrap();

        for edge in forest.tree_edges() {
            let du = forest.discovery(&edge.source).unwrap();
            let dv = forest.discovery(&edge.target).unwrap();
            let fv = forest.finishing(&edge.target).unwrap();
            let fu = forest.finishing(&edge.source).unwrap();
            assert!(du < dv && dv < fv && fv < fu, "bad interval on {edge:?}");
        }
    }

    #[test]
    fn test_intervals_nest_or_are_disjoint() {
        let forest = depth_first(&Graph::sample().unwrap(), "b", Coverage::Forest).unwrap();

        for x in &forest.times {
            assert!(x.discovery < x.finishing);
            for y in &forest.times {
                let disjoint = x.finishing < y.discovery || y.finishing < x.discovery;
                let x_in_y = y.discovery < x.discovery && x.finishing < y.finishing;
                let y_in_x = x.discovery < y.discovery && y.finishing < x.finishing;
                assert!(x == y || disjoint || x_in_y || y_in_x);
            }
        }
    }

    #[test]
    fn test_tree_edge_count_matches_reachable_nodes() {
        let graph = Graph::sample().unwrap();
        for start in ["a", "b", "c", "i", "j"] {
            let forest = depth_first(&graph, start, Coverage::Reachable).unwrap();
            assert_eq!(
                forest.tree_edges().count(),
                reachable_from(&graph, start) - 1,
                "start {start}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let graph = Graph::sample().unwrap();
        let first = depth_first(&graph, "c", Coverage::Forest).unwrap();
        let second = depth_first(&graph, "c", Coverage::Forest).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut graph = Graph::new();
        let names: Vec<String> = (0..200_000).map(|i| format!("n{i}")).collect();
        for name in &names {
            graph.add_node(name);
        }
        for pair in names.windows(2) {
            graph.add_edge(&pair[0], &pair[1]);
        }

        let forest = depth_first(&graph, "n0", Coverage::Reachable).unwrap();
        assert_eq!(forest.tree_edges().count(), names.len() - 1);
        assert_eq!(forest.finishing("n0"), Some(2 * names.len() as u32));
    }

    #[test]
    fn test_invalid_start_node() {
        let result = depth_first(&triangle(), "z", Coverage::Forest);
        assert!(matches!(result, Err(GraphError::InvalidStartNode(ref n)) if n == "z"));
    }

    #[test]
    fn test_empty_graph() {
        let result = depth_first(&Graph::new(), "a", Coverage::Forest);
        assert!(matches!(result, Err(GraphError::EmptyGraph)));
    }
}
