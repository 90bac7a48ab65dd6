//! Topological ordering from DFS finishing times.
//!
//! The ordering is not validated: on a cyclic graph it is still produced, it
//! just is not a topological sort. [`TopologicalOrder::acyclic`] says which.

use super::DfsForest;
use crate::models::{NodeTimes, TopologicalOrder};

/// Times of the finished nodes, by strictly decreasing finishing time.
///
/// `forest.times` is in declaration order and the sort is stable, so equal
/// times would keep declaration order.
pub fn topological_times(forest: &DfsForest) -> Vec<&NodeTimes> {
    let mut times: Vec<_> = forest.times.iter().collect();
    times.sort_by(|a, b| b.finishing.cmp(&a.finishing));
    times
}

pub fn topological_order(forest: &DfsForest) -> Vec<String> {
    topological_times(forest)
        .into_iter()
        .map(|t| t.node.clone())
        .collect()
}

/// Ordered nodes with their times, plus whether the search saw a back edge
pub fn topological_sort(forest: &DfsForest) -> TopologicalOrder {
    let times: Vec<NodeTimes> = topological_times(forest).into_iter().cloned().collect();
    TopologicalOrder {
        order: times.iter().map(|t| t.node.clone()).collect(),
        times,
        acyclic: !forest.has_back_edge(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Coverage, Graph, depth_first};

    #[test]
    fn test_sample_order() {
        let forest = depth_first(&Graph::sample().unwrap(), "a", Coverage::Forest).unwrap();
        let order = topological_order(&forest);

        assert_eq!(
            order,
            vec!["i", "a", "e", "b", "d", "f", "j", "c", "h", "g"]
        );
    }

    #[test]
    fn test_tree_edges_point_forward_in_dag_order() {
        let forest = depth_first(&Graph::sample().unwrap(), "c", Coverage::Forest).unwrap();
        let order = topological_order(&forest);
        let position = |n: &str| order.iter().position(|o| o == n).unwrap();

        assert!(!forest.has_back_edge());
        for edge in &forest.edges {
            assert!(
                position(edge.source.as_str()) < position(edge.target.as_str()),
                "{edge:?} out of order"
            );
        }
    }

    #[test]
    fn test_only_finished_nodes() {
        let forest = depth_first(&Graph::sample().unwrap(), "d", Coverage::Reachable).unwrap();
        assert_eq!(topological_order(&forest), vec!["d", "f", "j"]);
    }

    #[test]
    fn test_cycle_still_ordered_but_flagged() {
        let graph =
            Graph::from_adjacency(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])]).unwrap();
        let forest = depth_first(&graph, "a", Coverage::Forest).unwrap();
        let sorted = topological_sort(&forest);

        assert_eq!(sorted.order, vec!["a", "b", "c"]);
        assert!(!sorted.acyclic);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let forest = DfsForest {
            roots: vec!["x".to_string()],
            times: vec![
                NodeTimes {
                    node: "x".to_string(),
                    discovery: 1,
                    finishing: 4,
                },
                NodeTimes {
                    node: "y".to_string(),
                    discovery: 2,
                    finishing: 4,
                },
                NodeTimes {
                    node: "z".to_string(),
                    discovery: 3,
                    finishing: 9,
                },
            ],
            edges: vec![],
        };

        assert_eq!(topological_order(&forest), vec!["z", "x", "y"]);
        assert!(topological_sort(&forest).acyclic);
    }

    #[test]
    fn test_times_follow_order_on_long_chain() {
        let names: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let mut graph = Graph::new();
        for name in &names {
            graph.add_node(name);
        }
        for pair in names.windows(2) {
            graph.add_edge(&pair[0], &pair[1]);
        }
        let forest = depth_first(&graph, "n0", Coverage::Forest).unwrap();
        let sorted = topological_sort(&forest);

        assert!(sorted.acyclic);
        assert_eq!(sorted.order, names);
        assert_eq!(sorted.times.len(), names.len());
        for (node, t) in sorted.order.iter().zip(&sorted.times) {
            assert_eq!(&t.node, node);
        }
        assert!(sorted.times.windows(2).all(|w| w[0].finishing > w[1].finishing));
        assert_eq!(sorted.times[0].finishing, 100_000);
    }
}
