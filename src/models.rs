use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an edge met during depth-first search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Edge used to discover a previously unvisited node
    Tree,
    /// Edge to an ancestor still on the active path
    Back,
    /// Non-tree edge to an already finished descendant
    Forward,
    /// Edge to a finished node that is neither ancestor nor descendant
    Cross,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Tree => "tree",
            EdgeKind::Back => "back",
            EdgeKind::Forward => "forward",
            EdgeKind::Cross => "cross",
        }
    }

    /// Single-letter label used in edge listings
    pub fn letter(&self) -> char {
        match self {
            EdgeKind::Tree => 'T',
            EdgeKind::Back => 'B',
            EdgeKind::Forward => 'F',
            EdgeKind::Cross => 'C',
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for EdgeKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "tree" | "T" => Ok(EdgeKind::Tree),
            "back" | "B" => Ok(EdgeKind::Back),
            "forward" | "F" => Ok(EdgeKind::Forward),
            "cross" | "C" => Ok(EdgeKind::Cross),
            _ => Err(format!("Invalid edge kind: {s}")),
        }
    }
}

/// Discovery and finishing time of a visited node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTimes {
    pub node: String,
    pub discovery: u32,
    pub finishing: u32,
}

/// A directed edge together with its DFS classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

/// BFS distance and parent of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLayer {
    pub node: String,
    pub distance: Option<u32>,
    pub parent: Option<String>,
}

/// An edge of the BFS forest, parent to child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub parent: String,
    pub child: String,
}

/// Topological order derived from DFS finishing times
#[derive(Debug, Clone, Serialize)]
pub struct TopologicalOrder {
    pub order: Vec<String>,
    /// Times of the nodes in `order`, position for position
    pub times: Vec<NodeTimes>,
    /// False when the DFS met a back edge; the order is then not a valid
    /// topological sort.
    pub acyclic: bool,
}
