use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gt")]
#[command(about = "Directed graph traversal: DFS edge classification, BFS layers, topological order")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Graph database file
    #[arg(long, global = true, env = "GT_DB", default_value = "gt.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new graph store
    Init,

    /// Declare a node
    AddNode {
        /// Node name
        name: String,
    },

    /// Add a directed edge between two declared nodes
    AddEdge {
        /// Source node
        from: String,
        /// Destination node
        to: String,
    },

    /// Print the adjacency list
    Show,

    /// Remove every node and edge
    Clear,

    /// Replace the graph with the bundled ten-node sample
    Sample,

    /// Set or view the default start node
    Root {
        /// Node name (omit to view current root)
        name: Option<String>,
    },

    /// Depth-first search with edge classification
    Dfs {
        /// Start node (defaults to the root)
        start: Option<String>,
        /// Only visit nodes reachable from the start node
        #[arg(long)]
        reachable: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Breadth-first search with shortest-path layers
    Bfs {
        /// Start node (defaults to the root)
        start: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Topological order by decreasing DFS finishing time
    Topo {
        /// Start node (defaults to the root)
        start: Option<String>,
        /// Only order nodes reachable from the start node
        #[arg(long)]
        reachable: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
