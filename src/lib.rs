pub mod cli;
pub mod cli_handlers;
pub mod core;
pub mod db;
pub mod error;
pub mod graph;
pub mod models;

pub use error::{GraphError, Result};
pub use graph::{
    BfsForest, Coverage, DfsForest, Graph, breadth_first, depth_first, topological_order,
    topological_sort, topological_times,
};
pub use models::*;
