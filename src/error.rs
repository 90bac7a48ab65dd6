use thiserror::Error;

/// All possible errors in the graph tool
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Graph is empty. Add nodes first or load the sample graph with `gt sample`.")]
    EmptyGraph,

    #[error("Start node '{0}' does not exist in the graph")]
    InvalidStartNode(String),

    #[error("Node '{0}' does not exist in the graph")]
    NodeNotFound(String),

    #[error("Node name cannot be empty")]
    EmptyNodeName,

    #[error("Node '{0}' already exists")]
    NodeAlreadyExists(String),

    #[error("Edge '{from}' -> '{to}' already exists")]
    EdgeAlreadyExists { from: String, to: String },

    #[error("No start node given and no root set. Use `gt root <node>` first.")]
    NoStartNode,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph store not initialized. Run `gt init` first.")]
    NotInitialized,

    #[error("Graph store already initialized")]
    AlreadyInitialized,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
