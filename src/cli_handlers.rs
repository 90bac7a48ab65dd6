use crate::core::GraphWorkspace;
use crate::error::GraphError;
use crate::graph::Coverage;
use crate::models::EdgeKind;
use std::path::Path;

/// Handle the init command
pub fn handle_init(db: &Path) -> Result<(), GraphError> {
    if db.exists() {
        return Err(GraphError::AlreadyInitialized);
    }

    let workspace = GraphWorkspace::open_at(db)?;
    workspace.init()?;

    println!("Initialized graph store");
    println!("  - Created: {}", db.display());

    Ok(())
}

/// Handle the add-node command
pub fn handle_add_node(db: &Path, name: &str) -> Result<(), GraphError> {
    let workspace = open(db)?;
    workspace.add_node(name)?;
    println!("Added node '{name}'");
    Ok(())
}

/// Handle the add-edge command
pub fn handle_add_edge(db: &Path, from: &str, to: &str) -> Result<(), GraphError> {
    let workspace = open(db)?;
    workspace.add_edge(from, to)?;
    println!("Added edge '{from}' -> '{to}'");
    Ok(())
}

/// Handle the show command
pub fn handle_show(db: &Path) -> Result<(), GraphError> {
    let workspace = open(db)?;
    let graph = workspace.graph()?;

    if graph.is_empty() {
        println!("Graph is empty.");
        return Ok(());
    }

    for node in graph.nodes() {
        let successors: Vec<&str> = graph.successors(node).into_iter().flatten().collect();
        if successors.is_empty() {
            println!("{node}: (no edges)");
        } else {
            println!("{node}: {}", successors.join(", "));
        }
    }

    println!();
    println!("{} nodes, {} edges", graph.len(), graph.edge_count());

    Ok(())
}

/// Handle the clear command
pub fn handle_clear(db: &Path) -> Result<(), GraphError> {
    let workspace = open(db)?;
    if workspace.graph()?.is_empty() {
        println!("Graph is already empty.");
        return Ok(());
    }
    workspace.clear()?;
    println!("Cleared all nodes and edges");
    Ok(())
}

/// Handle the sample command
pub fn handle_sample(db: &Path) -> Result<(), GraphError> {
    let mut workspace = open(db)?;
    let graph = workspace.load_sample()?;
    println!(
        "Loaded sample graph: {} nodes, {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(())
}

/// Handle the root command
pub fn handle_root(db: &Path, name: Option<&str>) -> Result<(), GraphError> {
    let workspace = open(db)?;

    if let Some(name) = name {
        workspace.set_root(name)?;
        println!("Set root to '{name}'");
    } else {
        match workspace.get_root()? {
            Some(root) => println!("Current root: '{root}'"),
            None => println!("No root set."),
        }
    }

    Ok(())
}

/// Handle the dfs command
pub fn handle_dfs(
    db: &Path,
    start: Option<&str>,
    reachable: bool,
    json: bool,
) -> Result<(), GraphError> {
    let workspace = open(db)?;
    let coverage = coverage(reachable);
    let forest = workspace.dfs(start, coverage)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
        return Ok(());
    }

    let label = match coverage {
        Coverage::Forest => "DFS forest",
        Coverage::Reachable => "DFS tree",
    };
    println!("{label} from '{}' (roots: {})", forest.roots[0], forest.roots.join(", "));

    println!();
    println!("Times (discovery/finishing):");
    for times in &forest.times {
        println!("  {}  {}/{}", times.node, times.discovery, times.finishing);
    }

    if !forest.edges.is_empty() {
        println!();
        println!("Edges:");
        for edge in &forest.edges {
            println!(
                "  {} -> {}  {} {}",
                edge.source,
                edge.target,
                edge.kind.letter(),
                edge.kind
            );
        }
    }

    println!();
    println!(
        "Summary: {} tree, {} back, {} forward, {} cross",
        forest.edges_of_kind(EdgeKind::Tree).count(),
        forest.edges_of_kind(EdgeKind::Back).count(),
        forest.edges_of_kind(EdgeKind::Forward).count(),
        forest.edges_of_kind(EdgeKind::Cross).count(),
    );

    Ok(())
}

/// Handle the bfs command
pub fn handle_bfs(db: &Path, start: Option<&str>, json: bool) -> Result<(), GraphError> {
    let workspace = open(db)?;
    let bfs = workspace.bfs(start)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bfs)?);
        return Ok(());
    }

    println!("BFS from '{}' (roots: {})", bfs.roots[0], bfs.roots.join(", "));

    println!();
    println!("Layers:");
    for (distance, nodes) in bfs.levels().iter().enumerate() {
        println!("  {distance}: {}", nodes.join(", "));
    }

    if !bfs.tree_edges.is_empty() {
        println!();
        println!("Tree edges:");
        for edge in &bfs.tree_edges {
            println!("  {} -> {}", edge.parent, edge.child);
        }
    }

    Ok(())
}

/// Handle the topo command
pub fn handle_topo(
    db: &Path,
    start: Option<&str>,
    reachable: bool,
    json: bool,
) -> Result<(), GraphError> {
    let workspace = open(db)?;
    let sorted = workspace.topo(start, coverage(reachable))?;

    if !sorted.acyclic {
        eprintln!(
            "Warning: the graph has a cycle (back edge found); this order is not a valid topological sort"
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    println!("Topological order (decreasing finishing time):");
    for t in &sorted.times {
        println!("  {}  {}/{}", t.node, t.discovery, t.finishing);
    }

    Ok(())
}

fn coverage(reachable: bool) -> Coverage {
    if reachable {
        Coverage::Reachable
    } else {
        Coverage::Forest
    }
}

fn open(db: &Path) -> Result<GraphWorkspace, GraphError> {
    if !db.exists() {
        return Err(GraphError::NotInitialized);
    }
    let workspace = GraphWorkspace::open_at(db)?;
    if !workspace.is_initialized()? {
        return Err(GraphError::NotInitialized);
    }
    Ok(workspace)
}
