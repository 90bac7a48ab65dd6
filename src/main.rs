use clap::Parser;
use gt::cli::{Cli, Commands};
use gt::cli_handlers;
use std::process;

fn main() {
    // Traversal narration goes to stderr, e.g. RUST_LOG=gt=trace
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = cli.db.as_path();

    let result = match cli.command {
        Commands::Init => cli_handlers::handle_init(db),
        Commands::AddNode { name } => cli_handlers::handle_add_node(db, &name),
        Commands::AddEdge { from, to } => cli_handlers::handle_add_edge(db, &from, &to),
        Commands::Show => cli_handlers::handle_show(db),
        Commands::Clear => cli_handlers::handle_clear(db),
        Commands::Sample => cli_handlers::handle_sample(db),
        Commands::Root { name } => cli_handlers::handle_root(db, name.as_deref()),
        Commands::Dfs {
            start,
            reachable,
            json,
        } => cli_handlers::handle_dfs(db, start.as_deref(), reachable, json),
        Commands::Bfs { start, json } => cli_handlers::handle_bfs(db, start.as_deref(), json),
        Commands::Topo {
            start,
            reachable,
            json,
        } => cli_handlers::handle_topo(db, start.as_deref(), reachable, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
