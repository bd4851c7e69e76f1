//! k8sviz - Generate Graphviz diagrams of Kubernetes namespace resources
//!
//! Lists the workload resources of a namespace and writes their relationships
//! as DOT text or as an image rendered by Graphviz.

use clap::Parser;
use k8sviz::cli::{self, Args};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    cli::init_logging(args.debug);

    if let Err(e) = cli::run(&args).await {
        eprintln!("Error: {:#}", e);
        if let Some(hint) = cli::hint_for(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
