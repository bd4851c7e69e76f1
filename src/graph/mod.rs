//! Resource graph
//!
//! Builds a Graphviz graph of the resources in a snapshot and serializes it
//! to DOT text.

mod builder;
pub mod dot;
pub mod names;

pub use builder::{GRAPH_NAME, GraphOptions, build_graph};
pub use dot::{Attrs, Edge, Graph, GraphError, Node, Subgraph};
pub use names::escape_name;
