//! k8sviz library
//!
//! Fetches the workload resources of one Kubernetes namespace, derives their
//! relationships and emits a Graphviz graph. Used by the `k8sviz` binary and
//! by the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod kube;
pub mod models;
pub mod render;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use error::{FetchError, OutputError, RenderError, WriteError};
pub use graph::{Graph, GraphOptions, build_graph};
pub use kube::{ListQuery, ResourceLister, fetch_snapshot};
pub use models::{ResourceKind, ResourceRecord};
pub use render::{OutputType, RenderFormat, RenderOptions, render, write_graph};
pub use snapshot::Snapshot;
