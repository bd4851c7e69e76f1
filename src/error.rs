//! Error types
//!
//! Fetch, render and write failures abort a run. Unresolved references while
//! building the graph are not errors; they are logged and the edge is skipped.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::ResourceKind;

/// Boxed error produced by a resource lister
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A list call for one kind failed; no partial snapshot is produced
#[derive(Debug, thiserror::Error)]
#[error("failed to list {} resources in namespace {namespace:?}: {source}", kind.name())]
pub struct FetchError {
    pub kind: ResourceKind,
    pub namespace: String,
    #[source]
    pub source: BoxError,
}

/// Rendering through the external layout tool failed
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("format {0:?} is not supported")]
    UnsupportedFormat(String),

    #[error("failed to start {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to exchange data with {command:?}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command:?} did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("{command:?} exited with {status}: stderr: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// The output artifact could not be written
#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure while producing the output artifact
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
