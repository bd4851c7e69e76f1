//! Rendering and output
//!
//! DOT output is written as is. Image formats are produced by piping the DOT
//! text into the Graphviz `dot` command and capturing its stdout.

mod format;

pub use format::{OutputType, RenderFormat};

use crate::error::{OutputError, RenderError, WriteError};
use crate::graph::Graph;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default layout command
pub const DEFAULT_DOT_COMMAND: &str = "dot";

/// Default limit for one layout run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How the layout tool is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Program name or path of the layout tool
    pub dot_command: String,
    /// The child is killed when it runs longer than this
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dot_command: DEFAULT_DOT_COMMAND.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Render `graph` in the named format
///
/// Names outside the allowed formats are rejected before any process starts.
pub async fn render(
    graph: &Graph,
    format: &str,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let format: RenderFormat = format.parse()?;
    render_format(graph, format, options).await
}

/// Render `graph` with the layout tool and return its stdout
pub async fn render_format(
    graph: &Graph,
    format: RenderFormat,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let command = options.dot_command.as_str();
    tracing::debug!("Rendering {} with {} {}", format, command, format.arg());

    let mut child = Command::new(command)
        .arg(format.arg())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| RenderError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let mut stdin = child.stdin.take().ok_or_else(|| RenderError::Io {
        command: command.to_string(),
        source: std::io::Error::other("stdin of the child is not piped"),
    })?;
    let text = graph.to_text();
    let feed = async move {
        let written = stdin.write_all(text.as_bytes()).await;
        // Closing stdin signals end of input
        drop(stdin);
        written
    };

    // On timeout the child is dropped with the future and killed
    let (written, output) = tokio::time::timeout(options.timeout, async move {
        tokio::join!(feed, child.wait_with_output())
    })
    .await
    .map_err(|_| RenderError::Timeout {
        command: command.to_string(),
        timeout: options.timeout,
    })?;

    let output = output.map_err(|source| RenderError::Io {
        command: command.to_string(),
        source,
    })?;
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(RenderError::Failed {
            command: command.to_string(),
            status: output.status,
            stderr,
        });
    }
    written.map_err(|source| RenderError::Io {
        command: command.to_string(),
        source,
    })?;

    if !stderr.is_empty() {
        tracing::warn!("{} reported: {}", command, stderr);
    }
    Ok(output.stdout)
}

/// Write `contents` to `path`, creating or truncating the file
pub async fn write_output(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| WriteError {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `graph` to `path` as DOT text or as a rendered image
pub async fn write_graph(
    graph: &Graph,
    output_type: OutputType,
    path: &Path,
    options: &RenderOptions,
) -> Result<(), OutputError> {
    let contents = match output_type {
        OutputType::Dot => graph.to_text().into_bytes(),
        OutputType::Render(format) => render_format(graph, format, options).await?,
    };
    write_output(path, &contents).await?;

    tracing::debug!(
        "Wrote {} bytes of {} output to {}",
        contents.len(),
        output_type,
        path.display()
    );
    Ok(())
}
