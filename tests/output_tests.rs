//! Output tests
//!
//! Tests for writing DOT text and rendering through the layout tool. The
//! rendering tests stand in small shell scripts for Graphviz `dot`.

use k8sviz::error::{OutputError, RenderError};
use k8sviz::graph::{Graph, GraphOptions, build_graph};
use k8sviz::models::{ResourceKind, ResourceRecord};
use k8sviz::render::{OutputType, RenderFormat, RenderOptions, render, write_graph};
use k8sviz::snapshot::Snapshot;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn sample_graph() -> Graph {
    let snapshot = Snapshot::from_collections(
        "ns1",
        [(ResourceKind::Pod, vec![ResourceRecord::new("p1")])],
    );
    build_graph(
        &snapshot,
        &GraphOptions {
            icons_dir: PathBuf::from("/testdir/icons"),
        },
    )
}

fn options(command: &Path, timeout: Duration) -> RenderOptions {
    RenderOptions {
        dot_command: command.display().to_string(),
        timeout,
    }
}

#[cfg(unix)]
fn fake_dot(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn test_unsupported_format_fails_without_subprocess() {
    let dir = tempfile::tempdir().unwrap();
    // Spawning would fail with RenderError::Spawn, the command does not exist
    let opts = options(&dir.path().join("no-such-dot"), Duration::from_secs(5));

    for format in ["bmp", "dot", "png; rm -rf /", ""] {
        let err = render(&sample_graph(), format, &opts).await.unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)), "{format:?}");
    }
}

#[tokio::test]
async fn test_write_dot_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("k8sviz.out");
    std::fs::write(&path, "previous content that is longer than nothing").unwrap();
    let graph = sample_graph();

    write_graph(&graph, OutputType::Dot, &path, &RenderOptions::default())
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), graph.to_text());
}

#[tokio::test]
async fn test_write_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.dot");

    let err = write_graph(&sample_graph(), OutputType::Dot, &path, &RenderOptions::default())
        .await
        .unwrap_err();

    match err {
        OutputError::Write(e) => assert_eq!(e.path, path),
        other => panic!("expected a write error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_layout_command() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir.path().join("no-such-dot"), Duration::from_secs(5));
    let out = dir.path().join("out.png");

    let err = write_graph(
        &sample_graph(),
        OutputType::Render(RenderFormat::Png),
        &out,
        &opts,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, OutputError::Render(RenderError::Spawn { .. })));
    assert!(!out.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_render_pipes_dot_text() {
    let dir = tempfile::tempdir().unwrap();
    let dot = fake_dot(dir.path(), "echo-dot", "cat");
    let graph = sample_graph();

    let bytes = render(&graph, "svg", &options(&dot, Duration::from_secs(10)))
        .await
        .unwrap();
    assert_eq!(bytes, graph.to_text().into_bytes());
}

#[cfg(unix)]
#[tokio::test]
async fn test_render_failure_carries_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let dot = fake_dot(
        dir.path(),
        "failing-dot",
        "echo 'syntax error in line 1' >&2\nexit 2",
    );

    let err = render(&sample_graph(), "png", &options(&dot, Duration::from_secs(10)))
        .await
        .unwrap_err();

    match err {
        RenderError::Failed { status, stderr, .. } => {
            assert_eq!(status.code(), Some(2));
            assert_eq!(stderr, "syntax error in line 1");
        }
        other => panic!("expected a failed render, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_render_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let dot = fake_dot(dir.path(), "slow-dot", "exec sleep 30");

    let err = render(
        &sample_graph(),
        "pdf",
        &options(&dot, Duration::from_millis(200)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RenderError::Timeout { .. }));
}
