//! Graph functionality tests
//!
//! Tests for building resource graphs from snapshots: node placement, edge
//! derivation and deterministic DOT output.

use k8sviz::graph::{Attrs, Graph, GraphOptions, build_graph};
use k8sviz::models::{ResourceDetails, ResourceKind, ResourceRecord};
use k8sviz::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn options() -> GraphOptions {
    GraphOptions {
        icons_dir: PathBuf::from("/testdir/icons"),
    }
}

fn selector(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn service(name: &str, pairs: &[(&str, &str)]) -> ResourceRecord {
    ResourceRecord::new(name).with_details(ResourceDetails::Service {
        selector: selector(pairs),
    })
}

/// Edges between resources, without the invisible rank chain
fn resource_edges(graph: &Graph) -> Vec<(String, String, String)> {
    graph
        .edges()
        .iter()
        .filter(|e| e.attrs.get("style").map(String::as_str) != Some("invis"))
        .map(|e| (e.from.clone(), e.to.clone(), describe(&e.attrs)))
        .collect()
}

fn describe(attrs: &Attrs) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn edge(from: &str, to: &str, attrs: &str) -> (String, String, String) {
    (from.to_string(), to.to_string(), attrs.to_string())
}

/// Deployment d1 -> replica set rs1 -> three pods, selected by one service
fn deployment_snapshot() -> Snapshot {
    let pod = |name: &str| {
        ResourceRecord::new(name)
            .with_label("app", "web")
            .with_label("pod-template-hash", "abc")
            .owned_by("ReplicaSet", "rs1")
    };

    Snapshot::from_collections(
        "ns1",
        [
            (ResourceKind::Deployment, vec![ResourceRecord::new("d1")]),
            (
                ResourceKind::ReplicaSet,
                vec![
                    ResourceRecord::new("rs1")
                        .owned_by("Deployment", "d1")
                        .with_details(ResourceDetails::ReplicaSet {
                            desired_replicas: Some(3),
                            current_replicas: 3,
                        }),
                ],
            ),
            (ResourceKind::Pod, vec![pod("p1"), pod("p2"), pod("p3")]),
            (ResourceKind::Service, vec![service("svc1", &[("app", "web")])]),
        ],
    )
}

#[test]
fn test_deployment_end_to_end() {
    let graph = build_graph(&deployment_snapshot(), &options());

    let resource_nodes: Vec<&str> = graph
        .nodes()
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| id.parse::<usize>().is_err())
        .collect();
    assert_eq!(
        resource_nodes,
        vec!["deploy_d1", "rs_rs1", "pod_p1", "pod_p2", "pod_p3", "svc_svc1"]
    );
    assert_eq!(graph.nodes().len(), resource_nodes.len() + 7);

    assert_eq!(
        resource_edges(&graph),
        vec![
            edge("rs_rs1", "pod_p1", "style=dashed"),
            edge("rs_rs1", "pod_p2", "style=dashed"),
            edge("rs_rs1", "pod_p3", "style=dashed"),
            edge("deploy_d1", "rs_rs1", "style=dashed"),
            edge("pod_p1", "svc_svc1", "dir=back"),
            edge("pod_p2", "svc_svc1", "dir=back"),
            edge("pod_p3", "svc_svc1", "dir=back"),
        ]
    );
}

#[test]
fn test_nodes_in_rank_subgraphs() {
    let graph = build_graph(&deployment_snapshot(), &options());

    assert_eq!(graph.parent_of("deploy_d1"), Some("rank_1"));
    assert_eq!(graph.parent_of("rs_rs1"), Some("rank_2"));
    assert_eq!(graph.parent_of("pod_p1"), Some("rank_3"));
    assert_eq!(graph.parent_of("svc_svc1"), Some("rank_5"));

    let pod = graph
        .nodes()
        .into_iter()
        .find(|n| n.id == "pod_p2")
        .unwrap()
        .clone();
    assert_eq!(pod.attrs.get("penwidth").map(String::as_str), Some("0"));
    assert!(pod.attrs["label"].contains("/testdir/icons/pod-128.png"));
    assert!(pod.attrs["label"].contains("<TD>p2</TD>"));
}

#[test]
fn test_dangling_owner_keeps_node() {
    let snapshot = Snapshot::from_collections(
        "ns1",
        [(
            ResourceKind::Pod,
            vec![ResourceRecord::new("orphan").owned_by("ReplicaSet", "gone")],
        )],
    );
    let graph = build_graph(&snapshot, &options());

    assert!(graph.contains_node("pod_orphan"));
    assert!(resource_edges(&graph).is_empty());
}

#[test]
fn test_owner_kind_aliases() {
    let snapshot = Snapshot::from_collections(
        "ns1",
        [
            (ResourceKind::CronJob, vec![ResourceRecord::new("nightly")]),
            (
                ResourceKind::Job,
                vec![ResourceRecord::new("nightly-1").owned_by("CronJob", "nightly")],
            ),
            (
                ResourceKind::Pod,
                vec![ResourceRecord::new("nightly-1-x").owned_by("job", "nightly-1")],
            ),
        ],
    );
    let graph = build_graph(&snapshot, &options());

    assert_eq!(
        resource_edges(&graph),
        vec![
            edge("job_nightly_1", "pod_nightly_1_x", "style=dashed"),
            edge("cronjob_nightly", "job_nightly_1", "style=dashed"),
        ]
    );
}

#[test]
fn test_selector_superset_rule() {
    let snapshot = Snapshot::from_collections(
        "ns1",
        [
            (
                ResourceKind::Service,
                vec![
                    service("both", &[("app", "web"), ("tier", "front")]),
                    service("app-only", &[("app", "web")]),
                    service("headless", &[]),
                ],
            ),
            (
                ResourceKind::Pod,
                vec![
                    ResourceRecord::new("front")
                        .with_label("app", "web")
                        .with_label("tier", "front"),
                    ResourceRecord::new("back")
                        .with_label("app", "web")
                        .with_label("tier", "back"),
                    ResourceRecord::new("bare"),
                ],
            ),
        ],
    );
    let graph = build_graph(&snapshot, &options());

    assert_eq!(
        resource_edges(&graph),
        vec![
            edge("pod_front", "svc_both", "dir=back"),
            edge("pod_front", "svc_app_only", "dir=back"),
            edge("pod_back", "svc_app_only", "dir=back"),
        ]
    );
}

#[test]
fn test_superseded_replica_set_has_no_node() {
    let snapshot = Snapshot::from_collections(
        "ns1",
        [
            (ResourceKind::Deployment, vec![ResourceRecord::new("d1")]),
            (
                ResourceKind::ReplicaSet,
                vec![
                    ResourceRecord::new("old")
                        .owned_by("Deployment", "d1")
                        .with_details(ResourceDetails::ReplicaSet {
                            desired_replicas: Some(0),
                            current_replicas: 0,
                        }),
                ],
            ),
        ],
    );
    let graph = build_graph(&snapshot, &options());

    assert!(!graph.contains_node("rs_old"));
    assert!(resource_edges(&graph).is_empty());
}

#[test]
fn test_dot_text_is_deterministic() {
    let snapshot = deployment_snapshot();
    let first = build_graph(&snapshot, &options()).to_text();
    let second = build_graph(&snapshot, &options()).to_text();
    assert_eq!(first, second);
    assert!(first.starts_with("digraph G {\n"));
    assert!(first.ends_with("}\n"));
}
