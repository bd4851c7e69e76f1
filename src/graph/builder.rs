//! Graph builder for resource relationships
//!
//! Turns a [`Snapshot`] into a [`Graph`]: a namespace cluster with one
//! subgraph per rank, one node per resource, and edges derived from owner
//! references, autoscaler targets, volume claims, service selectors and
//! ingress backends.
//!
//! Every edge rule is independent. A reference that cannot be resolved is
//! logged and skipped; building never fails because of the cluster's content.

use super::dot::{Attrs, Graph, attrs};
use super::names::{cluster_name, rank_anchor, rank_name, resource_id, resource_label};
use crate::models::{ObjectRef, RANKS, ResourceDetails, ResourceKind};
use crate::snapshot::Snapshot;
use std::path::PathBuf;

/// Name of the top-level digraph
pub const GRAPH_NAME: &str = "G";

/// Settings that affect the generated graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Directory containing `<kind>-128.png` icons
    pub icons_dir: PathBuf,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("icons"),
        }
    }
}

/// Build the graph of every resource in the snapshot
pub fn build_graph(snapshot: &Snapshot, options: &GraphOptions) -> Graph {
    let mut builder = Builder {
        snapshot,
        options,
        cluster: cluster_name(snapshot.namespace()),
        graph: Graph::new(GRAPH_NAME),
    };

    builder.add_frame();
    builder.add_nodes();

    builder.add_owner_edges(ResourceKind::Pod);
    builder.add_owner_edges(ResourceKind::ReplicaSet);
    builder.add_owner_edges(ResourceKind::Job);
    builder.add_autoscaler_edges();
    builder.add_volume_claim_edges();
    builder.add_service_edges();
    builder.add_ingress_edges();

    tracing::debug!(
        "Built graph for namespace {} with {} nodes and {} edges",
        snapshot.namespace(),
        builder.graph.nodes().len(),
        builder.graph.edges().len()
    );

    builder.graph
}

struct Builder<'a> {
    snapshot: &'a Snapshot,
    options: &'a GraphOptions,
    cluster: String,
    graph: Graph,
}

impl Builder<'_> {
    /// Namespace cluster, rank subgraphs and the invisible chain of rank
    /// anchors that keeps ranks in order regardless of their content.
    ///
    /// ```text
    /// digraph G {
    ///   rankdir=TD;
    ///   subgraph cluster_ns1 {
    ///     label=<...>; labeljust=l; style=dotted;
    ///     subgraph rank_0 { rank=same; style=invis; 0 [ height=0, margin=0, style=invis, width=0 ]; }
    ///     ...
    ///   }
    ///   0->1 [ style=invis ];
    /// ```
    fn add_frame(&mut self) {
        self.graph.set_attr("rankdir", "TD");

        let label = resource_label(
            &self.options.icons_dir,
            ResourceKind::Namespace,
            self.snapshot.namespace(),
        );
        self.graph
            .add_subgraph(
                GRAPH_NAME,
                &self.cluster,
                attrs([("label", label.as_str()), ("labeljust", "l"), ("style", "dotted")]),
            )
            .expect("namespace cluster name is never empty");

        for rank in 0..RANKS.len() {
            self.graph
                .add_subgraph(
                    &self.cluster,
                    &rank_name(rank),
                    attrs([("rank", "same"), ("style", "invis")]),
                )
                .expect("rank subgraph names are unique");
            self.graph
                .add_node(
                    &rank_name(rank),
                    &rank_anchor(rank),
                    attrs([
                        ("style", "invis"),
                        ("height", "0"),
                        ("width", "0"),
                        ("margin", "0"),
                    ]),
                )
                .expect("rank subgraph was just added");
        }

        for rank in 1..RANKS.len() {
            self.connect(
                &rank_anchor(rank - 1),
                &rank_anchor(rank),
                attrs([("style", "invis")]),
            );
        }
    }

    /// One node per resource, placed in the subgraph of its kind's rank
    ///
    /// ```text
    /// pod_my_pod [ label=<...>, penwidth=0 ];
    /// ```
    fn add_nodes(&mut self) {
        let snapshot = self.snapshot;
        for (rank, kinds) in RANKS.iter().enumerate() {
            let parent = rank_name(rank);
            for &kind in kinds.iter() {
                for name in snapshot.names(kind) {
                    let id = resource_id(kind, name);
                    if self.graph.contains_node(&id) {
                        tracing::warn!(
                            "{} {} escapes to the already used id {}; nodes will be merged",
                            kind,
                            name,
                            id
                        );
                    }
                    let label = resource_label(&self.options.icons_dir, kind, name);
                    let node_attrs = attrs([("label", label.as_str()), ("penwidth", "0")]);
                    if let Err(e) = self.graph.add_node(&parent, &id, node_attrs) {
                        tracing::warn!("Failed to add node {} to {}: {}", id, parent, e);
                    }
                }
            }
        }
    }

    /// `owner -> child [ style=dashed ]` for each resolvable owner reference
    fn add_owner_edges(&mut self, child_kind: ResourceKind) {
        let snapshot = self.snapshot;
        for child in snapshot.items(child_kind) {
            for owner in &child.owner_references {
                let Some(owner_kind) = self.resolve(owner) else {
                    tracing::debug!(
                        "Skipping owner {}/{} of {} {}: kind is not visualized",
                        owner.kind,
                        owner.name,
                        child_kind,
                        child.name
                    );
                    continue;
                };
                if !snapshot.has(owner_kind, &owner.name) {
                    tracing::warn!(
                        "{} {} not found as an owner reference for {} {}",
                        owner_kind,
                        owner.name,
                        child_kind,
                        child.name
                    );
                    continue;
                }

                self.connect(
                    &resource_id(owner_kind, &owner.name),
                    &resource_id(child_kind, &child.name),
                    attrs([("style", "dashed")]),
                );
            }
        }
    }

    /// `hpa -> target [ style=dashed ]`
    fn add_autoscaler_edges(&mut self) {
        let snapshot = self.snapshot;
        let kind = ResourceKind::HorizontalPodAutoscaler;
        for hpa in snapshot.items(kind) {
            let ResourceDetails::Autoscaler { scale_target } = &hpa.details else {
                continue;
            };
            let Some(target_kind) = self.resolve(scale_target) else {
                tracing::debug!(
                    "Skipping scale target {}/{} of hpa {}: kind is not visualized",
                    scale_target.kind,
                    scale_target.name,
                    hpa.name
                );
                continue;
            };
            if !snapshot.has(target_kind, &scale_target.name) {
                tracing::warn!(
                    "{} {:?} is referenced from hpa {:?}, but not found",
                    target_kind,
                    scale_target.name,
                    hpa.name
                );
                continue;
            }

            self.connect(
                &resource_id(kind, &hpa.name),
                &resource_id(target_kind, &scale_target.name),
                attrs([("style", "dashed")]),
            );
        }
    }

    /// `pod -> pvc [ dir=none ]` for every claim a pod mounts
    fn add_volume_claim_edges(&mut self) {
        let snapshot = self.snapshot;
        for pod in snapshot.items(ResourceKind::Pod) {
            let ResourceDetails::Pod { claim_names } = &pod.details else {
                continue;
            };
            for claim in claim_names {
                if !snapshot.has(ResourceKind::PersistentVolumeClaim, claim) {
                    tracing::warn!("pvc {} not found as a volume for pod {}", claim, pod.name);
                    continue;
                }

                self.connect(
                    &resource_id(ResourceKind::Pod, &pod.name),
                    &resource_id(ResourceKind::PersistentVolumeClaim, claim),
                    attrs([("dir", "none")]),
                );
            }
        }
    }

    /// `pod -> svc [ dir=back ]` for every pod whose labels satisfy the
    /// service selector
    fn add_service_edges(&mut self) {
        let snapshot = self.snapshot;
        for svc in snapshot.items(ResourceKind::Service) {
            let ResourceDetails::Service { selector } = &svc.details else {
                continue;
            };
            if selector.is_empty() {
                continue;
            }

            for pod in snapshot.items(ResourceKind::Pod) {
                if pod.matches_selector(selector) {
                    self.connect(
                        &resource_id(ResourceKind::Pod, &pod.name),
                        &resource_id(ResourceKind::Service, &svc.name),
                        attrs([("dir", "back")]),
                    );
                }
            }
        }
    }

    /// `svc -> ing [ dir=back ]` for every ingress path backed by a service
    fn add_ingress_edges(&mut self) {
        let snapshot = self.snapshot;
        for ing in snapshot.items(ResourceKind::Ingress) {
            let ResourceDetails::Ingress { rules } = &ing.details else {
                continue;
            };
            for path in rules.iter().flat_map(|rule| rule.paths.iter()) {
                let Some(service) = path.service.as_deref() else {
                    tracing::debug!(
                        "Skipping path {:?} of ingress {}: backend is not a service",
                        path.path,
                        ing.name
                    );
                    continue;
                };
                if !snapshot.has(ResourceKind::Service, service) {
                    tracing::warn!("svc {} not found for ingress {}", service, ing.name);
                    continue;
                }

                self.connect(
                    &resource_id(ResourceKind::Service, service),
                    &resource_id(ResourceKind::Ingress, &ing.name),
                    attrs([("dir", "back")]),
                );
            }
        }
    }

    fn resolve(&self, reference: &ObjectRef) -> Option<ResourceKind> {
        ResourceKind::normalize(&reference.kind)
    }

    fn connect(&mut self, from: &str, to: &str, attrs: Attrs) {
        if let Err(e) = self.graph.add_edge(from, to, attrs) {
            tracing::warn!("Failed to add edge from {} to {}: {}", from, to, e);
        }
    }
}
