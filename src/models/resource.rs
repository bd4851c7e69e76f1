//! Kind-agnostic resource records
//!
//! The graph builder never touches `k8s-openapi` types directly. Every listed
//! object is reduced to a [`ResourceRecord`] carrying exactly the fields edge
//! derivation needs.

use std::collections::BTreeMap;

/// A `{kind, name}` pointer to another object in the same namespace
///
/// `kind` is kept as authored (e.g. `ReplicaSet`, `Deployment`) and is only
/// normalized when an edge is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub kind: String,
    pub name: String,
}

impl ObjectRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// One HTTP path of an ingress rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressPath {
    pub path: Option<String>,
    /// Backend service name, `None` for resource backends
    pub service: Option<String>,
}

/// One ingress rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngressRule {
    pub host: Option<String>,
    pub paths: Vec<IngressPath>,
}

/// Kind-specific relational fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceDetails {
    #[default]
    None,
    Pod {
        /// Claim names of `persistentVolumeClaim` volumes
        claim_names: Vec<String>,
    },
    Service {
        selector: BTreeMap<String, String>,
    },
    Autoscaler {
        scale_target: ObjectRef,
    },
    Ingress {
        rules: Vec<IngressRule>,
    },
    ReplicaSet {
        desired_replicas: Option<i32>,
        current_replicas: i32,
    },
}

/// A listed Kubernetes object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub owner_references: Vec<ObjectRef>,
    pub details: ResourceDetails,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            owner_references: Vec::new(),
            details: ResourceDetails::None,
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn owned_by(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.owner_references.push(ObjectRef::new(kind, name));
        self
    }

    pub fn with_details(mut self, details: ResourceDetails) -> Self {
        self.details = details;
        self
    }

    /// Replica sets scaled to zero with no running replicas are leftovers of
    /// earlier rollouts.
    pub fn is_superseded_replica_set(&self) -> bool {
        matches!(
            self.details,
            ResourceDetails::ReplicaSet {
                desired_replicas: Some(0),
                current_replicas: 0,
            }
        )
    }

    /// True if every selector entry is present in the labels with an equal
    /// value. An empty selector matches nothing.
    pub fn matches_selector(&self, selector: &BTreeMap<String, String>) -> bool {
        !selector.is_empty()
            && selector
                .iter()
                .all(|(key, value)| self.labels.get(key) == Some(value))
    }
}
