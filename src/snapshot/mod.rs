//! Resource snapshot
//!
//! Holds, for one namespace, the listed records of every supported kind.
//! A snapshot is built once from a fetch and only read afterwards.

use std::collections::BTreeMap;

use crate::models::{ResourceKind, ResourceRecord};

/// Per-kind collections of one namespace, in API return order
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    namespace: String,
    collections: BTreeMap<ResourceKind, Vec<ResourceRecord>>,
}

impl Snapshot {
    /// Build a snapshot from per-kind collections
    ///
    /// Superseded replica sets (desired and current replicas both zero) are
    /// dropped here. Collections given twice for one kind are concatenated.
    pub fn from_collections(
        namespace: impl Into<String>,
        collections: impl IntoIterator<Item = (ResourceKind, Vec<ResourceRecord>)>,
    ) -> Self {
        let mut snapshot = Self {
            namespace: namespace.into(),
            collections: BTreeMap::new(),
        };

        for (kind, records) in collections {
            let before = records.len();
            let kept: Vec<ResourceRecord> = records
                .into_iter()
                .filter(|record| {
                    kind != ResourceKind::ReplicaSet || !record.is_superseded_replica_set()
                })
                .collect();

            if kept.len() != before {
                tracing::debug!(
                    "Skipped {} superseded replica sets in namespace {}",
                    before - kept.len(),
                    snapshot.namespace
                );
            }

            snapshot.collections.entry(kind).or_default().extend(kept);
        }

        snapshot
    }

    /// Namespace the snapshot was taken from
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Records of `kind`; empty when nothing of that kind was listed
    pub fn items(&self, kind: ResourceKind) -> &[ResourceRecord] {
        self.collections
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of `kind`, in listing order
    pub fn names(&self, kind: ResourceKind) -> Vec<&str> {
        self.items(kind)
            .iter()
            .map(|record| record.name.as_str())
            .collect()
    }

    /// True if a `kind` named `name` was listed
    pub fn has(&self, kind: ResourceKind, name: &str) -> bool {
        self.items(kind).iter().any(|record| record.name == name)
    }

    /// Total number of records across all kinds
    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
