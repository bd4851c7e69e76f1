//! Resource kind definitions
//!
//! Centralizes every Kubernetes kind the visualizer understands: its short
//! code (used in node identifiers and icon names), the aliases accepted when
//! normalizing externally authored kind strings, and the layout rank it is
//! drawn in.

use std::fmt;
use std::str::FromStr;

/// Enumeration of all supported Kubernetes resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Namespace,
    Service,
    PersistentVolumeClaim,
    Pod,
    StatefulSet,
    DaemonSet,
    ReplicaSet,
    Deployment,
    Job,
    CronJob,
    Ingress,
    HorizontalPodAutoscaler,
}

/// Layout tiers, top to bottom. Kinds in the same tier share a rank.
pub const RANKS: [&[ResourceKind]; 7] = [
    &[ResourceKind::HorizontalPodAutoscaler, ResourceKind::CronJob],
    &[ResourceKind::Deployment, ResourceKind::Job],
    &[
        ResourceKind::StatefulSet,
        ResourceKind::DaemonSet,
        ResourceKind::ReplicaSet,
    ],
    &[ResourceKind::Pod],
    &[ResourceKind::PersistentVolumeClaim],
    &[ResourceKind::Service],
    &[ResourceKind::Ingress],
];

/// Error returned when a kind string matches neither a short code nor an alias
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized resource kind: {0}")]
pub struct UnknownKind(pub String);

impl ResourceKind {
    /// Short code, e.g. `svc` or `deploy`
    pub fn code(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "ns",
            ResourceKind::Service => "svc",
            ResourceKind::PersistentVolumeClaim => "pvc",
            ResourceKind::Pod => "pod",
            ResourceKind::StatefulSet => "sts",
            ResourceKind::DaemonSet => "ds",
            ResourceKind::ReplicaSet => "rs",
            ResourceKind::Deployment => "deploy",
            ResourceKind::Job => "job",
            ResourceKind::CronJob => "cronjob",
            ResourceKind::Ingress => "ing",
            ResourceKind::HorizontalPodAutoscaler => "hpa",
        }
    }

    /// Lowercase singular kind name, e.g. `persistentvolumeclaim`
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespace",
            ResourceKind::Service => "service",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaim",
            ResourceKind::Pod => "pod",
            ResourceKind::StatefulSet => "statefulset",
            ResourceKind::DaemonSet => "daemonset",
            ResourceKind::ReplicaSet => "replicaset",
            ResourceKind::Deployment => "deployment",
            ResourceKind::Job => "job",
            ResourceKind::CronJob => "cronjob",
            ResourceKind::Ingress => "ingress",
            ResourceKind::HorizontalPodAutoscaler => "horizontalpodautoscaler",
        }
    }

    /// Additional accepted spellings (plurals and kubectl abbreviations)
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Namespace => &["namespaces"],
            ResourceKind::Service => &["services"],
            ResourceKind::PersistentVolumeClaim => &["persistentvolumeclaims"],
            ResourceKind::Pod => &["po", "pods"],
            ResourceKind::StatefulSet => &["statefulsets"],
            ResourceKind::DaemonSet => &["daemonsets"],
            ResourceKind::ReplicaSet => &["replicasets"],
            ResourceKind::Deployment => &["deployments"],
            ResourceKind::Job => &["jobs"],
            ResourceKind::CronJob => &["cj", "cronjobs"],
            ResourceKind::Ingress => &["ingresses"],
            ResourceKind::HorizontalPodAutoscaler => &["horizontalpodautoscalers"],
        }
    }

    /// All kinds, in declaration order
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Namespace,
            ResourceKind::Service,
            ResourceKind::PersistentVolumeClaim,
            ResourceKind::Pod,
            ResourceKind::StatefulSet,
            ResourceKind::DaemonSet,
            ResourceKind::ReplicaSet,
            ResourceKind::Deployment,
            ResourceKind::Job,
            ResourceKind::CronJob,
            ResourceKind::Ingress,
            ResourceKind::HorizontalPodAutoscaler,
        ]
    }

    /// Kinds that are listed inside a namespace (everything but `Namespace`)
    pub fn namespaced() -> impl Iterator<Item = ResourceKind> {
        Self::all()
            .iter()
            .copied()
            .filter(|kind| *kind != ResourceKind::Namespace)
    }

    /// Layout rank of this kind, `None` for kinds that are never drawn as nodes
    pub fn rank(&self) -> Option<usize> {
        RANKS.iter().position(|tier| tier.contains(self))
    }

    /// Map an externally supplied kind string (owner reference kind, scale
    /// target kind, CLI argument) onto a supported kind.
    ///
    /// Matching is case-insensitive against the short code, the kind name and
    /// the aliases. Returns `None` for anything else, e.g. custom resources.
    pub fn normalize(reference: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| {
            kind.code().eq_ignore_ascii_case(reference)
                || kind.name().eq_ignore_ascii_case(reference)
                || kind
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(reference))
        })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| UnknownKind(s.to_string()))
    }
}
