//! Identifier and label helpers
//!
//! Resource names may contain `.` and `-`, which Graphviz does not accept in
//! unquoted identifiers, so ids are built from escaped names.

use crate::models::ResourceKind;
use std::path::Path;

const CLUSTER_PREFIX: &str = "cluster_";
const RANK_PREFIX: &str = "rank_";
const ICON_SUFFIX: &str = "-128.png";

/// Replace every `.` and `-` with `_`
///
/// ex) `my-app.v1` -> `my_app_v1`. Distinct names can escape to the same id.
pub fn escape_name(name: &str) -> String {
    name.replace(['.', '-'], "_")
}

/// Node id of a resource, ex) `pod_my_pod`
pub fn resource_id(kind: ResourceKind, name: &str) -> String {
    format!("{}_{}", kind.code(), escape_name(name))
}

/// Name of the namespace cluster, ex) `cluster_my_namespace`
pub fn cluster_name(namespace: &str) -> String {
    format!("{CLUSTER_PREFIX}{}", escape_name(namespace))
}

/// Name of the subgraph holding one rank, ex) `rank_1`
pub fn rank_name(rank: usize) -> String {
    format!("{RANK_PREFIX}{rank}")
}

/// Id of the invisible anchor node of a rank, ex) `1`
pub fn rank_anchor(rank: usize) -> String {
    rank.to_string()
}

/// Icon image of a kind, ex) `/icons/pod-128.png`
pub fn icon_path(icons_dir: &Path, kind: ResourceKind) -> String {
    icons_dir
        .join(format!("{}{ICON_SUFFIX}", kind.code()))
        .display()
        .to_string()
}

/// HTML-like label with the kind icon above the name
///
/// ex) `<<TABLE BORDER="0"><TR><TD><IMG SRC="/icons/pod-128.png" /></TD></TR><TR><TD>my-pod</TD></TR></TABLE>>`
pub fn resource_label(icons_dir: &Path, kind: ResourceKind, name: &str) -> String {
    format!(
        "<<TABLE BORDER=\"0\"><TR><TD><IMG SRC=\"{}\" /></TD></TR><TR><TD>{}</TD></TR></TABLE>>",
        icon_path(icons_dir, kind),
        name
    )
}
