//! Data models for Kubernetes resources
//!
//! Resource kinds, their layout ranks, and the kind-agnostic records the
//! snapshot stores.

mod resource;
mod resource_kind;

pub use resource::{IngressPath, IngressRule, ObjectRef, ResourceDetails, ResourceRecord};
pub use resource_kind::{RANKS, ResourceKind, UnknownKind};
