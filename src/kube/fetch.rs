//! Snapshot fetching
//!
//! One list call per namespaced kind. The first failing call aborts the fetch:
//! a snapshot with a missing kind would draw a misleading graph.

use super::convert;
use crate::error::{BoxError, FetchError};
use crate::models::{ResourceKind, ResourceRecord};
use crate::snapshot::Snapshot;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v1::HorizontalPodAutoscaler;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
use kube::Api;
use kube::api::ListParams;

/// Optional selectors applied to every list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub label_selector: Option<String>,
    pub field_selector: Option<String>,
}

impl ListQuery {
    fn to_list_params(&self) -> ListParams {
        let mut params = ListParams::default();
        if let Some(labels) = self.label_selector.as_deref().filter(|s| !s.is_empty()) {
            params = params.labels(labels);
        }
        if let Some(fields) = self.field_selector.as_deref().filter(|s| !s.is_empty()) {
            params = params.fields(fields);
        }
        params
    }
}

/// Source of per-kind resource collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceLister: Send + Sync {
    /// List every object of `kind` in `namespace` matching `query`
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        query: &ListQuery,
    ) -> Result<Vec<ResourceRecord>, BoxError>;
}

/// Lists resources through the Kubernetes API
pub struct KubeLister {
    client: kube::Client,
}

impl KubeLister {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceLister for KubeLister {
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        query: &ListQuery,
    ) -> Result<Vec<ResourceRecord>, BoxError> {
        let client = &self.client;
        let params = query.to_list_params();

        macro_rules! list_records {
            ($type:ty, $convert:path) => {{
                let api: Api<$type> = Api::namespaced(client.clone(), namespace);
                let list = api.list(&params).await?;
                Ok(list.items.iter().map($convert).collect())
            }};
        }

        match kind {
            ResourceKind::Service => list_records!(Service, convert::service),
            ResourceKind::PersistentVolumeClaim => {
                list_records!(PersistentVolumeClaim, convert::persistent_volume_claim)
            }
            ResourceKind::Pod => list_records!(Pod, convert::pod),
            ResourceKind::StatefulSet => list_records!(StatefulSet, convert::stateful_set),
            ResourceKind::DaemonSet => list_records!(DaemonSet, convert::daemon_set),
            ResourceKind::ReplicaSet => list_records!(ReplicaSet, convert::replica_set),
            ResourceKind::Deployment => list_records!(Deployment, convert::deployment),
            ResourceKind::Job => list_records!(Job, convert::job),
            ResourceKind::CronJob => list_records!(CronJob, convert::cron_job),
            ResourceKind::Ingress => list_records!(Ingress, convert::ingress),
            ResourceKind::HorizontalPodAutoscaler => {
                list_records!(HorizontalPodAutoscaler, convert::horizontal_pod_autoscaler)
            }
            ResourceKind::Namespace => Err(format!("{} is not a namespaced kind", kind).into()),
        }
    }
}

/// Fetch a snapshot of `namespace`, one list call per namespaced kind
pub async fn fetch_snapshot(
    lister: &dyn ResourceLister,
    namespace: &str,
    query: &ListQuery,
) -> Result<Snapshot, FetchError> {
    let mut collections = Vec::new();

    for kind in ResourceKind::namespaced() {
        let records = lister
            .list(kind, namespace, query)
            .await
            .map_err(|source| FetchError {
                kind,
                namespace: namespace.to_string(),
                source,
            })?;
        tracing::debug!("Listed {} {} in {}", records.len(), kind.name(), namespace);
        collections.push((kind, records));
    }

    Ok(Snapshot::from_collections(namespace, collections))
}
