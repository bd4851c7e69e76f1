//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and the per-kind list calls
//! that make up a snapshot.

mod convert;
mod fetch;

pub use convert::{
    cron_job, daemon_set, deployment, horizontal_pod_autoscaler, ingress, job,
    persistent_volume_claim, pod, replica_set, service, stateful_set,
};
pub use fetch::{KubeLister, ListQuery, ResourceLister, fetch_snapshot};

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::path::Path;

/// Initialize and return a Kubernetes client
///
/// With an explicit kubeconfig path the current context of that file is used.
/// Otherwise the default loading strategy applies:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .with_context(|| format!("Failed to build config from {}", path.display()))?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes config")?,
    };

    tracing::debug!("Connecting to {}", config.cluster_url);
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

/// Fail early with a readable error if the namespace does not exist or cannot
/// be read with the current credentials
pub async fn ensure_namespace(client: &Client, namespace: &str) -> Result<()> {
    let api: Api<Namespace> = Api::all(client.clone());
    api.get(namespace)
        .await
        .with_context(|| format!("Failed to get namespace {:?}", namespace))?;
    Ok(())
}
