//! Conversions from typed Kubernetes objects into resource records

use crate::models::{IngressPath, IngressRule, ObjectRef, ResourceDetails, ResourceRecord};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v1::HorizontalPodAutoscaler;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Name, labels and owner references shared by every kind
fn from_meta(meta: &ObjectMeta) -> ResourceRecord {
    let mut record = ResourceRecord::new(meta.name.clone().unwrap_or_default());
    if let Some(labels) = &meta.labels {
        record.labels = labels.clone();
    }
    record.owner_references = meta
        .owner_references
        .iter()
        .flatten()
        .map(|owner| ObjectRef::new(owner.kind.clone(), owner.name.clone()))
        .collect();
    record
}

pub fn service(svc: &Service) -> ResourceRecord {
    let selector = svc
        .spec
        .as_ref()
        .and_then(|s| s.selector.clone())
        .unwrap_or_default();
    from_meta(&svc.metadata).with_details(ResourceDetails::Service { selector })
}

pub fn persistent_volume_claim(pvc: &PersistentVolumeClaim) -> ResourceRecord {
    from_meta(&pvc.metadata)
}

pub fn pod(pod: &Pod) -> ResourceRecord {
    let claim_names = pod
        .spec
        .as_ref()
        .and_then(|s| s.volumes.as_ref())
        .into_iter()
        .flatten()
        .filter_map(|volume| volume.persistent_volume_claim.as_ref())
        .map(|claim| claim.claim_name.clone())
        .collect();
    from_meta(&pod.metadata).with_details(ResourceDetails::Pod { claim_names })
}

pub fn stateful_set(sts: &StatefulSet) -> ResourceRecord {
    from_meta(&sts.metadata)
}

pub fn daemon_set(ds: &DaemonSet) -> ResourceRecord {
    from_meta(&ds.metadata)
}

pub fn replica_set(rs: &ReplicaSet) -> ResourceRecord {
    let desired_replicas = rs.spec.as_ref().and_then(|s| s.replicas);
    let current_replicas = rs.status.as_ref().map(|s| s.replicas).unwrap_or(0);
    from_meta(&rs.metadata).with_details(ResourceDetails::ReplicaSet {
        desired_replicas,
        current_replicas,
    })
}

pub fn deployment(deploy: &Deployment) -> ResourceRecord {
    from_meta(&deploy.metadata)
}

pub fn job(job: &Job) -> ResourceRecord {
    from_meta(&job.metadata)
}

pub fn cron_job(cronjob: &CronJob) -> ResourceRecord {
    from_meta(&cronjob.metadata)
}

pub fn ingress(ing: &Ingress) -> ResourceRecord {
    let rules = ing
        .spec
        .as_ref()
        .and_then(|s| s.rules.as_ref())
        .into_iter()
        .flatten()
        .map(|rule| IngressRule {
            host: rule.host.clone(),
            paths: rule
                .http
                .iter()
                .flat_map(|http| http.paths.iter())
                .map(|path| IngressPath {
                    path: path.path.clone(),
                    service: path.backend.service.as_ref().map(|s| s.name.clone()),
                })
                .collect(),
        })
        .collect();
    from_meta(&ing.metadata).with_details(ResourceDetails::Ingress { rules })
}

pub fn horizontal_pod_autoscaler(hpa: &HorizontalPodAutoscaler) -> ResourceRecord {
    let record = from_meta(&hpa.metadata);
    match hpa.spec.as_ref() {
        Some(spec) => record.with_details(ResourceDetails::Autoscaler {
            scale_target: ObjectRef::new(
                spec.scale_target_ref.kind.clone(),
                spec.scale_target_ref.name.clone(),
            ),
        }),
        None => record,
    }
}
