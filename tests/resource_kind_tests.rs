//! Resource kind tests
//!
//! Tests for kind normalization and the rank table

use k8sviz::models::{RANKS, ResourceKind, UnknownKind};
use std::collections::HashSet;

#[test]
fn test_every_spelling_normalizes_in_any_case() {
    for &kind in ResourceKind::all() {
        let spellings = [kind.code(), kind.name()]
            .into_iter()
            .chain(kind.aliases().iter().copied());

        for spelling in spellings {
            for variant in [
                spelling.to_string(),
                spelling.to_uppercase(),
                capitalize(spelling),
            ] {
                assert_eq!(
                    ResourceKind::normalize(&variant),
                    Some(kind),
                    "{variant:?} should normalize to {kind}"
                );
            }
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[test]
fn test_unknown_kinds() {
    for reference in ["", "Kustomization", "HelmRelease", "pv", "node", "deploy "] {
        assert_eq!(ResourceKind::normalize(reference), None);
        assert_eq!(
            reference.parse::<ResourceKind>(),
            Err(UnknownKind(reference.to_string()))
        );
    }
}

#[test]
fn test_codes_are_unique() {
    let codes: HashSet<_> = ResourceKind::all().iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), ResourceKind::all().len());
}

#[test]
fn test_every_namespaced_kind_has_exactly_one_rank() {
    for kind in ResourceKind::namespaced() {
        let tiers = RANKS.iter().filter(|tier| tier.contains(&kind)).count();
        assert_eq!(tiers, 1, "{kind} must appear in exactly one rank");
    }
    assert_eq!(ResourceKind::Namespace.rank(), None);
}

#[test]
fn test_rank_order() {
    assert_eq!(ResourceKind::HorizontalPodAutoscaler.rank(), Some(0));
    assert_eq!(ResourceKind::CronJob.rank(), Some(0));
    assert_eq!(ResourceKind::Deployment.rank(), Some(1));
    assert_eq!(ResourceKind::DaemonSet.rank(), Some(2));
    assert_eq!(ResourceKind::Pod.rank(), Some(3));
    assert_eq!(ResourceKind::PersistentVolumeClaim.rank(), Some(4));
    assert_eq!(ResourceKind::Service.rank(), Some(5));
    assert_eq!(ResourceKind::Ingress.rank(), Some(6));
}
