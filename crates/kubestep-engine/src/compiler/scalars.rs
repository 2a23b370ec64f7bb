//! Pull policy and toleration mapping

use kubestep_spec::{PullPolicy, Toleration};

use crate::k8s::{self, PULL_ALWAYS, PULL_IF_NOT_PRESENT, PULL_NEVER};

/// Map a step pull policy onto the Kubernetes value.
///
/// Unset and unrecognized policies fall back to `IfNotPresent`.
pub(crate) fn pull_policy(policy: PullPolicy) -> &'static str {
    match policy {
        PullPolicy::Always => PULL_ALWAYS,
        PullPolicy::Never => PULL_NEVER,
        PullPolicy::IfNotExists | PullPolicy::Default => PULL_IF_NOT_PRESENT,
    }
}

pub(crate) fn tolerations(tolerations: &[Toleration]) -> Vec<k8s::Toleration> {
    tolerations
        .iter()
        .map(|t| k8s::Toleration {
            key: t.key.clone().filter(|k| !k.is_empty()),
            operator: non_empty(&t.operator),
            value: non_empty(&t.value),
            effect: non_empty(&t.effect),
            toleration_seconds: t.toleration_seconds,
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
