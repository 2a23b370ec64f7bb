//! Top-level pipeline spec and pod template

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::step::Step;
use crate::volume::Volume;

/// Pipeline spec handed to the pod compiler.
///
/// Volume names are looked up by steps but their uniqueness is not enforced
/// here; the first declared volume with a matching name wins.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    /// Pod-level metadata and scheduling template
    #[serde(default)]
    pub pod: PodTemplate,
    /// Auxiliary volumes shared between steps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    /// Steps in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Spec {
    /// Create a spec for a pod with the given name and namespace
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            pod: PodTemplate {
                name: name.into(),
                namespace: namespace.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Add a volume
    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volumes.push(volume);
        self
    }

    /// Add a step
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// Pod-level template copied onto the compiled Pod
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    /// Pod name
    #[serde(default)]
    pub name: String,
    /// Pod namespace
    #[serde(default)]
    pub namespace: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    /// Service account the pod runs as (empty for the namespace default)
    #[serde(default)]
    pub service_account_name: String,
    /// Node selector
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    /// Tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

/// Scheduling toleration for tainted nodes
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    /// Taint key the toleration applies to (empty matches all keys with `Exists`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// `Exists` or `Equal`
    #[serde(default)]
    pub operator: String,
    /// Taint effect (`NoSchedule`, `PreferNoSchedule`, `NoExecute`)
    #[serde(default)]
    pub effect: String,
    /// Taint value matched with `Equal`
    #[serde(default)]
    pub value: String,
    /// How long a `NoExecute` taint is tolerated. Absent means forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
}
