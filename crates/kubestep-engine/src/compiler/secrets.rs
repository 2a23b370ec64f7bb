//! Per-step Secret generation for `SecretMode::Reference`
//!
//! Each step with secrets gets an Opaque Secret named after the step id,
//! loaded into its container through `envFrom`.

use kubestep_spec::Step;

use crate::k8s::{EnvFromSource, Secret, SecretEnvSource};

pub(crate) fn compile(step: &Step, namespace: &str) -> Option<Secret> {
    if step.secrets.is_empty() {
        return None;
    }

    let secret = step.secrets.iter().fold(Secret::new(&step.id, namespace), |secret, s| {
        secret.with_data(&s.env, String::from_utf8_lossy(&s.data))
    });
    Some(secret)
}

pub(crate) fn env_from(step: &Step) -> Vec<EnvFromSource> {
    if step.secrets.is_empty() {
        return Vec::new();
    }

    vec![EnvFromSource {
        secret_ref: Some(SecretEnvSource {
            name: step.id.clone(),
        }),
    }]
}
