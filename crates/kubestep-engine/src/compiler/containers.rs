//! Step → container compilation

use kubestep_spec::{Spec, Step};

use super::{env, scalars, secrets, volumes};
use crate::config::{CompilerConfig, SecretMode};
use crate::k8s::{Container, SecurityContext};

/// A compiled container plus the volume names its step could not resolve
#[derive(Debug)]
pub(crate) struct CompiledContainer {
    pub container: Container,
    pub unresolved: Vec<String>,
}

/// Compile one step.
///
/// The privileged flag is copied without checks; the spec is trusted.
pub(crate) fn compile(spec: &Spec, step: &Step, config: &CompilerConfig) -> CompiledContainer {
    let mounts = volumes::resolve_mounts(spec, step);

    let env_from = match config.secret_mode {
        SecretMode::Inline => Vec::new(),
        SecretMode::Reference => secrets::env_from(step),
    };

    let container = Container {
        name: step.id.clone(),
        image: config.placeholder_image.clone(),
        command: step.entrypoint.clone(),
        args: step.command.clone(),
        working_dir: step.working_dir.clone(),
        env: env::compile(step, config),
        env_from,
        image_pull_policy: scalars::pull_policy(step.pull).to_string(),
        volume_mounts: mounts.mounts,
        security_context: Some(SecurityContext {
            privileged: Some(step.privileged),
        }),
    };

    CompiledContainer {
        container,
        unresolved: mounts.unresolved,
    }
}
