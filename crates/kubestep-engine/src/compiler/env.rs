//! Step environment compilation
//!
//! Order is fixed: explicit variables, then inlined secrets, then the node
//! identity variable. Names are not deduplicated; when a variable and a
//! secret share a name the kubelet's last-write-wins applies.

use kubestep_spec::Step;

use crate::config::{CompilerConfig, SecretMode};
use crate::k8s::{EnvVar, FIELD_PATH_NODE_NAME};

pub(crate) fn compile(step: &Step, config: &CompilerConfig) -> Vec<EnvVar> {
    let mut env = Vec::with_capacity(step.envs.len() + step.secrets.len() + 1);

    env.extend(step.envs.iter().map(|(k, v)| EnvVar::literal(k, v)));

    // Reference mode delivers secrets through envFrom instead
    if config.secret_mode == SecretMode::Inline {
        env.extend(
            step.secrets
                .iter()
                .map(|s| EnvVar::literal(&s.env, String::from_utf8_lossy(&s.data))),
        );
    }

    env.push(EnvVar::from_field(&config.node_name_env, FIELD_PATH_NODE_NAME));
    env
}
