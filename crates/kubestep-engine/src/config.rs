//! Compiler configuration
//!
//! Injected by the runner that embeds the compiler; every field has a default
//! so a partial YAML/JSON block is enough.

use serde::{Deserialize, Serialize};

/// Image every step container is created with until the runner swaps in the
/// step's real image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "drone/placeholder:1";

/// Environment variable exposing the node a step runs on
pub const DEFAULT_NODE_NAME_ENV: &str = "KUBERNETES_NODE";

/// How step secrets reach the container
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SecretMode {
    /// Inline secret values as plaintext `env` entries
    #[default]
    Inline,
    /// Emit one Secret per step and load it through `envFrom`
    Reference,
}

/// Pod compiler settings
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Image set on every compiled container
    pub placeholder_image: String,
    /// Name of the trailing node-identity variable
    pub node_name_env: String,
    /// Secret delivery
    pub secret_mode: SecretMode,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            node_name_env: DEFAULT_NODE_NAME_ENV.to_string(),
            secret_mode: SecretMode::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"placeholderImage": "registry.local/pause:1"}"#).unwrap();
        assert_eq!(config.placeholder_image, "registry.local/pause:1");
        assert_eq!(config.node_name_env, DEFAULT_NODE_NAME_ENV);
        assert_eq!(config.secret_mode, SecretMode::Inline);
    }

    #[test]
    fn secret_mode_parses_reference() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"secretMode": "reference"}"#).unwrap();
        assert_eq!(config.secret_mode, SecretMode::Reference);
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
    }
}
