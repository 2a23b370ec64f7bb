//! Pipeline steps

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One execution unit; becomes one container of the compiled Pod.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique step identifier, used as the container name
    pub id: String,
    /// Binary to execute (container `command`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entrypoint: Vec<String>,
    /// Arguments (container `args`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Image pull policy
    #[serde(default)]
    pub pull: PullPolicy,
    /// Working directory (empty for the image default)
    #[serde(default)]
    pub working_dir: String,
    /// Run the container privileged
    #[serde(default)]
    pub privileged: bool,
    /// Volumes mounted into the step, referenced by volume name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,
    /// Explicit environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
    /// Secrets exposed to the step as environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<StepSecret>,
}

impl Step {
    /// Create a step with the given id and all other fields empty
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the entrypoint
    pub fn with_entrypoint<I, S>(mut self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = entrypoint.into_iter().map(Into::into).collect();
        self
    }

    /// Set the arguments
    pub fn with_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pull policy
    pub fn with_pull(mut self, pull: PullPolicy) -> Self {
        self.pull = pull;
        self
    }

    /// Mount the volume named `name` at `path`
    pub fn with_mount(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.volumes.push(VolumeMount {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// Add an explicit environment variable
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(name.into(), value.into());
        self
    }

    /// Add a secret exposed as the environment variable `env`
    pub fn with_secret(mut self, env: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.secrets.push(StepSecret {
            env: env.into(),
            data: data.into(),
        });
        self
    }
}

/// Reference from a step to a declared volume
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct VolumeMount {
    /// Logical volume name (matches `Volume` name, not id)
    pub name: String,
    /// Mount path inside the container
    pub path: String,
}

/// Secret value exposed to a step
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StepSecret {
    /// Environment variable name
    pub env: String,
    /// Raw secret bytes
    #[serde(default)]
    pub data: Vec<u8>,
}

impl fmt::Debug for StepSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSecret")
            .field("env", &self.env)
            .field("data", &"<redacted>")
            .finish()
    }
}

/// Image pull policy declared on a step
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PullPolicy {
    /// Always pull before running
    Always,
    /// Pull only when the image is not present on the node
    IfNotExists,
    /// Never pull
    Never,
    /// Not set; unrecognized values also land here
    #[default]
    #[serde(other)]
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_policy_parses_known_values() {
        let parse = |s: &str| serde_json::from_value::<PullPolicy>(serde_json::json!(s)).unwrap();
        assert_eq!(parse("always"), PullPolicy::Always);
        assert_eq!(parse("if-not-exists"), PullPolicy::IfNotExists);
        assert_eq!(parse("never"), PullPolicy::Never);
        assert_eq!(parse("default"), PullPolicy::Default);
    }

    #[test]
    fn pull_policy_unknown_falls_back_to_default() {
        let policy: PullPolicy = serde_json::from_value(serde_json::json!("sometimes")).unwrap();
        assert_eq!(policy, PullPolicy::Default);
    }

    #[test]
    fn step_with_unknown_pull_round_trips_as_default() {
        let step: Step =
            serde_json::from_value(serde_json::json!({"id": "build", "pull": "on-tuesdays"}))
                .unwrap();
        assert_eq!(step.pull, PullPolicy::Default);
        assert_eq!(step, Step::new("build"));

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["pull"], "default");
    }

    #[test]
    fn secret_debug_hides_data() {
        let step = Step::new("deploy").with_secret("TOKEN", "hunter2");
        let rendered = format!("{:?}", step);
        assert!(rendered.contains("TOKEN"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn builder_sets_fields() {
        let step = Step::new("build")
            .with_entrypoint(["/bin/sh", "-c"])
            .with_command(["make"])
            .with_pull(PullPolicy::Always)
            .with_mount("cache", "/cache")
            .with_env("CI", "true");

        assert_eq!(step.entrypoint, vec!["/bin/sh", "-c"]);
        assert_eq!(step.command, vec!["make"]);
        assert_eq!(step.pull, PullPolicy::Always);
        assert_eq!(
            step.volumes,
            vec![VolumeMount {
                name: "cache".to_string(),
                path: "/cache".to_string()
            }]
        );
        assert_eq!(step.envs.get("CI"), Some(&"true".to_string()));
    }
}
