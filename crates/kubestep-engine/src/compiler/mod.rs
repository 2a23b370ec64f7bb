//! PodCompiler — compiles a pipeline `Spec` into a Kubernetes Pod
//!
//! Composition, top-down:
//! - pod metadata and scheduling copied from the spec's pod template
//! - `volumes` → runtime volumes keyed by volume id
//! - `containers` → one container per step (mounts via `volumes`, env via `env`)
//! - `scalars` → pull policy and tolerations
//! - `secrets` → per-step Secrets when `SecretMode::Reference` is configured
//!
//! Compilation is total. Dangling volume references are dropped from the
//! container and reported on the `CompiledPod` instead of failing.

mod containers;
mod env;
mod scalars;
mod secrets;
mod volumes;

use kubestep_spec::Spec;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{CompilerConfig, SecretMode};
use crate::error::CompileError;
use crate::Result;
use crate::k8s::{ObjectMeta, Pod, PodSpec, Secret, RESTART_POLICY_NEVER};

/// A step volume mount whose name matched no declared volume
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UnresolvedMount {
    /// Step (container) the mount belonged to
    pub step: String,
    /// Volume name that could not be resolved
    pub volume: String,
}

/// Complete compiled output for a Spec
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledPod {
    /// The Pod to submit
    pub pod: Pod,
    /// Per-step Secrets referenced by the Pod (reference mode only)
    pub secrets: Vec<Secret>,
    /// Mounts dropped because their volume was never declared
    pub unresolved: Vec<UnresolvedMount>,
}

impl CompiledPod {
    /// True when every step mount was resolved
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Reject the compilation if any mount was dropped
    pub fn into_strict(self) -> Result<Self> {
        if self.unresolved.is_empty() {
            Ok(self)
        } else {
            Err(CompileError::UnresolvedMounts {
                pod: self.pod.metadata.name,
                mounts: self.unresolved,
            })
        }
    }

    /// Serialize the Pod to its JSON wire form
    pub fn pod_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.pod)?)
    }
}

/// Builder-style compiler over a borrowed Spec
pub struct PodCompiler<'a> {
    spec: &'a Spec,
    config: CompilerConfig,
}

impl<'a> PodCompiler<'a> {
    /// Create a compiler with default configuration
    pub fn new(spec: &'a Spec) -> Self {
        Self {
            spec,
            config: CompilerConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the placeholder image
    pub fn with_placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.config.placeholder_image = image.into();
        self
    }

    /// Select how step secrets are delivered
    pub fn with_secret_mode(mut self, mode: SecretMode) -> Self {
        self.config.secret_mode = mode;
        self
    }

    /// Compile the Spec. Never fails; see [`CompiledPod::into_strict`].
    #[instrument(
        skip(self),
        fields(pod = %self.spec.pod.name, namespace = %self.spec.pod.namespace)
    )]
    pub fn compile(&self) -> CompiledPod {
        let template = &self.spec.pod;

        let mut containers = Vec::with_capacity(self.spec.steps.len());
        let mut unresolved = Vec::new();
        let mut step_secrets = Vec::new();

        for step in &self.spec.steps {
            let compiled = containers::compile(self.spec, step, &self.config);
            unresolved.extend(compiled.unresolved.into_iter().map(|volume| UnresolvedMount {
                step: step.id.clone(),
                volume,
            }));
            containers.push(compiled.container);

            if self.config.secret_mode == SecretMode::Reference {
                step_secrets.extend(secrets::compile(step, &template.namespace));
            }
        }

        let spec = PodSpec {
            service_account_name: template.service_account_name.clone(),
            restart_policy: RESTART_POLICY_NEVER.to_string(),
            volumes: volumes::compile(&self.spec.volumes),
            containers,
            node_selector: template.node_selector.clone(),
            tolerations: scalars::tolerations(&template.tolerations),
        };

        let metadata = ObjectMeta {
            name: template.name.clone(),
            namespace: template.namespace.clone(),
            labels: template.labels.clone(),
            annotations: template.annotations.clone(),
        };

        debug!(
            volumes = spec.volumes.len(),
            containers = spec.containers.len(),
            secrets = step_secrets.len(),
            unresolved = unresolved.len(),
            "compiled pod"
        );

        CompiledPod {
            pod: Pod::new(metadata, spec),
            secrets: step_secrets,
            unresolved,
        }
    }
}

/// Compile a Spec with default configuration
pub fn compile_pod(spec: &Spec) -> CompiledPod {
    PodCompiler::new(spec).compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubestep_spec::{PullPolicy, Step, Toleration, Volume};

    fn pipeline() -> Spec {
        let mut spec = Spec::new("drone-abc", "ci")
            .with_volume(Volume::empty_dir("vol-ws", "workspace"))
            .with_step(
                Step::new("clone")
                    .with_entrypoint(["/bin/drone-git"])
                    .with_mount("workspace", "/drone/src"),
            )
            .with_step(
                Step::new("build")
                    .with_entrypoint(["/bin/sh", "-c"])
                    .with_command(["make"])
                    .with_mount("workspace", "/drone/src")
                    .with_mount("docker", "/var/run")
                    .with_secret("TOKEN", "s3cr3t"),
            );
        spec.pod.labels.insert("io.drone.build".into(), "42".into());
        spec.pod.annotations.insert("io.drone.repo".into(), "octo/hello".into());
        spec.pod.service_account_name = "runner".into();
        spec.pod.node_selector.insert("kubernetes.io/os".into(), "linux".into());
        spec
    }

    #[test]
    fn empty_spec_compiles_to_empty_pod() {
        let compiled = compile_pod(&Spec::default());

        assert!(compiled.pod.spec.volumes.is_empty());
        assert!(compiled.pod.spec.containers.is_empty());
        assert_eq!(compiled.pod.spec.restart_policy, "Never");
        assert!(compiled.is_complete());
    }

    #[test]
    fn metadata_copied_verbatim() {
        let compiled = compile_pod(&pipeline());
        let meta = &compiled.pod.metadata;

        assert_eq!(meta.name, "drone-abc");
        assert_eq!(meta.namespace, "ci");
        assert_eq!(meta.labels.get("io.drone.build"), Some(&"42".to_string()));
        assert_eq!(
            meta.annotations.get("io.drone.repo"),
            Some(&"octo/hello".to_string())
        );
        assert_eq!(compiled.pod.spec.service_account_name, "runner");
        assert_eq!(
            compiled.pod.spec.node_selector.get("kubernetes.io/os"),
            Some(&"linux".to_string())
        );
    }

    #[test]
    fn empty_name_passes_through() {
        let compiled = compile_pod(&Spec::new("", ""));
        assert_eq!(compiled.pod.metadata.name, "");
        assert_eq!(compiled.pod.metadata.namespace, "");
    }

    #[test]
    fn containers_follow_step_order() {
        let compiled = compile_pod(&pipeline());
        let names: Vec<_> = compiled
            .pod
            .spec
            .containers
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["clone", "build"]);
    }

    #[test]
    fn unresolved_mounts_reported_per_step() {
        let compiled = compile_pod(&pipeline());

        assert_eq!(compiled.pod.spec.containers[1].volume_mounts.len(), 1);
        assert_eq!(
            compiled.unresolved,
            vec![UnresolvedMount {
                step: "build".to_string(),
                volume: "docker".to_string(),
            }]
        );
        assert!(!compiled.is_complete());
    }

    #[test]
    fn strict_rejects_dangling_mounts() {
        let err = compile_pod(&pipeline()).into_strict().unwrap_err();
        match err {
            CompileError::UnresolvedMounts { pod, mounts } => {
                assert_eq!(pod, "drone-abc");
                assert_eq!(mounts.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_accepts_complete_pod() {
        let spec = Spec::new("p", "ns").with_step(Step::new("build"));
        assert!(compile_pod(&spec).into_strict().is_ok());
    }

    #[test]
    fn inline_mode_emits_no_secrets() {
        let compiled = compile_pod(&pipeline());
        assert!(compiled.secrets.is_empty());
        assert!(compiled.pod.spec.containers[1].env_from.is_empty());
    }

    #[test]
    fn reference_mode_emits_secret_per_step_with_secrets() {
        let spec = pipeline();
        let compiled = PodCompiler::new(&spec)
            .with_secret_mode(SecretMode::Reference)
            .compile();

        assert_eq!(compiled.secrets.len(), 1);
        assert_eq!(compiled.secrets[0].metadata.name, "build");
        assert_eq!(compiled.secrets[0].metadata.namespace, "ci");
        assert!(compiled.pod.spec.containers[0].env_from.is_empty());
        assert_eq!(compiled.pod.spec.containers[1].env_from.len(), 1);
    }

    #[test]
    fn placeholder_image_is_configurable() {
        let spec = pipeline();
        let compiled = PodCompiler::new(&spec)
            .with_placeholder_image("registry.local/pause:3")
            .compile();
        assert!(compiled
            .pod
            .spec
            .containers
            .iter()
            .all(|c| c.image == "registry.local/pause:3"));
    }

    #[test]
    fn compile_is_idempotent() {
        let mut spec = pipeline();
        spec.steps[1].envs.insert("B".into(), "2".into());
        spec.steps[1].envs.insert("A".into(), "1".into());
        spec.steps[1].pull = PullPolicy::Never;
        spec.pod.tolerations.push(Toleration {
            operator: "Exists".into(),
            ..Default::default()
        });

        let compiler = PodCompiler::new(&spec);
        assert_eq!(compiler.compile(), compiler.compile());
    }

    #[test]
    fn pod_json_has_wire_shape() {
        let json = compile_pod(&pipeline()).pod_json().unwrap();
        assert_eq!(json["apiVersion"], "v1");
        assert_eq!(json["kind"], "Pod");
        assert_eq!(json["spec"]["restartPolicy"], "Never");
        assert_eq!(json["spec"]["serviceAccountName"], "runner");
        assert_eq!(json["spec"]["containers"][0]["name"], "clone");
    }
}
