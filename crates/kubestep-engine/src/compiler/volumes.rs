//! Volume compilation and mount resolution
//!
//! Runtime volumes are named by the declared volume's id, never its logical
//! name. Steps reference volumes by logical name; `resolve_mounts` maps
//! those references onto ids.

use kubestep_spec::{Spec, Step, Volume};

use crate::k8s::{self, HOST_PATH_DIRECTORY_OR_CREATE};

/// Compile declared volumes in order. Volumes with no populated variant are skipped.
pub(crate) fn compile(declared: &[Volume]) -> Vec<k8s::Volume> {
    let mut volumes = Vec::with_capacity(declared.len());

    for v in declared {
        if let Some(empty_dir) = &v.empty_dir {
            volumes.push(k8s::Volume::from_empty_dir(&empty_dir.id));
        }

        if let Some(host_path) = &v.host_path {
            volumes.push(k8s::Volume::from_host_path(
                &host_path.id,
                &host_path.path,
                Some(HOST_PATH_DIRECTORY_OR_CREATE.to_string()),
            ));
        }
    }

    volumes
}

/// Find the id of the first declared volume named `name`
pub(crate) fn lookup_volume_id<'a>(spec: &'a Spec, name: &str) -> Option<&'a str> {
    spec.volumes.iter().find_map(|v| {
        if let Some(empty_dir) = v.empty_dir.as_ref().filter(|e| e.name == name) {
            return Some(empty_dir.id.as_str());
        }
        v.host_path
            .as_ref()
            .filter(|h| h.name == name)
            .map(|h| h.id.as_str())
    })
}

/// Mounts for one step, split into resolved and dangling references
#[derive(Debug, Default)]
pub(crate) struct ResolvedMounts {
    pub mounts: Vec<k8s::VolumeMount>,
    /// Volume names with no matching declaration
    pub unresolved: Vec<String>,
}

/// Resolve a step's mounts against the declared volumes.
///
/// Dangling references never reach the container.
pub(crate) fn resolve_mounts(spec: &Spec, step: &Step) -> ResolvedMounts {
    let mut resolved = ResolvedMounts::default();

    for m in &step.volumes {
        match lookup_volume_id(spec, &m.name) {
            Some(id) => resolved.mounts.push(k8s::VolumeMount {
                name: id.to_string(),
                mount_path: m.path.clone(),
            }),
            None => resolved.unresolved.push(m.name.clone()),
        }
    }

    resolved
}
