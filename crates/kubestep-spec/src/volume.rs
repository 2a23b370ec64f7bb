//! Volume declarations shared between steps

use serde::{Deserialize, Serialize};

/// A declared volume.
///
/// Exactly one variant is expected to be populated. A value with neither is
/// tolerated and ignored by the compiler.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Ephemeral node-local scratch volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<VolumeEmptyDir>,
    /// Directory on the executing node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_path: Option<VolumeHostPath>,
}

impl Volume {
    /// Create an emptyDir volume
    pub fn empty_dir(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            empty_dir: Some(VolumeEmptyDir {
                id: id.into(),
                name: name.into(),
            }),
            host_path: None,
        }
    }

    /// Create a hostPath volume
    pub fn host_path(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            empty_dir: None,
            host_path: Some(VolumeHostPath {
                id: id.into(),
                name: name.into(),
                path: path.into(),
            }),
        }
    }

    /// Assigned id of the populated variant
    pub fn id(&self) -> Option<&str> {
        match (&self.empty_dir, &self.host_path) {
            (Some(v), _) => Some(v.id.as_str()),
            (None, Some(v)) => Some(v.id.as_str()),
            (None, None) => None,
        }
    }

    /// Logical name of the populated variant
    pub fn name(&self) -> Option<&str> {
        match (&self.empty_dir, &self.host_path) {
            (Some(v), _) => Some(v.name.as_str()),
            (None, Some(v)) => Some(v.name.as_str()),
            (None, None) => None,
        }
    }
}

/// emptyDir volume
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct VolumeEmptyDir {
    /// Generated id, used as the runtime volume name
    pub id: String,
    /// Name steps use to reference the volume
    pub name: String,
}

/// hostPath volume
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct VolumeHostPath {
    /// Generated id, used as the runtime volume name
    pub id: String,
    /// Name steps use to reference the volume
    pub name: String,
    /// Path on the node
    pub path: String,
}
