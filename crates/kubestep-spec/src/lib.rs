//! Engine-agnostic pipeline spec for kubestep
//!
//! A [`Spec`] is what an upstream loader produces from pipeline configuration:
//! a pod template, the auxiliary volumes, and the ordered steps. The pod
//! compiler in `kubestep-engine` turns it into a Kubernetes Pod.

#![deny(missing_docs)]

mod spec;
mod step;
mod volume;

pub use spec::{PodTemplate, Spec, Toleration};
pub use step::{PullPolicy, Step, StepSecret, VolumeMount};
pub use volume::{Volume, VolumeEmptyDir, VolumeHostPath};
