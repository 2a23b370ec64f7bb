//! Pod compiler for kubestep pipelines
//!
//! Compiles an engine-agnostic [`kubestep_spec::Spec`] into a Kubernetes
//! [`k8s::Pod`]. Pure compilation crate: no API client, no retries, no
//! cluster state.
//!
//! # Usage
//!
//! ```rust,ignore
//! let compiled = PodCompiler::new(&spec)
//!     .with_placeholder_image("registry.internal/placeholder:1")
//!     .compile();
//! let pod = compiled.into_strict()?.pod;
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod k8s;

pub use compiler::{compile_pod, CompiledPod, PodCompiler, UnresolvedMount};
pub use config::{CompilerConfig, SecretMode};
pub use error::CompileError;

/// Result type alias using [`CompileError`]
pub type Result<T> = std::result::Result<T, CompileError>;
