//! Compiler error types
//!
//! `PodCompiler::compile` itself never fails. These errors come from callers
//! opting into strict handling or serializing the result.

use crate::compiler::UnresolvedMount;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("pod '{pod}' references undeclared volumes: {}", format_mounts(.mounts))]
    UnresolvedMounts {
        pod: String,
        mounts: Vec<UnresolvedMount>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_mounts(mounts: &[UnresolvedMount]) -> String {
    mounts
        .iter()
        .map(|m| format!("{}/{}", m.step, m.volume))
        .collect::<Vec<_>>()
        .join(", ")
}
