//! Typed errors the orchestrator needs to tell apart

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user refused to overwrite the target or interrupted a prompt
    #[error("Operation cancelled")]
    Cancelled,

    /// A template identifier that no provider can resolve
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    /// Remote template or catalog download failed
    #[error("Failed to download {what}: {reason}")]
    Download { what: String, reason: String },
}

impl ScaffoldError {
    /// True if `err` (or anything in its chain) is a cancellation
    pub fn is_cancelled(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<ScaffoldError>(),
                Some(ScaffoldError::Cancelled)
            )
        })
    }
}
