//! Error taxonomy shared by all panel components.
//!
//! # Design Decisions
//! - Input-validation and state-conflict errors are detected before any
//!   file-system mutation
//! - `ValidationFailed` carries the validator's captured output plus the
//!   rollback outcome, so the caller always learns about the validation
//!   failure and can still inspect whether the revert succeeded
//! - No variant is allowed to crash the process; the HTTP layer maps each
//!   one to a response in `http::response`

use thiserror::Error;

use crate::nginx::command::CommandOutput;

/// Result of the best-effort revert performed after a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// Previous content was written back successfully.
    Restored,
    /// The rollback write itself failed; the live file may hold rejected
    /// content. Logged at the site of failure.
    Failed,
}

/// Errors that can occur during panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Input fails the site-name (or other path-segment) pattern.
    #[error("invalid name")]
    InvalidName(String),

    /// Referenced file, version or backup is absent.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Create refused because the target file already exists.
    #[error("site {0} already exists")]
    AlreadyExists(String),

    /// Enable refused because something already occupies the enabled path.
    #[error("site {0} already enabled")]
    AlreadyEnabled(String),

    /// Disable refused because no link exists at the enabled path.
    #[error("site {0} not enabled")]
    NotEnabled(String),

    /// The external syntax check rejected the candidate configuration.
    #[error("configuration failed validation (exit code {})", output.exit_code)]
    ValidationFailed {
        output: CommandOutput,
        rollback: RollbackOutcome,
    },

    /// A version index exists on disk but cannot be parsed.
    #[error("corrupt version index for {site}: {reason}")]
    CorruptIndex { site: String, reason: String },

    /// Authenticated identity does not meet the required role.
    #[error("insufficient permissions")]
    Forbidden,

    /// Read/write error not otherwise classified.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted JSON could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External utility invocation errored out.
    #[error("process error: {0}")]
    Process(String),
}
