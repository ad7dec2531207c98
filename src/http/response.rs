//! Mapping of panel errors onto HTTP responses.
//!
//! # Design Decisions
//! - One place owns the error → status mapping; handlers just use `?`
//! - Validation failures return the validator's full captured output so
//!   the operator can diagnose the syntax error directly
//! - Every other failure returns a short plain-text reason; internal
//!   details go to the log, not the client

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{PanelError, RollbackOutcome};

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PanelError::InvalidName(_) => (StatusCode::BAD_REQUEST, "Invalid name.".to_string()),
            PanelError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found.", what)),
            PanelError::AlreadyExists(_) => {
                (StatusCode::BAD_REQUEST, "File already exists.".to_string())
            }
            PanelError::AlreadyEnabled(_) => {
                (StatusCode::BAD_REQUEST, "Site already enabled.".to_string())
            }
            PanelError::NotEnabled(_) => {
                (StatusCode::BAD_REQUEST, "Site not enabled.".to_string())
            }
            PanelError::ValidationFailed { output, rollback } => {
                let revert_note = match rollback {
                    RollbackOutcome::Restored => "Changes reverted.",
                    RollbackOutcome::Failed => {
                        "Rollback failed; previous content could not be restored."
                    }
                };
                (
                    StatusCode::BAD_REQUEST,
                    format!(
                        "nginx -t failed. {}\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
                        revert_note, output.stdout, output.stderr
                    ),
                )
            }
            PanelError::CorruptIndex { site, reason } => {
                tracing::error!(site = %site, reason = %reason, "Corrupt version index");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read history.".to_string(),
                )
            }
            PanelError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden: insufficient permissions.".to_string(),
            ),
            PanelError::Io(e) => {
                tracing::error!(error = %e, "I/O failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "I/O failure.".to_string())
            }
            PanelError::Json(e) => {
                tracing::error!(error = %e, "JSON failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error.".to_string())
            }
            PanelError::Process(reason) => {
                tracing::error!(reason = %reason, "External process failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("External command failed:\n{}", reason),
                )
            }
        };
        (status, body).into_response()
    }
}
