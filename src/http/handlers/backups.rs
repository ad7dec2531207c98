//! Backup archive handlers. All of them require the admin role.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::auth::{Identity, Role};
use crate::error::PanelError;
use crate::http::server::AppState;

/// POST /api/backup
pub async fn create_backup(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<serde_json::Value>, PanelError> {
    identity.require(Role::Admin)?;
    let file = state.backups.create().await?;
    tracing::info!(user = %identity.username, file = %file, "Backup requested");
    Ok(Json(serde_json::json!({ "ok": true, "file": file })))
}

/// GET /api/backup: newest-first archive names.
pub async fn list_backups(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<String>>, PanelError> {
    identity.require(Role::Admin)?;
    Ok(Json(state.backups.list().await?))
}

/// GET /api/backup/{name}: binary download.
pub async fn download_backup(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, PanelError> {
    identity.require(Role::Admin)?;
    let path = state.backups.resolve(&name).await?;
    let bytes = tokio::fs::read(&path).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/gzip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    )
        .into_response())
}
