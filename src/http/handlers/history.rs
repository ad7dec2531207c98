//! Version history handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::PanelError;
use crate::history::VersionMeta;
use crate::http::server::AppState;
use crate::sites::SiteName;

/// GET /api/sites/{name}/versions: index array, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<VersionMeta>>, PanelError> {
    let name = SiteName::parse(&name)?;
    let index = state.versions.list(&name).await?;
    Ok(Json(index))
}

/// GET /api/sites/{name}/versions/{version_id}: raw historical content.
pub async fn version_content(
    State(state): State<AppState>,
    Path((name, version_id)): Path<(String, String)>,
) -> Result<String, PanelError> {
    let name = SiteName::parse(&name)?;
    state.versions.fetch(&name, &version_id).await
}
