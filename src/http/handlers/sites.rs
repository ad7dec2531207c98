//! Site CRUD, commit and toggle handlers.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::{Identity, Role};
use crate::error::PanelError;
use crate::http::handlers::client_ip;
use crate::http::server::AppState;
use crate::sites::{SiteName, SiteSummary};
use crate::templates::Template;

/// GET /api/sites
pub async fn list_sites(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteSummary>>, PanelError> {
    let sites = state.catalog.list(&state.toggler).await?;
    Ok(Json(sites))
}

/// GET /api/sites/{name}: raw file content.
pub async fn site_content(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, PanelError> {
    let name = SiteName::parse(&name)?;
    state.catalog.read(&name).await
}

/// GET /api/sites/{name}/meta
pub async fn site_meta(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, PanelError> {
    let name = SiteName::parse(&name)?;
    let enabled = state.toggler.is_enabled(&name).await;
    Ok(Json(serde_json::json!({
        "name": name.as_str(),
        "enabled": enabled,
    })))
}

/// PUT /api/sites/{name}: full replacement via the commit protocol.
pub async fn save_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Extension(identity): Extension<Identity>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: String,
) -> Result<String, PanelError> {
    identity.require(Role::Operator)?;
    let name = SiteName::parse(&name)?;
    let source = client_ip(&headers, addr);

    state
        .lifecycle
        .commit(&name, &body, &identity.username, &source)
        .await?;
    Ok("Saved and nginx -t OK.".to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    pub name: String,
    #[serde(default)]
    pub template_id: Option<String>,
}

/// POST /api/sites: new file from template or default skeleton.
pub async fn create_site(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteRequest>,
) -> Result<String, PanelError> {
    let name = SiteName::parse(&request.name)?;
    state
        .catalog
        .create(&name, request.template_id.as_deref())
        .await?;
    Ok(format!("Site created: {}", name))
}

/// POST /api/sites/{name}/enable
pub async fn enable_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Extension(identity): Extension<Identity>,
) -> Result<String, PanelError> {
    identity.require(Role::Admin)?;
    let name = SiteName::parse(&name)?;
    state.toggler.enable(&name).await?;
    Ok("Site enabled.".to_string())
}

/// POST /api/sites/{name}/disable
pub async fn disable_site(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Extension(identity): Extension<Identity>,
) -> Result<String, PanelError> {
    identity.require(Role::Admin)?;
    let name = SiteName::parse(&name)?;
    state.toggler.disable(&name).await?;
    Ok("Site disabled.".to_string())
}

/// GET /api/templates
pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<Template>> {
    Json(state.templates.load().await)
}
