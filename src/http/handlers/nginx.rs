//! Validator, reload and log handlers.

use axum::{
    extract::{Query, State},
    Extension,
};
use serde::Deserialize;

use crate::auth::{Identity, Role};
use crate::error::PanelError;
use crate::http::server::AppState;
use crate::logs::LogKind;

/// POST /api/nginx/test: run the syntax check and report the verdict.
pub async fn test_config(State(state): State<AppState>) -> String {
    state.nginx.check().await.to_string()
}

/// POST /api/nginx/reload
pub async fn reload(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<String, PanelError> {
    identity.require(Role::Admin)?;
    let out = state.nginx.reload().await;
    tracing::info!(user = %identity.username, exit_code = out.exit_code, "nginx reload requested");
    Ok(out.to_string())
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "default_lines")]
    pub lines: u32,
}

fn default_lines() -> u32 {
    200
}

/// GET /api/logs?type=access|error&lines=N
pub async fn tail_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<String, PanelError> {
    let kind = LogKind::from_query(query.kind.as_deref().unwrap_or("access"));
    state.logs.tail(kind, query.lines).await
}
