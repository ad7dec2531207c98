//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, sessions)
//! - Construct every component from the injected configuration
//! - Bind the server to a listener and run until shutdown

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::auth::{require_session, SessionStore, UserStore};
use crate::backup::BackupArchiver;
use crate::config::PanelConfig;
use crate::history::VersionStore;
use crate::http::handlers::{backups, history, nginx, session, sites};
use crate::logs::LogTailer;
use crate::nginx::Nginx;
use crate::observability::metrics;
use crate::sites::{Lifecycle, SiteCatalog, SitePaths, Toggler};
use crate::templates::TemplateStore;

/// Maximum accepted request body (config files are small).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PanelConfig>,
    pub lifecycle: Arc<Lifecycle>,
    pub versions: Arc<VersionStore>,
    pub toggler: Arc<Toggler>,
    pub catalog: Arc<SiteCatalog>,
    pub nginx: Arc<Nginx>,
    pub backups: Arc<BackupArchiver>,
    pub templates: Arc<TemplateStore>,
    pub users: Arc<UserStore>,
    pub sessions: Arc<SessionStore>,
    pub logs: Arc<LogTailer>,
}

impl AppState {
    /// Build every component from explicit configuration.
    pub fn from_config(config: &PanelConfig) -> Self {
        let data_dir = PathBuf::from(&config.panel.data_dir);
        let paths = SitePaths::new(&config.nginx.available_dir, &config.nginx.enabled_dir);
        let validate_limit = Duration::from_secs(config.timeouts.validate_secs);

        let nginx = Arc::new(Nginx::new(
            &config.nginx.binary_path,
            config.nginx.use_systemctl,
            validate_limit,
        ));
        let versions = Arc::new(VersionStore::new(data_dir.join("history")));
        let templates = Arc::new(TemplateStore::new(data_dir.join("templates.json")));
        let lifecycle = Arc::new(Lifecycle::new(
            paths.clone(),
            versions.clone(),
            nginx.clone(),
        ));
        let toggler = Arc::new(Toggler::new(paths.clone()));
        let catalog = Arc::new(SiteCatalog::new(paths, templates.clone()));
        let backups = Arc::new(BackupArchiver::new(
            data_dir.join("backups"),
            &config.nginx.config_root,
            &data_dir,
            Duration::from_secs(config.timeouts.backup_secs),
        ));
        let users = Arc::new(UserStore::new(data_dir.join("users.json")));
        let sessions = Arc::new(SessionStore::new(&config.panel.session_cookie));
        let logs = Arc::new(LogTailer::new(
            &config.nginx.access_log,
            &config.nginx.error_log,
            validate_limit,
        ));

        Self {
            config: Arc::new(config.clone()),
            lifecycle,
            versions,
            toggler,
            catalog,
            nginx,
            backups,
            templates,
            users,
            sessions,
            logs,
        }
    }
}

/// HTTP server for the panel.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: PanelConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &PanelConfig, state: AppState) -> Router {
        let protected = Router::new()
            .route("/", get(session::index))
            .route("/logout", post(session::logout))
            .route("/api/me", get(session::me))
            .route("/api/sites", get(sites::list_sites).post(sites::create_site))
            .route(
                "/api/sites/{name}",
                get(sites::site_content).put(sites::save_site),
            )
            .route("/api/sites/{name}/meta", get(sites::site_meta))
            .route("/api/sites/{name}/enable", post(sites::enable_site))
            .route("/api/sites/{name}/disable", post(sites::disable_site))
            .route("/api/sites/{name}/versions", get(history::list_versions))
            .route(
                "/api/sites/{name}/versions/{version_id}",
                get(history::version_content),
            )
            .route("/api/nginx/test", post(nginx::test_config))
            .route("/api/nginx/reload", post(nginx::reload))
            .route("/api/logs", get(nginx::tail_logs))
            .route("/api/templates", get(sites::list_templates))
            .route(
                "/api/backup",
                post(backups::create_backup).get(backups::list_backups),
            )
            .route("/api/backup/{name}", get(backups::download_backup))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ));

        Router::new()
            .route(
                "/login",
                get(session::login_page).post(session::login),
            )
            .merge(protected)
            .nest_service(
                "/static",
                ServeDir::new(&config.panel.static_dir),
            )
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_requests))
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// UUIDv4 request ids for the tower-http request-id layers.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Record method/status/duration for every request.
async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
