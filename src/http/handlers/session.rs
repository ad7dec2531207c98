//! Session lifecycle handlers and the two HTML shells.
//!
//! The UI itself lives under /static; these pages are just enough markup
//! to bootstrap it.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;

use crate::auth::{verify_password, Identity, Role, UserRecord};
use crate::http::server::AppState;

const INDEX_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Nginx Panel</title>
  <link rel="stylesheet" href="/static/app.css">
</head>
<body class="app-body">
  <header class="app-header">
    <h1 class="app-title">Nginx Panel</h1>
    <span id="current-user" class="app-user-info"></span>
    <form method="post" action="/logout">
      <button class="btn btn-logout" type="submit">Logout</button>
    </form>
  </header>
  <main id="app" class="app-main"></main>
  <script src="/static/app.js" defer></script>
</body>
</html>
"#;

/// GET /: the dashboard shell.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

fn login_page_html(show_error: bool) -> String {
    let error = if show_error {
        "<div class=\"login-error\">Invalid credentials</div>"
    } else {
        ""
    };
    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Nginx Panel Login</title>
  <link rel="stylesheet" href="/static/app.css">
</head>
<body class="login-body">
  <div class="login-box">
    <h1 class="login-title">Nginx Panel</h1>
    <form method="post" action="/login" class="login-form">
      <label class="login-label">Username
        <input class="login-input" type="text" name="username" autocomplete="username" />
      </label>
      <label class="login-label">Password
        <input class="login-input" type="password" name="password" autocomplete="current-password" />
      </label>
      <button class="login-button" type="submit">Login</button>
      {error}
    </form>
  </div>
</body>
</html>
"#
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
}

/// GET /login: already-authenticated visitors go straight to the panel.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
    headers: HeaderMap,
) -> Response {
    let authenticated = state
        .sessions
        .token_from_headers(&headers)
        .and_then(|token| state.sessions.get(&token))
        .is_some();
    if authenticated {
        return Redirect::to("/").into_response();
    }
    Html(login_page_html(query.error.is_some())).into_response()
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
///
/// When no users exist yet, the configured bootstrap admin is seeded into
/// users.json before the lookup, so a fresh install can log in.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if form.username.is_empty() || form.password.is_empty() {
        return Redirect::to("/login?error=1").into_response();
    }

    let mut users = state.users.load().await;
    if users.is_empty() && !state.config.panel.bootstrap_password_hash.is_empty() {
        users = vec![UserRecord {
            username: state.config.panel.bootstrap_username.clone(),
            password_hash: state.config.panel.bootstrap_password_hash.clone(),
            role: Role::Admin,
        }];
        if let Err(e) = state.users.save(&users).await {
            tracing::error!(error = %e, "Failed to seed bootstrap user");
        } else {
            tracing::info!(
                username = %state.config.panel.bootstrap_username,
                "Bootstrap admin seeded"
            );
        }
    }

    let Some(user) = users.into_iter().find(|u| u.username == form.username) else {
        return Redirect::to("/login?error=1").into_response();
    };
    if !verify_password(&form.password, &user.password_hash) {
        tracing::warn!(username = %form.username, "Rejected login");
        return Redirect::to("/login?error=1").into_response();
    }

    let token = state.sessions.open(&user.username, user.role);
    tracing::info!(username = %user.username, role = %user.role, "Login");
    (
        [(header::SET_COOKIE, state.sessions.issue_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response()
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = state.sessions.token_from_headers(&headers) {
        state.sessions.close(&token);
    }
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

/// GET /api/me
pub async fn me(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "username": identity.username,
        "role": identity.role,
    }))
}
