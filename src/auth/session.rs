//! In-memory cookie sessions.
//!
//! Sessions hold only the authenticated identity; all other state lives in
//! the file system. Tokens are UUIDv4 and the store is process-local, so a
//! restart logs everyone out.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::auth::Role;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Token-indexed session store.
pub struct SessionStore {
    cookie_name: String,
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: DashMap::new(),
        }
    }

    /// Open a session and return its token.
    pub fn open(&self, username: &str, role: Role) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                role,
                created_at: Utc::now(),
            },
        );
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    pub fn close(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Extract this store's session token from the request cookies.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.cookie_name).then(|| value.to_string())
        })
    }

    /// Set-Cookie value establishing a session.
    pub fn issue_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, token
        )
    }

    /// Set-Cookie value clearing the session cookie.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}
