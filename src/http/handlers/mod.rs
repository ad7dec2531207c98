//! Request handlers for the panel API.

pub mod backups;
pub mod history;
pub mod nginx;
pub mod session;
pub mod sites;

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Best-effort client address: first X-Forwarded-For entry, else the
/// socket peer.
pub(crate) fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}
