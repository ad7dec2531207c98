//! User records and credential verification.
//!
//! Users live in `users.json` inside the data directory; each record maps
//! a username to a bcrypt password hash and a role.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::auth::Role;
use crate::error::PanelError;

/// One entry of `users.json`. Keys are camelCase on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Load/save access to `users.json`.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All user records. A missing or unreadable file yields an empty
    /// list; the failure is logged.
    pub async fn load(&self) -> Vec<UserRecord> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&raw) {
            Ok(users) => users,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read users file");
                Vec::new()
            }
        }
    }

    /// Persist the full user list.
    pub async fn save(&self, users: &[UserRecord]) -> Result<(), PanelError> {
        let serialized = serde_json::to_vec_pretty(users)?;
        fs::write(&self.path, serialized).await?;
        Ok(())
    }

    pub async fn find(&self, username: &str) -> Option<UserRecord> {
        self.load().await.into_iter().find(|u| u.username == username)
    }
}

/// Verify a password against a stored hash. Only bcrypt hashes
/// (`$2a$`/`$2b$`/`$2y$` prefixes) are supported; anything else never
/// matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if hash.starts_with("$2") {
        bcrypt::verify(password, hash).unwrap_or(false)
    } else {
        false
    }
}
