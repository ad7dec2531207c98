//! Site templates.
//!
//! Templates live in `templates.json` inside the data directory and are
//! managed out of band; the panel only reads them. Each template carries a
//! `{{domain}}` placeholder that is substituted with the site name on
//! creation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;

/// A named content skeleton for new sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Template {
    /// Substitute the domain placeholder with the site name.
    pub fn render(&self, domain: &str) -> String {
        self.content.replace("{{domain}}", domain)
    }
}

/// Read-only access to `templates.json`.
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all templates. A missing or unparseable file yields an empty
    /// list; corruption is logged, not surfaced.
    pub async fn load(&self) -> Vec<Template> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&raw) {
            Ok(templates) => templates,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable templates file");
                Vec::new()
            }
        }
    }

    /// Look up a template by id.
    pub async fn find(&self, id: &str) -> Option<Template> {
        self.load().await.into_iter().find(|t| t.id == id)
    }
}
