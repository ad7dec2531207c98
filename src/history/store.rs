//! Durable version history for site configurations.
//!
//! # Responsibilities
//! - Snapshot prior content before a commit overwrites it
//! - Keep a per-site index in strict newest-first order
//! - Serve historical content back by version id
//!
//! # Design Decisions
//! - Version ids are wall-clock timestamps made filename-safe, so the id
//!   doubles as the content file name and sorts chronologically
//! - The index is append-at-front and never re-sorted; listing trusts the
//!   insertion-order invariant
//! - Corruption of the index is an explicit error; each caller chooses its
//!   own fallback policy instead of the store silently swallowing it

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::PanelError;
use crate::sites::SiteName;

/// Index entry for one stored version.
///
/// Serialized camelCase to match the panel's on-disk data layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMeta {
    pub id: String,
    pub created_at: String,
    pub user: String,
    pub ip: String,
}

/// Per-site history of committed configuration content.
pub struct VersionStore {
    history_dir: PathBuf,
}

impl VersionStore {
    pub fn new(history_dir: impl Into<PathBuf>) -> Self {
        Self {
            history_dir: history_dir.into(),
        }
    }

    fn site_dir(&self, name: &SiteName) -> PathBuf {
        self.history_dir.join(name.as_str())
    }

    fn index_path(&self, name: &SiteName) -> PathBuf {
        self.site_dir(name).join("index.json")
    }

    /// Record `content` as the newest version of a site.
    ///
    /// No-op for empty content: an empty or missing prior file is the
    /// creation event, which is deliberately kept out of history. If the
    /// existing index is corrupt it is replaced rather than blocking the
    /// snapshot (availability over strictness; the loss is logged).
    ///
    /// Returns the new version id, or `None` when nothing was recorded.
    pub async fn snapshot(
        &self,
        name: &SiteName,
        content: &str,
        actor: &str,
        source_addr: &str,
    ) -> Result<Option<String>, PanelError> {
        if content.is_empty() {
            return Ok(None);
        }

        let site_dir = self.site_dir(name);
        fs::create_dir_all(&site_dir).await?;

        let id = version_id();
        fs::write(site_dir.join(format!("{id}.conf")), content).await?;

        let mut index = match self.read_index(name).await {
            Ok(index) => index,
            Err(PanelError::CorruptIndex { site, reason }) => {
                tracing::warn!(site = %site, reason = %reason, "Replacing corrupt version index");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        index.insert(
            0,
            VersionMeta {
                id: id.clone(),
                created_at: id.clone(),
                user: actor.to_string(),
                ip: source_addr.to_string(),
            },
        );
        let serialized = serde_json::to_vec_pretty(&index)?;
        fs::write(self.index_path(name), serialized).await?;

        tracing::debug!(site = %name, version = %id, "Snapshot recorded");
        Ok(Some(id))
    }

    /// The index as stored, newest first. Missing index means no history;
    /// a corrupt index is surfaced to the caller.
    pub async fn list(&self, name: &SiteName) -> Result<Vec<VersionMeta>, PanelError> {
        self.read_index(name).await
    }

    /// Raw stored content of one version.
    pub async fn fetch(&self, name: &SiteName, version_id: &str) -> Result<String, PanelError> {
        if !is_valid_version_id(version_id) {
            return Err(PanelError::InvalidName(version_id.to_string()));
        }
        let path = self.site_dir(name).join(format!("{version_id}.conf"));
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PanelError::NotFound("Version"))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read_index(&self, name: &SiteName) -> Result<Vec<VersionMeta>, PanelError> {
        let raw = match fs::read(self.index_path(name)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw).map_err(|e| PanelError::CorruptIndex {
            site: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Current UTC time as a sortable, filename-safe identifier
/// (`2026-08-07T12-34-56-789Z`). Colons and periods are replaced so the id
/// is usable as a file name across file systems.
fn version_id() -> String {
    Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}

/// Version ids contain only alphanumerics and hyphens; anything else is
/// rejected before it reaches a file path.
fn is_valid_version_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
