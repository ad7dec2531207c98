//! Full-tree backup archives.
//!
//! A backup is a single timestamped `tar.gz` capturing both the nginx
//! configuration root and the panel's own data directory (history and
//! prior backups included) at a point in time. Archives are immutable once
//! written and never pruned by the panel.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tokio::fs;

use crate::error::PanelError;
use crate::nginx::command::run;

/// Creates, lists and resolves backup archives.
pub struct BackupArchiver {
    backup_dir: PathBuf,
    config_root: PathBuf,
    data_dir: PathBuf,
    limit: Duration,
}

impl BackupArchiver {
    pub fn new(
        backup_dir: impl Into<PathBuf>,
        config_root: impl Into<PathBuf>,
        data_dir: impl Into<PathBuf>,
        limit: Duration,
    ) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            config_root: config_root.into(),
            data_dir: data_dir.into(),
            limit,
        }
    }

    /// Archive the configuration tree and data directory into a new
    /// timestamped file, returning its name. A non-zero tar exit fails the
    /// whole operation; there are no partial or incremental backups.
    pub async fn create(&self) -> Result<String, PanelError> {
        fs::create_dir_all(&self.backup_dir).await?;

        let name = format!("{}_nginx-backup.tar.gz", timestamp());
        let dest = self.backup_dir.join(&name);

        let out = run(
            "tar",
            [
                OsStr::new("-czf"),
                dest.as_os_str(),
                self.config_root.as_os_str(),
                self.data_dir.as_os_str(),
            ],
            self.limit,
        )
        .await;

        if !out.success() {
            tracing::error!(exit_code = out.exit_code, stderr = %out.stderr, "Backup failed");
            return Err(PanelError::Process(format!(
                "tar exited with {}: {}",
                out.exit_code, out.stderr
            )));
        }

        tracing::info!(file = %name, "Backup created");
        Ok(name)
    }

    /// Archive names, newest first. The sortable timestamp prefix makes
    /// lexicographic-descending order chronological.
    pub async fn list(&self) -> Result<Vec<String>, PanelError> {
        fs::create_dir_all(&self.backup_dir).await?;

        let mut entries = fs::read_dir(&self.backup_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".tar.gz") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Resolve an archive name to its on-disk path, validating the name
    /// against the strict archive pattern before it touches a path.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, PanelError> {
        if !is_valid_archive_name(name) {
            return Err(PanelError::InvalidName(name.to_string()));
        }
        let path = self.backup_dir.join(name);
        if !fs::try_exists(&path).await? {
            return Err(PanelError::NotFound("Backup"));
        }
        Ok(path)
    }
}

fn timestamp() -> String {
    Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}

/// Backup names are a single path segment ending in `.tar.gz`.
fn is_valid_archive_name(name: &str) -> bool {
    name.ends_with(".tar.gz")
        && name.len() > ".tar.gz".len()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
