//! Symlink-based enable/disable state.
//!
//! Mirrors nginx's own convention of two parallel directories: a site is
//! active iff a symlink with its name exists in the enabled directory.

use tokio::fs;

use crate::error::PanelError;
use crate::sites::{SiteName, SitePaths};

/// Manages the activation symlink between available/ and enabled/.
pub struct Toggler {
    paths: SitePaths,
}

impl Toggler {
    pub fn new(paths: SitePaths) -> Self {
        Self { paths }
    }

    /// Create the activation symlink.
    ///
    /// Anything already occupying the enabled path (a managed link or a
    /// stray file) blocks enabling.
    pub async fn enable(&self, name: &SiteName) -> Result<(), PanelError> {
        let src = self.paths.available(name);
        let dst = self.paths.enabled(name);

        if !fs::try_exists(&src).await? {
            return Err(PanelError::NotFound("Source file"));
        }
        if fs::symlink_metadata(&dst).await.is_ok() {
            return Err(PanelError::AlreadyEnabled(name.to_string()));
        }

        fs::symlink(&src, &dst).await?;
        tracing::info!(site = %name, "Site enabled");
        Ok(())
    }

    /// Remove the activation symlink. Only the link is removed, never the
    /// underlying config file.
    pub async fn disable(&self, name: &SiteName) -> Result<(), PanelError> {
        let dst = self.paths.enabled(name);

        let meta = fs::symlink_metadata(&dst)
            .await
            .map_err(|_| PanelError::NotEnabled(name.to_string()))?;
        if !meta.file_type().is_symlink() {
            // A regular file at the enabled path was not placed by us.
            return Err(PanelError::NotEnabled(name.to_string()));
        }

        fs::remove_file(&dst).await?;
        tracing::info!(site = %name, "Site disabled");
        Ok(())
    }

    /// True iff the enabled path exists and is specifically a symlink.
    /// A regular file copied there by mistake is not reported as enabled.
    pub async fn is_enabled(&self, name: &SiteName) -> bool {
        match fs::symlink_metadata(self.paths.enabled(name)).await {
            Ok(meta) => meta.file_type().is_symlink(),
            Err(_) => false,
        }
    }
}
