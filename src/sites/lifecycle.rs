//! The configuration commit protocol.
//!
//! # Responsibilities
//! - Guarantee a site's on-disk config is never left in a state that fails
//!   external validation
//! - Preserve full history of every prior committed state
//!
//! # Design Decisions
//! - Explicit two-phase shape: stage the write, validate the whole
//!   configuration set, then finalize or revert
//! - The whole set is validated, not just the changed file, since nginx
//!   directives are interdependent across files
//! - The prior content is snapshotted only when the commit finalizes, so a
//!   rejected save leaves history untouched
//! - Rollback is best-effort; its outcome rides along inside the
//!   `ValidationFailed` error as a secondary diagnostic
//! - No locking between concurrent commits to the same site; two
//!   simultaneous saves can interleave stage-then-validate steps

use std::io::ErrorKind;
use std::sync::Arc;

use tokio::fs;

use crate::error::{PanelError, RollbackOutcome};
use crate::history::VersionStore;
use crate::nginx::Nginx;
use crate::sites::{SiteName, SitePaths};

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy)]
pub struct CommitReceipt {
    /// Whether prior content existed and was recorded as a version.
    pub snapshotted: bool,
}

/// Orchestrates read → stage → validate → commit-or-revert for a single
/// site's configuration file.
pub struct Lifecycle {
    paths: SitePaths,
    versions: Arc<VersionStore>,
    nginx: Arc<Nginx>,
}

impl Lifecycle {
    pub fn new(paths: SitePaths, versions: Arc<VersionStore>, nginx: Arc<Nginx>) -> Self {
        Self {
            paths,
            versions,
            nginx,
        }
    }

    /// Replace a site's configuration with `new_content`.
    ///
    /// The commit stands iff the whole configuration set passes the
    /// external syntax check afterwards; otherwise the prior byte-for-byte
    /// content is restored (subject to the rollback write succeeding) and
    /// `ValidationFailed` is returned with the validator's captured output.
    ///
    /// A missing target file is treated as empty prior content; neither a
    /// first creation nor a rejected save produces a version record.
    pub async fn commit(
        &self,
        name: &SiteName,
        new_content: &str,
        actor: &str,
        source_addr: &str,
    ) -> Result<CommitReceipt, PanelError> {
        let path = self.paths.available(name);

        let old_content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        // Stage: a partial write fails the whole operation.
        fs::write(&path, new_content).await?;

        let verdict = self.nginx.check().await;
        if verdict.success() {
            let snapshotted = self
                .versions
                .snapshot(name, &old_content, actor, source_addr)
                .await?
                .is_some();
            tracing::info!(site = %name, user = %actor, "Configuration committed");
            return Ok(CommitReceipt { snapshotted });
        }

        let rollback = match fs::write(&path, &old_content).await {
            Ok(()) => RollbackOutcome::Restored,
            Err(e) => {
                tracing::error!(site = %name, error = %e, "Rollback write failed");
                RollbackOutcome::Failed
            }
        };
        tracing::warn!(
            site = %name,
            user = %actor,
            exit_code = verdict.exit_code,
            "Validation rejected commit"
        );
        Err(PanelError::ValidationFailed {
            output: verdict,
            rollback,
        })
    }
}
