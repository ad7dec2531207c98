//! Site configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP save request
//!     → name.rs (validate site name)
//!     → lifecycle.rs (read old → snapshot → write → validate → commit/revert)
//!     → history store records the prior content
//!
//! HTTP enable/disable
//!     → toggle.rs (symlink between available/ and enabled/)
//! ```
//!
//! # Design Decisions
//! - A site's enabled state is solely the presence of a symlink
//! - Site content is mutated only through the lifecycle commit protocol
//! - Sites are never deleted by the panel

pub mod catalog;
pub mod lifecycle;
pub mod name;
pub mod toggle;

pub use catalog::{SiteCatalog, SiteSummary};
pub use lifecycle::{CommitReceipt, Lifecycle};
pub use name::SiteName;
pub use toggle::Toggler;

use std::path::PathBuf;

/// Resolved locations of a site's available file and enabled link.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub available_dir: PathBuf,
    pub enabled_dir: PathBuf,
}

impl SitePaths {
    pub fn new(available_dir: impl Into<PathBuf>, enabled_dir: impl Into<PathBuf>) -> Self {
        Self {
            available_dir: available_dir.into(),
            enabled_dir: enabled_dir.into(),
        }
    }

    /// Canonical storage location of a site's config file.
    pub fn available(&self, name: &SiteName) -> PathBuf {
        self.available_dir.join(name.as_str())
    }

    /// Location of the activation symlink.
    pub fn enabled(&self, name: &SiteName) -> PathBuf {
        self.enabled_dir.join(name.as_str())
    }
}
