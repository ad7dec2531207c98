//! Validated site names.
//!
//! A site name doubles as a file name in both the available and enabled
//! directories, so it is validated before any path is built from it.

use std::fmt;

use crate::error::PanelError;

/// A site name that is safe to join onto a directory path.
///
/// Accepts letters, digits, dots, underscores and hyphens. `.` and `..`
/// are rejected even though they match the charset: every path-derived
/// segment is checked against traversal independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteName(String);

impl SiteName {
    pub fn parse(raw: &str) -> Result<Self, PanelError> {
        if raw.is_empty() || raw == "." || raw == ".." {
            return Err(PanelError::InvalidName(raw.to_string()));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(PanelError::InvalidName(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
