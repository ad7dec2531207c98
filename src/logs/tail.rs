//! Log tailing through the external tail utility.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use tokio::fs;

use crate::error::PanelError;
use crate::nginx::command::run;

/// Which nginx log to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Access,
    Error,
}

impl LogKind {
    /// Query-string value to kind; anything other than `error` is the
    /// access log.
    pub fn from_query(raw: &str) -> Self {
        if raw == "error" {
            LogKind::Error
        } else {
            LogKind::Access
        }
    }
}

/// Tails the configured access and error logs.
pub struct LogTailer {
    access_log: PathBuf,
    error_log: PathBuf,
    limit: Duration,
}

impl LogTailer {
    pub fn new(
        access_log: impl Into<PathBuf>,
        error_log: impl Into<PathBuf>,
        limit: Duration,
    ) -> Self {
        Self {
            access_log: access_log.into(),
            error_log: error_log.into(),
            limit,
        }
    }

    /// Last `lines` lines of the named log.
    pub async fn tail(&self, kind: LogKind, lines: u32) -> Result<String, PanelError> {
        let file = match kind {
            LogKind::Access => &self.access_log,
            LogKind::Error => &self.error_log,
        };
        if !fs::try_exists(file).await? {
            return Err(PanelError::NotFound("Log file"));
        }

        let count = lines.to_string();
        let out = run(
            "tail",
            [OsStr::new("-n"), OsStr::new(&count), file.as_os_str()],
            self.limit,
        )
        .await;

        if !out.success() {
            return Err(PanelError::Process(format!(
                "tail exited with {}: {}",
                out.exit_code, out.stderr
            )));
        }
        Ok(out.stdout)
    }
}
