//! External command invocation.
//!
//! # Responsibilities
//! - Run the nginx binary (and other utilities) with a bounded timeout
//! - Capture exit code, stdout and stderr uniformly
//!
//! # Design Decisions
//! - A failing check is an expected outcome, not an error: `run` never
//!   returns `Result`. Timeouts and spawn failures surface as a synthetic
//!   non-zero exit code with a diagnostic on stderr.
//! - `kill_on_drop` reaps children that outlive their timeout

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

/// Synthetic exit code for timeouts and spawn failures.
pub const EXIT_FAILED_TO_RUN: i32 = -1;

/// Captured verdict of an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExitCode: {}\nSTDOUT:\n{}\nSTDERR:\n{}",
            self.exit_code, self.stdout, self.stderr
        )
    }
}

/// Run a command with a hard wall-clock limit, capturing its output.
pub async fn run<I, S>(program: impl AsRef<OsStr>, args: I, limit: Duration) -> CommandOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(limit, command.output()).await {
        Ok(Ok(output)) => CommandOutput {
            exit_code: output.status.code().unwrap_or(EXIT_FAILED_TO_RUN),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Ok(Err(e)) => CommandOutput {
            exit_code: EXIT_FAILED_TO_RUN,
            stdout: String::new(),
            stderr: format!("failed to run {}: {}", program.to_string_lossy(), e),
        },
        Err(_) => CommandOutput {
            exit_code: EXIT_FAILED_TO_RUN,
            stdout: String::new(),
            stderr: format!(
                "{} timed out after {}s",
                program.to_string_lossy(),
                limit.as_secs()
            ),
        },
    }
}

/// Invokes the managed nginx binary for syntax checks and reloads.
pub struct Nginx {
    binary: PathBuf,
    use_systemctl: bool,
    limit: Duration,
}

impl Nginx {
    pub fn new(binary: impl Into<PathBuf>, use_systemctl: bool, limit: Duration) -> Self {
        Self {
            binary: binary.into(),
            use_systemctl,
            limit,
        }
    }

    /// Syntax-check the whole configuration set (`nginx -t`).
    pub async fn check(&self) -> CommandOutput {
        run(&self.binary, ["-t"], self.limit).await
    }

    /// Reload the running server, either through the service manager or by
    /// signaling the master process directly.
    pub async fn reload(&self) -> CommandOutput {
        if self.use_systemctl {
            run("systemctl", ["reload", "nginx"], self.limit).await
        } else {
            run(&self.binary, ["-s", "reload"], self.limit).await
        }
    }
}
