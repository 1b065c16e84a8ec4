//! Git process execution
//!
//! Every git invocation goes through [`GitRunner`] with an explicit
//! repository root. Nothing in this crate changes the process working
//! directory.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a single git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether git exited with status 0
    pub success: bool,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl GitOutput {
    /// A successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Trimmed stdout on success, a [`Error::GitOperation`] otherwise
    pub fn into_result(self, context: &str) -> Result<String> {
        if self.success {
            Ok(self.stdout.trim().to_string())
        } else {
            Err(Error::git_operation(format!(
                "{}: {}",
                context,
                self.stderr.trim()
            )))
        }
    }
}

/// Runs git commands
///
/// `root` is the working directory of the invocation; `None` runs outside
/// any repository (clone, ls-remote, version probes).
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(&self, root: Option<&Utf8Path>, args: &[&str]) -> Result<GitOutput>;
}

/// [`GitRunner`] backed by the `git` binary in PATH
#[derive(Debug, Clone, Default)]
pub struct SystemGit;

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, root: Option<&Utf8Path>, args: &[&str]) -> Result<GitOutput> {
        let mut cmd = Command::new("git");
        if let Some(root) = root {
            cmd.current_dir(root);
        }
        cmd.args(args);
        if talks_to_remote(args) {
            cmd.env("GIT_TERMINAL_PROMPT", "0");
        }

        debug!("Running: git {}", args.join(" "));
        let output = cmd.output().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::GitNotFound,
            _ => Error::Io(e),
        })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Whether a git invocation reaches a remote before the user is asked anything
///
/// These fail instead of waiting on a credential prompt. A push the user
/// asked for keeps git's own prompting.
fn talks_to_remote(args: &[&str]) -> bool {
    matches!(args.first(), Some(&"clone") | Some(&"ls-remote"))
}

/// Check that git is available in PATH
pub async fn check_git_available(git: &dyn GitRunner) -> Result<()> {
    let output = git
        .run(None, &["--version"])
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.success {
        return Err(Error::GitNotFound);
    }

    debug!("Using {}", output.stdout.trim());
    Ok(())
}
