//! Branch and revision operations

use crate::error::{Error, Result};
use crate::git::runner::GitRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// How a branch is created and switched to in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    /// `git switch -c` (git 2.23+)
    Switch,
    /// `git checkout -b`
    Checkout,
}

/// Get current branch name
///
/// Uses `git branch --show-current` (git 2.22+) and falls back to
/// `git symbolic-ref` on older git.
///
/// # Returns
/// `None` when HEAD is detached
pub async fn get_current_branch(git: &dyn GitRunner, path: &Utf8Path) -> Result<Option<String>> {
    let output = git.run(Some(path), &["branch", "--show-current"]).await?;

    let branch = if output.success {
        output.stdout.trim().to_string()
    } else {
        debug!("branch --show-current unavailable, trying symbolic-ref");
        let output = git
            .run(Some(path), &["symbolic-ref", "--quiet", "--short", "HEAD"])
            .await?;
        // --quiet exits non-zero without output when HEAD is detached
        if !output.success && !output.stderr.trim().is_empty() {
            return Err(Error::git_operation(format!(
                "Failed to get current branch: {}",
                output.stderr.trim()
            )));
        }
        output.stdout.trim().to_string()
    };

    if branch.is_empty() {
        debug!("HEAD is detached");
        Ok(None)
    } else {
        Ok(Some(branch))
    }
}

/// Full id of the commit HEAD points at
pub async fn head_revision(git: &dyn GitRunner, path: &Utf8Path) -> Result<String> {
    git.run(Some(path), &["rev-parse", "HEAD"])
        .await?
        .into_result("Failed to resolve HEAD")
}

/// Abbreviated id of the commit HEAD points at
pub async fn short_revision(git: &dyn GitRunner, path: &Utf8Path) -> Result<String> {
    git.run(Some(path), &["rev-parse", "--short", "HEAD"])
        .await?
        .into_result("Failed to resolve HEAD")
}

/// Create a branch at HEAD and switch to it
///
/// # Errors
/// Returns [`Error::InvalidBranch`] for names git would reject and
/// [`Error::GitOperation`] when the command fails (typically because the
/// branch already exists or the subcommand is unsupported).
pub async fn create_and_switch(
    git: &dyn GitRunner,
    path: &Utf8Path,
    branch_name: &str,
    mode: CreateMode,
) -> Result<()> {
    validate_branch_name(branch_name)?;

    let args = match mode {
        CreateMode::Switch => ["switch", "-c", branch_name],
        CreateMode::Checkout => ["checkout", "-b", branch_name],
    };
    git.run(Some(path), &args)
        .await?
        .into_result(&format!("git {} {} failed", args[0], args[1]))?;

    info!("Switched to new branch '{}'", branch_name);
    Ok(())
}

/// Point a branch at a revision, optionally moving it if it already exists
pub async fn set_branch(
    git: &dyn GitRunner,
    path: &Utf8Path,
    branch_name: &str,
    revision: &str,
    force: bool,
) -> Result<()> {
    validate_branch_name(branch_name)?;

    let mut args = vec!["branch"];
    if force {
        args.push("-f");
    }
    args.extend([branch_name, revision]);

    git.run(Some(path), &args)
        .await?
        .into_result("git branch failed")?;

    debug!("Branch '{}' now points at {}", branch_name, revision);
    Ok(())
}

/// Checkout an existing branch
pub async fn checkout_branch(
    git: &dyn GitRunner,
    path: &Utf8Path,
    branch_name: &str,
) -> Result<()> {
    git.run(Some(path), &["checkout", "--quiet", branch_name])
        .await?
        .into_result("git checkout failed")?;

    info!("Checked out branch: {}", branch_name);
    Ok(())
}

fn validate_branch_name(branch_name: &str) -> Result<()> {
    if branch_name.is_empty() || branch_name.contains("..") || branch_name.starts_with('-') {
        return Err(Error::invalid_branch(branch_name));
    }
    Ok(())
}
