//! Commit operations

use crate::error::Result;
use crate::git::runner::GitRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// Stage the whole working tree and record a commit
///
/// The commit is recorded even when the tree is unchanged, so a bootstrap
/// always leaves exactly one initialization commit on top of the template.
pub async fn commit_all(git: &dyn GitRunner, path: &Utf8Path, message: &str) -> Result<()> {
    debug!("Staging working tree");
    git.run(Some(path), &["add", "--all"])
        .await?
        .into_result("git add failed")?;

    git.run(Some(path), &["commit", "--quiet", "--allow-empty", "-m", message])
        .await?
        .into_result("git commit failed")?;

    info!("Commit created: {}", message);
    Ok(())
}
