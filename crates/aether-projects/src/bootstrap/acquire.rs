//! Repository acquisition at a resolved target

use crate::bootstrap::target::ResolvedTarget;
use crate::error::Result;
use crate::git::{checkout_revision, clone_repository, GitRunner};
use camino::Utf8Path;
use tracing::info;

/// Clone the full template history and move HEAD to `target`
///
/// Both steps are fatal on failure. A checkout can fail even after the tag
/// passed the remote check, so the error names the target that did not
/// resolve locally.
pub async fn acquire(
    git: &dyn GitRunner,
    url: &str,
    destination: &Utf8Path,
    target: &ResolvedTarget,
) -> Result<()> {
    clone_repository(git, url, destination).await?;

    if target.is_latest() {
        info!("Using the template's default branch");
        return Ok(());
    }

    checkout_revision(git, destination, &target.value).await
}
