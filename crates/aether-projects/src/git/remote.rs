//! Git remote management operations

use crate::error::{Error, Result};
use crate::git::runner::GitRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// A tag reference advertised by a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    /// Tag name with the `refs/tags/` prefix removed
    pub name: String,
    /// True for the `^{}` entries an annotated tag adds for its target commit
    pub peeled: bool,
}

/// Add a remote to a repository
///
/// # Errors
/// Returns error if remote already exists or git command fails
pub async fn add_remote(git: &dyn GitRunner, path: &Utf8Path, name: &str, url: &str) -> Result<()> {
    info!("Adding remote '{}': {}", name, url);

    if remote_exists(git, path, name).await? {
        return Err(Error::remote_exists(name));
    }

    git.run(Some(path), &["remote", "add", name, url])
        .await?
        .into_result(&format!("Failed to add remote '{}'", name))?;

    info!("Remote '{}' added successfully", name);
    Ok(())
}

/// Remove a remote from a repository
pub async fn remove_remote(git: &dyn GitRunner, path: &Utf8Path, name: &str) -> Result<()> {
    info!("Removing remote: {}", name);

    if !remote_exists(git, path, name).await? {
        return Err(Error::remote_not_found(name));
    }

    git.run(Some(path), &["remote", "remove", name])
        .await?
        .into_result(&format!("Failed to remove remote '{}'", name))?;

    info!("Remote '{}' removed successfully", name);
    Ok(())
}

/// Rename a remote, carrying its URL and remote-tracking refs along
pub async fn rename_remote(
    git: &dyn GitRunner,
    path: &Utf8Path,
    from: &str,
    to: &str,
) -> Result<()> {
    info!("Renaming remote '{}' to '{}'", from, to);

    git.run(Some(path), &["remote", "rename", from, to])
        .await?
        .into_result(&format!("Failed to rename remote '{}'", from))?;

    Ok(())
}

/// Get the URL of a remote
///
/// # Returns
/// Remote URL if found
pub async fn get_remote_url(
    git: &dyn GitRunner,
    path: &Utf8Path,
    name: &str,
) -> Result<Option<String>> {
    debug!("Getting URL for remote: {}", name);

    let output = git.run(Some(path), &["remote", "get-url", name]).await?;

    if !output.success {
        // Remote doesn't exist
        return Ok(None);
    }

    Ok(Some(output.stdout.trim().to_string()))
}

/// Check if a remote exists
pub async fn remote_exists(git: &dyn GitRunner, path: &Utf8Path, name: &str) -> Result<bool> {
    let url = get_remote_url(git, path, name).await?;
    Ok(url.is_some())
}

/// List all remotes in a repository
///
/// # Returns
/// Vector of (name, url) tuples
pub async fn list_remotes(git: &dyn GitRunner, path: &Utf8Path) -> Result<Vec<(String, String)>> {
    debug!("Listing remotes");

    let stdout = git
        .run(Some(path), &["remote", "-v"])
        .await?
        .into_result("Failed to list remotes")?;

    let mut remotes = Vec::new();

    for line in stdout.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 2 {
            let name = parts[0].to_string();
            let url = parts[1].to_string();
            // Only add fetch URLs (avoid duplicates)
            if parts.len() < 3 || parts[2] == "(fetch)" {
                remotes.push((name, url));
            }
        }
    }

    Ok(remotes)
}

/// Query the tag references a remote advertises, without cloning it
pub async fn list_remote_tags(git: &dyn GitRunner, url: &str) -> Result<Vec<RemoteTag>> {
    debug!("Listing remote tags: {}", url);

    let stdout = git
        .run(None, &["ls-remote", "--tags", url])
        .await?
        .into_result(&format!("Failed to list tags of {}", url))?;

    Ok(parse_ls_remote_tags(&stdout))
}

/// Parse `git ls-remote --tags` output (`<oid>\trefs/tags/<name>` per line)
pub fn parse_ls_remote_tags(output: &str) -> Vec<RemoteTag> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|reference| reference.strip_prefix("refs/tags/"))
        .map(|name| match name.strip_suffix("^{}") {
            Some(base) => RemoteTag {
                name: base.to_string(),
                peeled: true,
            },
            None => RemoteTag {
                name: name.to_string(),
                peeled: false,
            },
        })
        .collect()
}

/// Push a branch and set it as upstream of the local branch
pub async fn push_branch(
    git: &dyn GitRunner,
    path: &Utf8Path,
    remote: &str,
    branch: &str,
) -> Result<()> {
    info!("Pushing '{}' to '{}'", branch, remote);

    git.run(Some(path), &["push", "--set-upstream", remote, branch])
        .await?
        .into_result(&format!("Failed to push to '{}'", remote))?;

    info!("Push to '{}' completed successfully", remote);
    Ok(())
}
