//! Repository cloning and revision checkout

use crate::error::{Error, Result};
use crate::git::runner::GitRunner;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Clone the full history of a repository
///
/// # Arguments
/// * `git` - Git runner
/// * `url` - Repository URL to clone
/// * `destination` - Destination directory path, must not exist
///
/// # Returns
/// Path to the cloned repository
///
/// # Errors
/// Returns error if:
/// - Invalid repository URL
/// - Destination already exists
/// - Clone operation fails
pub async fn clone_repository(
    git: &dyn GitRunner,
    url: &str,
    destination: &Utf8Path,
) -> Result<Utf8PathBuf> {
    info!("Cloning repository: {} -> {}", url, destination);

    if !is_valid_repo_url(url) {
        return Err(Error::invalid_repo_url(url));
    }

    if destination.exists() {
        return Err(Error::repo_exists(destination.as_str()));
    }

    let output = git
        .run(None, &["clone", "--quiet", url, destination.as_str()])
        .await?;

    if !output.success {
        return Err(Error::clone_failed(output.stderr.trim()));
    }

    info!("Repository cloned successfully");
    Ok(destination.to_path_buf())
}

/// Move HEAD to a revision, tag or branch name
///
/// The target must name a commit; a value that only matches a path in the
/// tree is rejected instead of being checked out as a pathspec. A detached
/// HEAD is the expected outcome here, so git's advisory about it is
/// switched off for this invocation.
pub async fn checkout_revision(git: &dyn GitRunner, path: &Utf8Path, target: &str) -> Result<()> {
    info!("Checking out: {}", target);

    let commit = format!("{}^{{commit}}", target);
    let verified = git
        .run(Some(path), &["rev-parse", "--verify", "--quiet", &commit])
        .await?;
    if !verified.success {
        return Err(Error::checkout_failed(
            target,
            "not a commit in the cloned history",
        ));
    }

    let output = git
        .run(
            Some(path),
            &[
                "-c",
                "advice.detachedHead=false",
                "checkout",
                "--quiet",
                "--detach",
                target,
            ],
        )
        .await?;

    if !output.success {
        return Err(Error::checkout_failed(target, output.stderr.trim()));
    }

    debug!("HEAD is now at {}", verified.stdout.trim());
    Ok(())
}

/// Validate if a string is a usable repository location
///
/// Accepts network URLs, scp-style `git@host:path` and local
/// repositories (`file://` or an existing path).
pub fn is_valid_repo_url(url: &str) -> bool {
    const SCHEMES: [&str; 6] = ["https://", "http://", "ssh://", "git://", "file://", "git@"];

    if url.is_empty() {
        return false;
    }
    SCHEMES.iter().any(|scheme| url.starts_with(scheme)) || Utf8Path::new(url).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::testing::ScriptedGit;
    use crate::git::runner::GitOutput;
    use tempfile::TempDir;

    #[test]
    fn test_is_valid_repo_url() {
        assert!(is_valid_repo_url("https://github.com/user/repo.git"));
        assert!(is_valid_repo_url("git@github.com:user/repo.git"));
        assert!(is_valid_repo_url("http://example.com/repo.git"));
        assert!(is_valid_repo_url("ssh://git@example.com/repo.git"));
        assert!(is_valid_repo_url("file:///srv/git/template.git"));
        assert!(!is_valid_repo_url("invalid-url"));
        assert!(!is_valid_repo_url(""));
    }

    #[test]
    fn test_existing_local_path_is_valid() {
        let temp = TempDir::new().unwrap();
        assert!(is_valid_repo_url(temp.path().to_str().unwrap()));
    }

    #[tokio::test]
    async fn test_clone_rejects_existing_destination() {
        let temp = TempDir::new().unwrap();
        let dest = Utf8Path::from_path(temp.path()).unwrap();
        let git = ScriptedGit::new();

        let result = clone_repository(&git, "https://example.com/t.git", dest).await;
        assert!(matches!(result, Err(Error::RepoExists { .. })));
        assert!(git.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clone_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let dest = Utf8PathBuf::from_path_buf(temp.path().join("site")).unwrap();
        let git = ScriptedGit::new();
        git.respond("clone", GitOutput::failed("fatal: repository not found"));

        let result = clone_repository(&git, "https://example.com/t.git", &dest).await;
        match result {
            Err(Error::CloneFailed { message }) => {
                assert_eq!(message, "fatal: repository not found")
            }
            other => panic!("Expected CloneFailed, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_checkout_failure_names_target() {
        let git = ScriptedGit::new();
        let result = checkout_revision(&git, Utf8Path::new("/tmp/site"), "v9.9.9").await;
        match result {
            Err(Error::CheckoutFailed { target, .. }) => assert_eq!(target, "v9.9.9"),
            other => panic!("Expected CheckoutFailed, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_checkout_suppresses_detached_advice() {
        let git = ScriptedGit::new();
        git.respond("rev-parse --verify", GitOutput::ok("abc1234def\n"));
        git.respond("-c advice.detachedHead=false checkout", GitOutput::ok(""));

        checkout_revision(&git, Utf8Path::new("/tmp/site"), "abc1234")
            .await
            .unwrap();
        assert!(git.was_called("rev-parse --verify --quiet abc1234^{commit}"));
        assert!(git.was_called(
            "-c advice.detachedHead=false checkout --quiet --detach abc1234"
        ));
    }

    #[tokio::test]
    async fn test_checkout_rejects_non_commit_before_checking_out() {
        let git = ScriptedGit::new();
        git.respond("rev-parse --verify", GitOutput::failed(""));
        git.respond("-c advice.detachedHead=false checkout", GitOutput::ok(""));

        let result = checkout_revision(&git, Utf8Path::new("/tmp/site"), "README.md").await;
        match result {
            Err(Error::CheckoutFailed { target, .. }) => assert_eq!(target, "README.md"),
            other => panic!("Expected CheckoutFailed, got: {:?}", other),
        }
        assert!(!git.calls().iter().any(|c| c.contains("checkout")));
    }
}
