//! Error types for aether-projects

use thiserror::Error;

/// Result type alias using aether-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Bootstrap error types
///
/// Variants returned from [`crate::bootstrap::Bootstrapper::run`] are fatal.
/// Everything after a working tree exists is downgraded to a report warning.
#[derive(Error, Debug)]
pub enum Error {
    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Invalid repository URL
    #[error("Invalid repository URL: {url}")]
    InvalidRepoUrl { url: String },

    /// Repository already exists
    #[error("Destination already exists: {path}")]
    RepoExists { path: String },

    /// Invalid branch name
    #[error("Invalid branch name: {branch}")]
    InvalidBranch { branch: String },

    /// Remote not found
    #[error("Remote '{remote}' not found")]
    RemoteNotFound { remote: String },

    /// Remote already exists
    #[error("Remote '{remote}' already exists")]
    RemoteExists { remote: String },

    /// Invalid git config
    #[error("Invalid git config: {message}")]
    InvalidConfig { message: String },

    /// Clone failed
    #[error("Failed to clone repository: {message}")]
    CloneFailed { message: String },

    /// Checkout of the resolved target failed after a full clone
    #[error("Could not check out '{target}' after cloning: {message}")]
    CheckoutFailed { target: String, message: String },

    /// Named target is not a tag on the remote
    #[error("{}", format_target_not_found(.target, .suggestions, .omitted))]
    TargetNotFound {
        target: String,
        suggestions: Vec<String>,
        omitted: usize,
    },

    /// Manifest could not be read or updated
    #[error("Manifest error ({path}): {message}")]
    Manifest { path: String, message: String },

    /// Prompt collaborator failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_target_not_found(target: &str, suggestions: &[String], omitted: &usize) -> String {
    let mut message = format!("Version '{}' was not found in the template repository", target);
    if suggestions.is_empty() {
        message.push_str(" (the repository has no tags)");
        return message;
    }

    message.push_str("\nAvailable versions:");
    for tag in suggestions {
        message.push_str("\n  - ");
        message.push_str(tag);
    }
    if *omitted > 0 {
        message.push_str(&format!("\n  ... and {} more", omitted));
    }
    message
}

impl Error {
    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a repo exists error
    pub fn repo_exists(path: impl Into<String>) -> Self {
        Self::RepoExists { path: path.into() }
    }

    /// Create an invalid branch error
    pub fn invalid_branch(branch: impl Into<String>) -> Self {
        Self::InvalidBranch {
            branch: branch.into(),
        }
    }

    /// Create a remote not found error
    pub fn remote_not_found(remote: impl Into<String>) -> Self {
        Self::RemoteNotFound {
            remote: remote.into(),
        }
    }

    /// Create a remote exists error
    pub fn remote_exists(remote: impl Into<String>) -> Self {
        Self::RemoteExists {
            remote: remote.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a checkout failed error
    pub fn checkout_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckoutFailed {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a target not found error
    pub fn target_not_found(
        target: impl Into<String>,
        suggestions: Vec<String>,
        omitted: usize,
    ) -> Self {
        Self::TargetNotFound {
            target: target.into(),
            suggestions,
            omitted,
        }
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
