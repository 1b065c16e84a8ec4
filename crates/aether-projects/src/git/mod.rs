//! Git operations module
//!
//! Async wrappers around the `git` binary used by the bootstrap engine:
//! - Cloning and revision checkout
//! - Branch and revision queries
//! - Remote management and remote tag listing
//! - Local configuration and commits
//!
//! Every operation takes the [`GitRunner`] to use and an explicit
//! repository root.
//!
//! # Examples
//!
//! ```no_run
//! use aether_projects::git::{clone_repository, get_current_branch, SystemGit};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let git = SystemGit;
//! let dest = Utf8Path::new("/tmp/my-site");
//! clone_repository(&git, "https://github.com/aether-cms/aether-template.git", dest).await?;
//! let branch = get_current_branch(&git, dest).await?;
//! # Ok(())
//! # }
//! ```

mod branch;
mod clone;
mod commit;
mod config;
mod remote;
mod runner;

#[cfg(test)]
pub(crate) use runner::testing;

// Re-export public API
pub use branch::{
    checkout_branch, create_and_switch, get_current_branch, head_revision, set_branch,
    short_revision, CreateMode,
};
pub use clone::{checkout_revision, clone_repository, is_valid_repo_url};
pub use commit::commit_all;
pub use config::{configure_user, set_config_value};
pub use remote::{
    add_remote, get_remote_url, list_remote_tags, list_remotes, parse_ls_remote_tags,
    push_branch, remote_exists, remove_remote, rename_remote, RemoteTag,
};
pub use runner::{check_git_available, GitOutput, GitRunner, SystemGit};
