//! Remote topology for future template updates
//!
//! The remote `git clone` created for the template is re-homed under the
//! upstream name so updates can be fetched and merged from it, and the
//! user's own repository can later take the origin name.

use crate::bootstrap::prompt::{is_affirmative, Prompter};
use crate::error::Result;
use crate::git::{
    add_remote, push_branch, remote_exists, remove_remote, rename_remote, set_config_value,
    GitRunner,
};
use aether_core::types::GitWorkflowConfig;
use async_trait::async_trait;
use camino::Utf8Path;
use tracing::{debug, info, warn};

/// One way of exposing the template source under the upstream name
#[async_trait]
pub trait RemoteStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        from: &str,
        to: &str,
        url: &str,
    ) -> Result<()>;
}

/// `git remote rename <from> <to>`
pub struct RenameRemote;

#[async_trait]
impl RemoteStrategy for RenameRemote {
    fn name(&self) -> &'static str {
        "rename"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        from: &str,
        to: &str,
        _url: &str,
    ) -> Result<()> {
        rename_remote(git, root, from, to).await
    }
}

/// Drop `<from>` and add `<to>` with the known template URL
pub struct ReaddRemote;

#[async_trait]
impl RemoteStrategy for ReaddRemote {
    fn name(&self) -> &'static str {
        "remove-and-add"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        from: &str,
        to: &str,
        url: &str,
    ) -> Result<()> {
        for name in [from, to] {
            if remote_exists(git, root, name).await? {
                remove_remote(git, root, name).await?;
            }
        }
        add_remote(git, root, to, url).await
    }
}

/// Upstream strategies in the order they are tried
pub fn upstream_chain() -> Vec<Box<dyn RemoteStrategy>> {
    vec![Box::new(RenameRemote), Box::new(ReaddRemote)]
}

/// Result of [`configure_upstream`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyOutcome {
    /// Strategy that produced the upstream remote, if any did
    pub upstream_strategy: Option<&'static str>,
    /// Non-fatal failures, in the order they happened
    pub warnings: Vec<String>,
}

/// Re-home the template remote and apply update-friendly merge settings
///
/// Every failure is collected as a warning.
pub async fn configure_upstream(
    git: &dyn GitRunner,
    root: &Utf8Path,
    workflow: &GitWorkflowConfig,
    template_url: &str,
) -> TopologyOutcome {
    let mut outcome = TopologyOutcome::default();
    let from = workflow.clone_remote.as_str();
    let to = workflow.upstream_remote.as_str();

    let mut errors = Vec::new();
    for strategy in upstream_chain() {
        match strategy.attempt(git, root, from, to, template_url).await {
            Ok(()) => {
                info!("Template remote available as '{}' ({})", to, strategy.name());
                outcome.upstream_strategy = Some(strategy.name());
                break;
            }
            Err(e) => {
                debug!("Remote strategy {} failed: {}", strategy.name(), e);
                errors.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }
    if outcome.upstream_strategy.is_none() {
        let message = format!(
            "Could not configure the '{}' remote ({})",
            to,
            errors.join("; ")
        );
        warn!("{}", message);
        outcome.warnings.push(message);
    }

    for (key, value) in merge_settings(workflow) {
        if let Err(e) = set_config_value(git, root, &key, value).await {
            let message = format!("Could not set {}: {}", key, e);
            warn!("{}", message);
            outcome.warnings.push(message);
        }
    }

    outcome
}

/// Repository settings applied for later update merges
///
/// The merge driver is a no-op that keeps the local side; attribute files
/// outside this crate decide which paths use it.
pub fn merge_settings(workflow: &GitWorkflowConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("merge.{}.driver", workflow.merge_driver), "true"),
        ("pull.rebase".to_string(), "false"),
    ]
}

/// What happened to the user's own repository remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginOutcome {
    /// The user declined or gave no URL
    Skipped,
    /// The remote was added
    Added { url: String, push: PushOutcome },
    /// The remote could not be added
    Failed { reason: String },
}

/// What happened to the optional initial push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    NotRequested,
    Pushed,
    Failed {
        reason: String,
        retry_command: String,
    },
}

/// Offer to connect the user's own repository and push to it
pub async fn attach_origin(
    git: &dyn GitRunner,
    root: &Utf8Path,
    workflow: &GitWorkflowConfig,
    prompter: &dyn Prompter,
) -> Result<OriginOutcome> {
    let answer = prompter
        .ask("Connect this project to your own git repository? (y/N)", "n")
        .await?;
    if !is_affirmative(&answer) {
        return Ok(OriginOutcome::Skipped);
    }

    let url = prompter.ask("Repository URL", "").await?;
    if url.is_empty() {
        return Ok(OriginOutcome::Skipped);
    }

    let remote = workflow.origin_remote.as_str();
    if let Err(e) = add_remote(git, root, remote, &url).await {
        return Ok(OriginOutcome::Failed {
            reason: e.to_string(),
        });
    }

    let branch = workflow.integration_branch.as_str();
    let answer = prompter
        .ask(&format!("Push '{}' to {} now? (y/N)", branch, url), "n")
        .await?;
    let push = if !is_affirmative(&answer) {
        PushOutcome::NotRequested
    } else {
        match push_branch(git, root, remote, branch).await {
            Ok(()) => PushOutcome::Pushed,
            Err(e) => PushOutcome::Failed {
                reason: e.to_string(),
                retry_command: format!("git push --set-upstream {} {}", remote, branch),
            },
        }
    };

    Ok(OriginOutcome::Added { url, push })
}
