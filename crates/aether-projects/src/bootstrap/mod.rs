//! Version-targeted project bootstrap
//!
//! [`Bootstrapper::run`] drives one bootstrap from a template repository:
//!
//! 1. Resolve the selector to a single target
//! 2. Confirm a named tag exists on the remote
//! 3. Clone and check out the target
//! 4. Put the working copy on the integration branch
//! 5. Re-home the template remote as `upstream` and apply merge settings
//! 6. Run the scaffolding hook and record install metadata
//! 7. Commit, then optionally attach and push the user's own remote
//!
//! Steps 1 to 3 are fatal on failure and nothing is written before step 3.
//! Everything after acquisition degrades to a warning in the report.

mod acquire;
mod metadata;
mod normalize;
mod prompt;
mod scaffold;
mod tag_check;
mod target;
mod topology;

pub use acquire::acquire;
pub use metadata::{
    installed_version, manifest_path, read_manifest, write_metadata, InstallMetadata,
    TemplateInfo,
};
pub use normalize::{
    detached_ladder, detect_state, normalize_branch, on_other_ladder, run_ladder, BranchState,
    BranchStrategy, CheckoutCreate, CreateThenCheckout, ForceMove, NormalizeOutcome,
    SwitchCreate,
};
pub use prompt::{is_affirmative, NonInteractivePrompter, Prompter};
pub use scaffold::{NoScaffold, Scaffolder};
pub use tag_check::{check_remote_tag, evaluate_tags, TagCheck};
pub use target::{resolve_target, ResolvedTarget, Selector, TargetKind, LATEST};
pub use topology::{
    attach_origin, configure_upstream, merge_settings, upstream_chain, OriginOutcome,
    PushOutcome, ReaddRemote, RemoteStrategy, RenameRemote, TopologyOutcome,
};

use crate::error::{Error, Result};
use crate::git::{
    check_git_available, commit_all, configure_user, get_current_branch, head_revision,
    list_remotes, short_revision, GitRunner, SystemGit,
};
use aether_core::types::BootstrapConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// What to bootstrap and where
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    pub template_url: String,
    pub destination: Utf8PathBuf,
    pub selector: Selector,
    /// Local `user.name` for the new repository
    pub git_name: Option<String>,
    /// Local `user.email` for the new repository
    pub git_email: Option<String>,
}

/// Everything a completed bootstrap did
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub destination: Utf8PathBuf,
    pub target: ResolvedTarget,
    /// `None` when the selector needed no remote check
    pub tag_check: Option<TagCheck>,
    pub installed_version: Option<String>,
    /// Branch checked out when the pipeline finished
    pub branch: Option<String>,
    /// Full id of HEAD when the pipeline finished
    pub revision: Option<String>,
    pub normalize: NormalizeOutcome,
    pub upstream_strategy: Option<&'static str>,
    pub metadata_stamped: bool,
    pub committed: bool,
    pub origin: OriginOutcome,
    /// `(name, url)` of every remote when the pipeline finished
    pub remotes: Vec<(String, String)>,
    /// Non-fatal failures, in the order they happened
    pub warnings: Vec<String>,
}

/// Runs bootstraps with a fixed configuration and set of collaborators
pub struct Bootstrapper {
    config: BootstrapConfig,
    git: Arc<dyn GitRunner>,
    prompter: Arc<dyn Prompter>,
    scaffolder: Arc<dyn Scaffolder>,
}

impl Bootstrapper {
    /// Bootstrapper using the system git, answering every prompt with its
    /// default and writing no extra files
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            git: Arc::new(SystemGit),
            prompter: Arc::new(NonInteractivePrompter),
            scaffolder: Arc::new(NoScaffold),
        }
    }

    pub fn with_git(mut self, git: Arc<dyn GitRunner>) -> Self {
        self.git = git;
        self
    }

    pub fn with_prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn with_scaffolder(mut self, scaffolder: Arc<dyn Scaffolder>) -> Self {
        self.scaffolder = scaffolder;
        self
    }

    /// Bootstrap `request.destination` from `request.template_url`
    ///
    /// # Errors
    /// Returns error if:
    /// - git is not installed
    /// - The requested tag is not on the remote
    /// - The destination already exists
    /// - Clone or checkout fails
    pub async fn run(&self, request: &BootstrapRequest) -> Result<BootstrapReport> {
        let git = self.git.as_ref();
        let workflow = &self.config.git_workflow;
        let root = request.destination.as_path();
        let mut warnings = Vec::new();

        check_git_available(git).await?;

        let target = resolve_target(&request.selector);
        info!("Target: {}", target);

        let tag_check = if target.needs_remote_check() {
            let check = check_remote_tag(
                git,
                &request.template_url,
                &target.value,
                self.config.suggestion_limit,
            )
            .await;
            match &check {
                TagCheck::Exists => {}
                TagCheck::Missing {
                    suggestions,
                    omitted,
                } => {
                    return Err(Error::target_not_found(
                        target.value.as_str(),
                        suggestions.clone(),
                        *omitted,
                    ));
                }
                TagCheck::Unverified { reason } => warnings.push(format!(
                    "Could not verify that '{}' exists ({})",
                    target.value, reason
                )),
            }
            Some(check)
        } else {
            None
        };

        acquire(git, &request.template_url, root, &target).await?;

        if let Err(e) = configure_user(
            git,
            root,
            request.git_name.as_deref(),
            request.git_email.as_deref(),
        )
        .await
        {
            record(&mut warnings, format!("Could not set the git identity: {}", e));
        }

        let normalize = normalize_branch(git, root, &workflow.integration_branch).await;
        match &normalize {
            NormalizeOutcome::Exhausted { errors, .. } => record(
                &mut warnings,
                format!(
                    "Could not switch to '{}': {}",
                    workflow.integration_branch,
                    errors.join("; ")
                ),
            ),
            NormalizeOutcome::Undetected { reason } => record(
                &mut warnings,
                format!("Could not determine the current branch: {}", reason),
            ),
            _ => {}
        }

        let topology = configure_upstream(git, root, workflow, &request.template_url).await;
        warnings.extend(topology.warnings);

        if let Err(e) = self.scaffolder.scaffold(root).await {
            record(&mut warnings, format!("Scaffolding failed: {}", e));
        }

        let installed_version = match self.resolve_installed_version(root, request).await {
            Ok(version) => Some(version),
            Err(e) => {
                record(
                    &mut warnings,
                    format!("Could not determine the installed version: {}", e),
                );
                None
            }
        };

        let metadata_stamped = match &installed_version {
            Some(version) => match self.stamp(root, request, version).await {
                Ok(()) => true,
                Err(e) => {
                    record(
                        &mut warnings,
                        format!("Could not record install metadata: {}", e),
                    );
                    false
                }
            },
            None => false,
        };

        let committed = match commit_all(git, root, &workflow.initial_commit_message).await {
            Ok(()) => true,
            Err(e) => {
                record(
                    &mut warnings,
                    format!("Could not create the initialization commit: {}", e),
                );
                false
            }
        };

        let origin = match attach_origin(git, root, workflow, self.prompter.as_ref()).await {
            Ok(outcome) => outcome,
            Err(e) => OriginOutcome::Failed {
                reason: e.to_string(),
            },
        };
        match &origin {
            OriginOutcome::Failed { reason } => record(
                &mut warnings,
                format!(
                    "Could not connect the '{}' remote: {}",
                    workflow.origin_remote, reason
                ),
            ),
            OriginOutcome::Added {
                push:
                    PushOutcome::Failed {
                        reason,
                        retry_command,
                    },
                ..
            } => record(
                &mut warnings,
                format!("Push failed: {}. Retry with: {}", reason, retry_command),
            ),
            _ => {}
        }

        let branch = get_current_branch(git, root).await.ok().flatten();
        let revision = head_revision(git, root).await.ok();
        let remotes = list_remotes(git, root).await.unwrap_or_default();

        info!(
            "Bootstrap of {} finished with {} warning(s)",
            root,
            warnings.len()
        );

        Ok(BootstrapReport {
            destination: request.destination.clone(),
            target,
            tag_check,
            installed_version,
            branch,
            revision,
            normalize,
            upstream_strategy: topology.upstream_strategy,
            metadata_stamped,
            committed,
            origin,
            remotes,
            warnings,
        })
    }

    async fn resolve_installed_version(
        &self,
        root: &Utf8Path,
        request: &BootstrapRequest,
    ) -> Result<String> {
        let short = if resolve_target(&request.selector).is_latest() {
            Some(short_revision(self.git.as_ref(), root).await?)
        } else {
            None
        };

        installed_version(&request.selector, short.as_deref())
            .ok_or_else(|| Error::git_operation("No revision to record"))
    }

    async fn stamp(
        &self,
        root: &Utf8Path,
        request: &BootstrapRequest,
        version: &str,
    ) -> Result<()> {
        let manifest_config = &self.config.manifest;
        let path = manifest_path(root, manifest_config);
        let manifest = read_manifest(&path).await?;

        let metadata = InstallMetadata::new(
            version.to_string(),
            request.selector.clone(),
            TemplateInfo::from_manifest(&manifest),
            &request.template_url,
        );
        write_metadata(&path, manifest, &manifest_config.metadata_key, &metadata).await
    }
}

fn record(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::ScriptedGit;
    use crate::git::GitOutput;
    use tempfile::TempDir;

    const URL: &str = "https://example.com/template.git";

    fn request(temp: &TempDir, selector: Selector) -> BootstrapRequest {
        BootstrapRequest {
            template_url: URL.to_string(),
            destination: Utf8PathBuf::from_path_buf(temp.path().join("site")).unwrap(),
            selector,
            git_name: None,
            git_email: None,
        }
    }

    fn bootstrapper(git: ScriptedGit) -> (Bootstrapper, Arc<ScriptedGit>) {
        let git = Arc::new(git);
        let runner: Arc<dyn GitRunner> = git.clone();
        let bootstrapper = Bootstrapper::new(BootstrapConfig::default()).with_git(runner);
        (bootstrapper, git)
    }

    fn cloned_git() -> ScriptedGit {
        let git = ScriptedGit::new();
        git.respond("--version", GitOutput::ok("git version 2.43.0"));
        git.respond("clone", GitOutput::ok(""));
        git.respond("branch --show-current", GitOutput::ok("main\n"));
        git.respond("remote rename", GitOutput::ok(""));
        git.respond("config --local", GitOutput::ok(""));
        git.respond("rev-parse --short HEAD", GitOutput::ok("abc1234\n"));
        git.respond("rev-parse HEAD", GitOutput::ok("abc1234def\n"));
        git.respond("add", GitOutput::ok(""));
        git.respond("commit", GitOutput::ok(""));
        git.respond(
            "remote -v",
            GitOutput::ok("upstream\thttps://example.com/template.git (fetch)\n"),
        );
        git
    }

    #[tokio::test]
    async fn test_missing_tag_aborts_before_clone() {
        let temp = TempDir::new().unwrap();
        let git = ScriptedGit::new();
        git.respond("--version", GitOutput::ok("git version 2.43.0"));
        git.respond(
            "ls-remote",
            GitOutput::ok("aaa\trefs/tags/v1.0.0\nbbb\trefs/tags/v1.2.0\n"),
        );
        let (bootstrapper, git) = bootstrapper(git);

        let result = bootstrapper
            .run(&request(&temp, Selector::tag("v1.1.0")))
            .await;

        match result {
            Err(Error::TargetNotFound { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["v1.2.0", "v1.0.0"]);
            }
            other => panic!("Expected TargetNotFound, got: {:?}", other),
        }
        assert!(!git.calls().iter().any(|c| c.starts_with("clone")));
    }

    #[tokio::test]
    async fn test_missing_git_is_fatal() {
        let temp = TempDir::new().unwrap();
        let (bootstrapper, _) = bootstrapper(ScriptedGit::new());

        let result = bootstrapper.run(&request(&temp, Selector::default())).await;
        assert!(matches!(result, Err(Error::GitNotFound)));
    }

    #[tokio::test]
    async fn test_unverified_tag_continues_with_warning() {
        let temp = TempDir::new().unwrap();
        let git = cloned_git();
        git.respond("rev-parse --verify", GitOutput::ok("abc1234def\n"));
        git.respond("-c advice.detachedHead=false checkout", GitOutput::ok(""));
        let (bootstrapper, _) = bootstrapper(git);

        let report = bootstrapper
            .run(&request(&temp, Selector::tag("stable")))
            .await
            .unwrap();

        assert!(matches!(report.tag_check, Some(TagCheck::Unverified { .. })));
        assert!(report.warnings[0].contains("Could not verify that 'stable' exists"));
        assert_eq!(report.installed_version.as_deref(), Some("stable"));
    }

    #[tokio::test]
    async fn test_stamp_failure_still_commits() {
        let temp = TempDir::new().unwrap();
        let (bootstrapper, git) = bootstrapper(cloned_git());

        let report = bootstrapper
            .run(&request(&temp, Selector::default()))
            .await
            .unwrap();

        assert!(report.tag_check.is_none());
        assert_eq!(report.installed_version.as_deref(), Some("abc1234"));
        assert!(!report.metadata_stamped);
        assert!(report.committed);
        assert_eq!(report.normalize, NormalizeOutcome::AlreadyOnBranch);
        assert_eq!(report.upstream_strategy, Some("rename"));
        assert_eq!(report.origin, OriginOutcome::Skipped);
        assert_eq!(
            report.remotes,
            vec![("upstream".to_string(), URL.to_string())]
        );
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("install metadata"));
        assert!(git.was_called(
            "commit --quiet --allow-empty -m chore: initialize project from aether template"
        ));
    }

    #[tokio::test]
    async fn test_commit_failure_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let git = cloned_git();
        git.respond("commit", GitOutput::failed("fatal: unable to auto-detect email"));
        let (bootstrapper, _) = bootstrapper(git);

        let report = bootstrapper
            .run(&request(&temp, Selector::default()))
            .await
            .unwrap();

        assert!(!report.committed);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("initialization commit")));
    }

    #[tokio::test]
    async fn test_topology_failure_still_commits() {
        let temp = TempDir::new().unwrap();
        let git = cloned_git();
        git.respond("remote", GitOutput::failed("fatal: No such remote 'origin'"));
        git.respond("config --local", GitOutput::failed("error: could not lock config file"));
        let (bootstrapper, git) = bootstrapper(git);

        let report = bootstrapper
            .run(&request(&temp, Selector::default()))
            .await
            .unwrap();

        assert!(report.committed);
        assert_eq!(report.upstream_strategy, None);
        assert!(report.remotes.is_empty());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("Could not configure the 'upstream' remote")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("Could not set pull.rebase")));
        assert!(git.calls().iter().any(|c| c.starts_with("commit")));
    }

    struct FailingScaffold;

    #[async_trait::async_trait]
    impl Scaffolder for FailingScaffold {
        async fn scaffold(&self, _root: &Utf8Path) -> Result<()> {
            Err(Error::git_operation("disk full"))
        }
    }

    #[tokio::test]
    async fn test_scaffold_failure_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let (bootstrapper, _) = bootstrapper(cloned_git());
        let bootstrapper = bootstrapper.with_scaffolder(Arc::new(FailingScaffold));

        let report = bootstrapper
            .run(&request(&temp, Selector::default()))
            .await
            .unwrap();

        assert!(report.committed);
        assert!(report.warnings.iter().any(|w| w.starts_with("Scaffolding failed")));
    }
}
