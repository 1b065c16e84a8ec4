//! Integration branch normalization
//!
//! After acquisition HEAD may be detached (hash or tag checkout) or sit on
//! whatever the template's default branch is called. Normalization leaves
//! the working copy on the integration branch pointing at the acquired
//! revision.
//!
//! Each starting state has its own ladder of strategies. Strategies are
//! tried in order and the first success wins; a failing strategy only
//! reports its error to the ladder.

use crate::error::Result;
use crate::git::{
    checkout_branch, create_and_switch, get_current_branch, head_revision, set_branch, CreateMode,
    GitRunner,
};
use async_trait::async_trait;
use camino::Utf8Path;
use tracing::{debug, info, warn};

/// Where HEAD was found before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchState {
    /// No branch is checked out
    Detached,
    /// A branch other than the integration branch is checked out
    OnOther(String),
    /// Already on the integration branch
    OnIntegration,
}

/// Result of [`normalize_branch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// HEAD was already on the integration branch; nothing ran
    AlreadyOnBranch,
    /// A strategy put HEAD on the integration branch
    Normalized {
        from: BranchState,
        strategy: &'static str,
    },
    /// Every strategy failed; the working copy is left as it was
    Exhausted {
        from: BranchState,
        errors: Vec<String>,
    },
    /// The starting state could not be read
    Undetected { reason: String },
}

/// One way of getting HEAD onto `branch` at `revision`
#[async_trait]
pub trait BranchStrategy: Send + Sync {
    /// Short name used in logs and outcomes
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        branch: &str,
        revision: &str,
    ) -> Result<()>;
}

/// `git switch -c <branch>`
pub struct SwitchCreate;

#[async_trait]
impl BranchStrategy for SwitchCreate {
    fn name(&self) -> &'static str {
        "switch-create"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        branch: &str,
        _revision: &str,
    ) -> Result<()> {
        create_and_switch(git, root, branch, CreateMode::Switch).await
    }
}

/// `git checkout -b <branch>`, for git versions without `switch`
pub struct CheckoutCreate;

#[async_trait]
impl BranchStrategy for CheckoutCreate {
    fn name(&self) -> &'static str {
        "checkout-create"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        branch: &str,
        _revision: &str,
    ) -> Result<()> {
        create_and_switch(git, root, branch, CreateMode::Checkout).await
    }
}

/// `git branch <branch> <rev>` followed by `git checkout <branch>`
pub struct CreateThenCheckout;

#[async_trait]
impl BranchStrategy for CreateThenCheckout {
    fn name(&self) -> &'static str {
        "create-then-checkout"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        branch: &str,
        revision: &str,
    ) -> Result<()> {
        set_branch(git, root, branch, revision, false).await?;
        checkout_branch(git, root, branch).await
    }
}

/// `git branch -f <branch> <rev>` followed by `git checkout <branch>`
///
/// Discards whatever the cloned integration branch pointed at.
pub struct ForceMove;

#[async_trait]
impl BranchStrategy for ForceMove {
    fn name(&self) -> &'static str {
        "force-move"
    }

    async fn attempt(
        &self,
        git: &dyn GitRunner,
        root: &Utf8Path,
        branch: &str,
        revision: &str,
    ) -> Result<()> {
        set_branch(git, root, branch, revision, true).await?;
        checkout_branch(git, root, branch).await
    }
}

/// Strategies for a detached HEAD, in the order they are tried
///
/// The last rung covers a clone whose default branch already is the
/// integration branch, where every creating strategy fails.
pub fn detached_ladder() -> Vec<Box<dyn BranchStrategy>> {
    vec![
        Box::new(SwitchCreate),
        Box::new(CheckoutCreate),
        Box::new(CreateThenCheckout),
        Box::new(ForceMove),
    ]
}

/// Strategies for HEAD on a foreign branch, in the order they are tried
pub fn on_other_ladder() -> Vec<Box<dyn BranchStrategy>> {
    vec![Box::new(CheckoutCreate), Box::new(ForceMove)]
}

/// Read where HEAD currently is relative to `branch`
pub async fn detect_state(
    git: &dyn GitRunner,
    root: &Utf8Path,
    branch: &str,
) -> Result<BranchState> {
    Ok(match get_current_branch(git, root).await? {
        None => BranchState::Detached,
        Some(current) if current == branch => BranchState::OnIntegration,
        Some(current) => BranchState::OnOther(current),
    })
}

/// Put the working copy on `branch` at the current revision
///
/// Never fails: an exhausted ladder is reported in the outcome and the
/// working copy stays usable in whatever state it was left.
pub async fn normalize_branch(
    git: &dyn GitRunner,
    root: &Utf8Path,
    branch: &str,
) -> NormalizeOutcome {
    let state = match detect_state(git, root, branch).await {
        Ok(state) => state,
        Err(e) => {
            warn!("Could not determine the current branch: {}", e);
            return NormalizeOutcome::Undetected {
                reason: e.to_string(),
            };
        }
    };

    let ladder = match &state {
        BranchState::OnIntegration => {
            debug!("Already on '{}'", branch);
            return NormalizeOutcome::AlreadyOnBranch;
        }
        BranchState::Detached => {
            info!("HEAD is detached; creating '{}'", branch);
            detached_ladder()
        }
        BranchState::OnOther(current) => {
            info!("On branch '{}'; moving to '{}'", current, branch);
            on_other_ladder()
        }
    };

    let revision = match head_revision(git, root).await {
        Ok(revision) => revision,
        Err(e) => {
            warn!("Could not resolve HEAD: {}", e);
            return NormalizeOutcome::Undetected {
                reason: e.to_string(),
            };
        }
    };

    match run_ladder(&ladder, git, root, branch, &revision).await {
        Ok(strategy) => NormalizeOutcome::Normalized {
            from: state,
            strategy,
        },
        Err(errors) => {
            warn!(
                "Could not move the working copy onto '{}' ({} strategies failed)",
                branch,
                errors.len()
            );
            NormalizeOutcome::Exhausted {
                from: state,
                errors,
            }
        }
    }
}

/// Try each strategy in order
///
/// # Returns
/// The name of the first strategy that succeeded, or every strategy's
/// error message in order
pub async fn run_ladder(
    ladder: &[Box<dyn BranchStrategy>],
    git: &dyn GitRunner,
    root: &Utf8Path,
    branch: &str,
    revision: &str,
) -> std::result::Result<&'static str, Vec<String>> {
    let mut errors = Vec::with_capacity(ladder.len());

    for strategy in ladder {
        match strategy.attempt(git, root, branch, revision).await {
            Ok(()) => {
                info!("On '{}' via {}", branch, strategy.name());
                return Ok(strategy.name());
            }
            Err(e) => {
                debug!("Strategy {} failed: {}", strategy.name(), e);
                errors.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }

    Err(errors)
}
