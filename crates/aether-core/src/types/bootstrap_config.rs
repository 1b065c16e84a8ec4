//! Bootstrap configuration types
//!
//! These types control where the template comes from, how the resulting
//! working copy is wired for later updates, and where install provenance
//! is recorded.

use serde::{Deserialize, Serialize};

/// Complete bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BootstrapConfig {
    /// URL of the template repository to clone
    #[serde(default = "default_template_repository")]
    pub template_repository: String,

    /// Maximum number of tag suggestions shown when a tag is not found
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Git workflow defaults
    #[serde(default)]
    pub git_workflow: GitWorkflowConfig,

    /// Project manifest settings
    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            template_repository: default_template_repository(),
            suggestion_limit: default_suggestion_limit(),
            git_workflow: GitWorkflowConfig::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

fn default_template_repository() -> String {
    "https://github.com/aether-cms/aether-template.git".to_string()
}
fn default_suggestion_limit() -> usize {
    10
}

/// Git workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Branch the bootstrapped working copy must end up on
    #[serde(default = "default_integration_branch")]
    pub integration_branch: String,

    /// Remote name `git clone` assigns to the template source
    #[serde(default = "default_clone_remote")]
    pub clone_remote: String,

    /// Remote name used to pull future template updates
    #[serde(default = "default_upstream_remote")]
    pub upstream_remote: String,

    /// Remote name for the user's own repository
    #[serde(default = "default_origin_remote")]
    pub origin_remote: String,

    /// Merge driver registered as a no-op (keep ours)
    #[serde(default = "default_merge_driver")]
    pub merge_driver: String,

    /// Message of the initialization commit
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            integration_branch: default_integration_branch(),
            clone_remote: default_clone_remote(),
            upstream_remote: default_upstream_remote(),
            origin_remote: default_origin_remote(),
            merge_driver: default_merge_driver(),
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

fn default_integration_branch() -> String {
    "main".to_string()
}
fn default_clone_remote() -> String {
    "origin".to_string()
}
fn default_upstream_remote() -> String {
    "upstream".to_string()
}
fn default_origin_remote() -> String {
    "origin".to_string()
}
fn default_merge_driver() -> String {
    "ours".to_string()
}
fn default_initial_commit_message() -> String {
    "chore: initialize project from aether template".to_string()
}

/// Project manifest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestConfig {
    /// Manifest file name relative to the project root
    #[serde(default = "default_manifest_file")]
    pub file: String,

    /// Key of the install metadata sub-document
    #[serde(default = "default_metadata_key")]
    pub metadata_key: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file: default_manifest_file(),
            metadata_key: default_metadata_key(),
        }
    }
}

fn default_manifest_file() -> String {
    "package.json".to_string()
}
fn default_metadata_key() -> String {
    "aetherCMS".to_string()
}
