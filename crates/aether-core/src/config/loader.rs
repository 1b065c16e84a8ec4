//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.aether/config.yaml, or an explicit file)
//! 3. Environment variables (AETHER_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::BootstrapConfig;
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "bootstrap-defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at ~/.aether
    pub fn new() -> Result<Self> {
        let config_dir = get_home_dir()?.join(".aether");
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Load bootstrap configuration with hierarchical precedence
    pub fn load(&self) -> Result<BootstrapConfig> {
        let user_path = self.config_dir.join(USER_CONFIG_FILE);
        let overlay = if user_path.exists() {
            Some(user_path)
        } else {
            None
        };
        self.load_with_overlay(overlay.as_deref())
    }

    /// Load configuration, taking the user layer from an explicit file
    ///
    /// Unlike the implicit ~/.aether/config.yaml, an explicit file must exist.
    pub fn load_from_file(&self, path: &Utf8Path) -> Result<BootstrapConfig> {
        if !path.exists() {
            return Err(Error::config_not_found(path.as_str()));
        }
        self.load_with_overlay(Some(path))
    }

    fn load_with_overlay(&self, overlay: Option<&Utf8Path>) -> Result<BootstrapConfig> {
        let mut config = Self::load_embedded_config::<BootstrapConfig>(DEFAULTS_FILE)?;

        if let Some(path) = overlay {
            debug!("Loading user config from {}", path);
            let file_config = self.load_yaml_file::<BootstrapConfig>(path)?;
            config = Self::merge_config(config, file_config);
        }

        Self::apply_env_overrides(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two configs (base is overridden by overlay)
    ///
    /// Sections missing from the overlay file were filled with serde
    /// defaults, which mirror the embedded defaults.
    fn merge_config(_base: BootstrapConfig, overlay: BootstrapConfig) -> BootstrapConfig {
        BootstrapConfig {
            template_repository: overlay.template_repository,
            suggestion_limit: overlay.suggestion_limit,
            git_workflow: overlay.git_workflow,
            manifest: overlay.manifest,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: BootstrapConfig) -> Result<BootstrapConfig> {
        if let Ok(val) = env::var("AETHER_TEMPLATE_REPOSITORY") {
            config.template_repository = val;
        }

        if let Ok(val) = env::var("AETHER_INTEGRATION_BRANCH") {
            config.git_workflow.integration_branch = val;
        }

        if let Ok(val) = env::var("AETHER_UPSTREAM_REMOTE") {
            config.git_workflow.upstream_remote = val;
        }

        if let Ok(val) = env::var("AETHER_MANIFEST_FILE") {
            config.manifest.file = val;
        }

        if let Ok(val) = env::var("AETHER_SUGGESTION_LIMIT") {
            config.suggestion_limit = val.parse().map_err(|_| {
                Error::invalid_config("AETHER_SUGGESTION_LIMIT must be a valid number")
            })?;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
