//! Install provenance recorded in the project manifest
//!
//! The update tooling reads this sub-document to learn which template
//! revision a project started from.

use crate::bootstrap::target::{resolve_target, Selector};
use crate::error::{Error, Result};
use aether_core::types::ManifestConfig;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// The manifest sub-document written once per bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallMetadata {
    pub installed_version: String,
    pub installed_at: DateTime<Utc>,
    pub install_options: Selector,
    pub template_name: Option<String>,
    pub template_version: Option<String>,
    pub template_repository: String,
}

/// Identity the template declares in its own manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub repository: Option<String>,
}

impl TemplateInfo {
    /// Read `name`, `version` and `repository` from a parsed manifest
    ///
    /// `repository` may be a plain string or an object with a `url` field.
    pub fn from_manifest(manifest: &Value) -> Self {
        let text = |key: &str| manifest.get(key).and_then(Value::as_str).map(String::from);

        let repository = match manifest.get("repository") {
            Some(Value::String(url)) => Some(url.clone()),
            Some(Value::Object(repo)) => repo.get("url").and_then(Value::as_str).map(String::from),
            _ => None,
        };

        Self {
            name: text("name"),
            version: text("version"),
            repository,
        }
    }
}

/// The version string recorded as installed
///
/// The explicit hash, tag or version when one was given; otherwise the
/// short revision HEAD was at after acquisition.
pub fn installed_version(selector: &Selector, short_revision: Option<&str>) -> Option<String> {
    let target = resolve_target(selector);
    if target.is_latest() {
        short_revision.map(String::from)
    } else {
        Some(target.value)
    }
}

impl InstallMetadata {
    pub fn new(
        installed_version: String,
        selector: Selector,
        template: TemplateInfo,
        template_url: &str,
    ) -> Self {
        Self {
            installed_version,
            installed_at: Utc::now(),
            install_options: selector,
            template_name: template.name,
            template_version: template.version,
            template_repository: template
                .repository
                .unwrap_or_else(|| template_url.to_string()),
        }
    }
}

/// Path of the manifest inside a project
pub fn manifest_path(root: &Utf8Path, config: &ManifestConfig) -> Utf8PathBuf {
    root.join(&config.file)
}

/// Read and parse the project manifest
pub async fn read_manifest(path: &Utf8Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::manifest(path.as_str(), e.to_string()))?;

    let manifest: Value = serde_json::from_str(&content)
        .map_err(|e| Error::manifest(path.as_str(), format!("invalid JSON: {}", e)))?;

    if !manifest.is_object() {
        return Err(Error::manifest(path.as_str(), "top level is not an object"));
    }
    Ok(manifest)
}

/// Store `metadata` under `key` and write the manifest back
///
/// Other keys keep their order.
pub async fn write_metadata(
    path: &Utf8Path,
    mut manifest: Value,
    key: &str,
    metadata: &InstallMetadata,
) -> Result<()> {
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| Error::manifest(path.as_str(), "top level is not an object"))?;
    object.insert(key.to_string(), serde_json::to_value(metadata)?);

    let mut content = serde_json::to_string_pretty(&manifest)?;
    content.push('\n');
    tokio::fs::write(path, content).await?;

    info!(
        "Recorded installed version {} in {}",
        metadata.installed_version, path
    );
    Ok(())
}
