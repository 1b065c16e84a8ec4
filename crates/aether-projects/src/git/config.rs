//! Git configuration management

use crate::error::{Error, Result};
use crate::git::runner::GitRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// Configure git user information in the repository's local config
///
/// # Arguments
/// * `path` - Repository path
/// * `name` - User name to set
/// * `email` - User email to set
pub async fn configure_user(
    git: &dyn GitRunner,
    path: &Utf8Path,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    if name.is_none() && email.is_none() {
        debug!("No git config overrides to apply");
        return Ok(());
    }

    info!("Configuring git user information");

    if let Some(name) = name {
        set_config_value(git, path, "user.name", name).await?;
        info!("Git user name set to: {}", name);
    }

    if let Some(email) = email {
        set_config_value(git, path, "user.email", email).await?;
        info!("Git user email set to: {}", email);
    }

    Ok(())
}

/// Set a value in the repository's local git config
pub async fn set_config_value(
    git: &dyn GitRunner,
    path: &Utf8Path,
    key: &str,
    value: &str,
) -> Result<()> {
    debug!("Setting git config: {} = {}", key, value);

    let output = git
        .run(Some(path), &["config", "--local", key, value])
        .await?;

    if !output.success {
        return Err(Error::invalid_config(format!(
            "Failed to set {}: {}",
            key,
            output.stderr.trim()
        )));
    }

    Ok(())
}
