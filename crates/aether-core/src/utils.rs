//! Shared utility functions for aether crates

use crate::error::{Error, Result};
use camino::Utf8PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// containerized shells with an overridden HOME resolve the same directory
/// their scripts use.
pub fn get_home_dir() -> Result<Utf8PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(Utf8PathBuf::from(home));
    }

    let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
    Utf8PathBuf::from_path_buf(home).map_err(|p| {
        Error::invalid_config(format!("Home directory is not valid UTF-8: {}", p.display()))
    })
}
