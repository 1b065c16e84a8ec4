//! # aether-core
//!
//! Core library for the create-aether CLI providing:
//! - Bootstrap configuration types (template source, git workflow, manifest)
//! - Hierarchical configuration loading (embedded defaults, user file, env)

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use types::BootstrapConfig;
pub use utils::get_home_dir;
