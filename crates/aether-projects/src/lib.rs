//! # aether-projects
//!
//! Project bootstrap library for `create-aether` providing:
//! - Git operations (clone, checkout, branches, remotes, config, commits)
//! - Version selector resolution and remote tag checks
//! - Branch normalization and remote topology for template updates
//! - Install metadata in the project manifest
//!
//! # Examples
//!
//! ```no_run
//! use aether_core::ConfigLoader;
//! use aether_projects::bootstrap::{BootstrapRequest, Bootstrapper, Selector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()?.load()?;
//! let request = BootstrapRequest {
//!     template_url: config.template_repository.clone(),
//!     destination: "my-site".into(),
//!     selector: Selector::tag("v2.0.0"),
//!     git_name: None,
//!     git_email: None,
//! };
//!
//! let report = Bootstrapper::new(config).run(&request).await?;
//! for warning in &report.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod error;
pub mod git;

pub use error::{Error, Result};
