//! Type definitions for create-aether configuration

mod bootstrap_config;

pub use bootstrap_config::*;
