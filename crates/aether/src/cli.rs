//! CLI argument parsing with clap

use aether_projects::bootstrap::{Selector, LATEST};
use camino::Utf8PathBuf;
use clap::Parser;

/// Create a new Aether CMS project from the template repository
///
/// When several of --hash, --tag and --version are given, the first in
/// that order wins.
#[derive(Parser, Debug)]
#[command(name = "create-aether")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Directory to create the project in (must not exist)
    pub destination: Utf8PathBuf,

    /// Install the template at this commit
    #[arg(long, value_name = "REV")]
    pub hash: Option<String>,

    /// Install the template at this tag
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Install this template version (looked up as a tag)
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Install the newest template commit (default)
    #[arg(long)]
    pub latest: bool,

    /// Template repository URL
    #[arg(long, value_name = "URL")]
    pub template: Option<String>,

    /// Git user name for the new repository
    #[arg(long)]
    pub git_name: Option<String>,

    /// Git user email for the new repository
    #[arg(long)]
    pub git_email: Option<String>,

    /// Accept the default answer to every question
    #[arg(short, long, visible_alias = "no-input")]
    pub yes: bool,

    /// Configuration file to use instead of ~/.aether/config.yaml
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn selector(&self) -> Selector {
        Selector {
            hash: self.hash.clone(),
            tag: self.tag.clone(),
            version: self
                .version
                .clone()
                .or_else(|| self.latest.then(|| LATEST.to_string())),
        }
    }
}
