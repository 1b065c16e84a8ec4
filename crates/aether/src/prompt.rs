//! Terminal answers for the bootstrap's optional questions

use aether_projects::bootstrap::Prompter;
use aether_projects::{Error, Result};
use async_trait::async_trait;
use dialoguer::Input;
use indicatif::ProgressBar;

/// Asks on the terminal with dialoguer
///
/// A running spinner is suspended while a question is on screen.
pub struct TerminalPrompter {
    spinner: Option<ProgressBar>,
}

impl TerminalPrompter {
    pub fn new(spinner: Option<ProgressBar>) -> Self {
        Self { spinner }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&self, question: &str, default: &str) -> Result<String> {
        let question = question.to_string();
        let default = default.to_string();
        let spinner = self.spinner.clone();

        // dialoguer blocks on stdin
        let answer = tokio::task::spawn_blocking(move || {
            let read = || {
                Input::<String>::new()
                    .with_prompt(question.as_str())
                    .default(default.clone())
                    .show_default(false)
                    .allow_empty(true)
                    .interact_text()
            };
            match spinner {
                Some(pb) => pb.suspend(read),
                None => read(),
            }
        })
        .await
        .map_err(|e| Error::prompt(e.to_string()))?
        .map_err(|e| Error::prompt(e.to_string()))?;

        Ok(answer.trim().to_string())
    }
}
