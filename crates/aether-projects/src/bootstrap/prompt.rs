//! Question-and-answer seam for the optional interactive steps

use crate::error::Result;
use async_trait::async_trait;

/// Asks the user a question and returns the trimmed answer
#[async_trait]
pub trait Prompter: Send + Sync {
    /// `default` is returned when the user just presses enter
    async fn ask(&self, question: &str, default: &str) -> Result<String>;
}

/// Answers every question with its default
#[derive(Debug, Clone, Default)]
pub struct NonInteractivePrompter;

#[async_trait]
impl Prompter for NonInteractivePrompter {
    async fn ask(&self, _question: &str, default: &str) -> Result<String> {
        Ok(default.trim().to_string())
    }
}

/// Whether an answer means yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
