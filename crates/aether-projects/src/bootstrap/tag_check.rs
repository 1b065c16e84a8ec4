//! Remote tag existence check
//!
//! Confirms a named version exists on the template remote before anything
//! is written to disk.

use crate::git::{list_remote_tags, GitRunner, RemoteTag};
use tracing::{debug, warn};

/// Outcome of looking a tag up on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagCheck {
    /// The remote advertises the tag
    Exists,
    /// The remote does not advertise the tag
    Missing {
        /// Closest available tags, lexicographically descending
        suggestions: Vec<String>,
        /// Number of tags left out of `suggestions`
        omitted: usize,
    },
    /// The remote could not be queried; installation proceeds unverified
    Unverified { reason: String },
}

/// Look `name` up among the remote's tags
pub async fn check_remote_tag(
    git: &dyn GitRunner,
    url: &str,
    name: &str,
    suggestion_limit: usize,
) -> TagCheck {
    match list_remote_tags(git, url).await {
        Ok(tags) => evaluate_tags(&tags, name, suggestion_limit),
        Err(e) => {
            warn!(
                "Could not list tags of {} ({}); continuing without verifying '{}'",
                url, e, name
            );
            TagCheck::Unverified {
                reason: e.to_string(),
            }
        }
    }
}

/// Decide whether `name` is among `tags` and rank suggestions if it is not
///
/// Peeled `^{}` entries never match and are never suggested.
pub fn evaluate_tags(tags: &[RemoteTag], name: &str, suggestion_limit: usize) -> TagCheck {
    let mut names: Vec<&str> = tags
        .iter()
        .filter(|tag| !tag.peeled)
        .map(|tag| tag.name.as_str())
        .collect();

    if names.contains(&name) {
        debug!("Tag '{}' exists on remote", name);
        return TagCheck::Exists;
    }

    names.sort_unstable_by(|a, b| b.cmp(a));
    names.dedup();

    let omitted = names.len().saturating_sub(suggestion_limit);
    let suggestions = names
        .into_iter()
        .take(suggestion_limit)
        .map(str::to_string)
        .collect();

    TagCheck::Missing {
        suggestions,
        omitted,
    }
}
