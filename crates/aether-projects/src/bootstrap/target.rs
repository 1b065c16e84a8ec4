//! Version selector resolution

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal version value meaning "whatever the template's default branch has"
pub const LATEST: &str = "latest";

/// The caller's version-targeting input
///
/// Recorded verbatim as `installOptions` in the install metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Selector {
    pub fn hash(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Default::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Default::default()
        }
    }

    /// Resolve to the single highest-priority target (Hash > Tag > Version > Latest)
    pub fn resolve(&self) -> ResolvedTarget {
        resolve_target(self)
    }
}

/// Which selector field produced a [`ResolvedTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Hash,
    Tag,
    Version,
    Latest,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Tag => "tag",
            Self::Version => "version",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concrete revision selector chosen for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub kind: TargetKind,
    pub value: String,
}

impl ResolvedTarget {
    pub fn latest() -> Self {
        Self {
            kind: TargetKind::Latest,
            value: LATEST.to_string(),
        }
    }

    pub fn is_latest(&self) -> bool {
        self.kind == TargetKind::Latest
    }

    /// Whether the target names a tag that can be confirmed on the remote
    ///
    /// Version strings are validated as tag names; hashes are not listed by
    /// the remote and are left to the checkout.
    pub fn needs_remote_check(&self) -> bool {
        matches!(self.kind, TargetKind::Tag | TargetKind::Version) && self.value != LATEST
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_latest() {
            f.write_str(LATEST)
        } else {
            write!(f, "{} {}", self.kind, self.value)
        }
    }
}

/// Pick the highest-priority non-empty selector field
pub fn resolve_target(selector: &Selector) -> ResolvedTarget {
    let set = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    if let Some(hash) = set(&selector.hash) {
        return ResolvedTarget {
            kind: TargetKind::Hash,
            value: hash,
        };
    }
    if let Some(tag) = set(&selector.tag) {
        return ResolvedTarget {
            kind: TargetKind::Tag,
            value: tag,
        };
    }
    match set(&selector.version) {
        Some(version) if version != LATEST => ResolvedTarget {
            kind: TargetKind::Version,
            value: version,
        },
        _ => ResolvedTarget::latest(),
    }
}
