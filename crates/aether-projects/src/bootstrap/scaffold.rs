//! Hook for writing project files before the manifest is stamped

use crate::error::Result;
use async_trait::async_trait;
use camino::Utf8Path;

/// Writes project files into a freshly acquired working copy
///
/// Runs after the remotes are configured and before the install metadata
/// is recorded, so anything it writes lands in the initialization commit.
#[async_trait]
pub trait Scaffolder: Send + Sync {
    async fn scaffold(&self, root: &Utf8Path) -> Result<()>;
}

/// Leaves the working copy untouched
#[derive(Debug, Clone, Default)]
pub struct NoScaffold;

#[async_trait]
impl Scaffolder for NoScaffold {
    async fn scaffold(&self, _root: &Utf8Path) -> Result<()> {
        Ok(())
    }
}
