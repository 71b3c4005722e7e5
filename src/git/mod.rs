mod repo;

pub use repo::{CommitWalk, GitRepo};

use crate::error::Result;
use crate::model::{CommitRecord, DateRange, IdentitySource};
use std::path::Path;

/// Supplies the commit history a punch card is built from.
pub trait CommitSource {
    fn is_valid_repository(path: &Path) -> bool
    where
        Self: Sized;

    /// Commits in the order the history yields them, each at most once.
    fn commits(
        &self,
        range: &DateRange,
        identity: IdentitySource,
    ) -> Result<Box<dyn Iterator<Item = Result<CommitRecord>> + '_>>;
}
