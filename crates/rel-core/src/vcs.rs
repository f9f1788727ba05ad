//! Version-control seam

use std::path::Path;

use crate::error::Result;
use crate::types::ProjectIdentity;

/// Local repository operations the release workflow needs
pub trait VersionControl {
    /// Owner and repository resolved from the remote URL
    fn identity(&self) -> &ProjectIdentity;

    /// Absolute top-level directory of the working tree
    fn root(&self) -> &Path;

    /// Tag the current HEAD with `version`, or find the existing tag
    ///
    /// Returns the commit hash the tag points at. Never moves an existing tag.
    fn tag(&self, version: &str) -> Result<String>;

    /// Push the current branch and the `tag` to the remote
    ///
    /// A remote that is already up to date is not an error.
    fn push(&self, tag: &str) -> Result<()>;
}
