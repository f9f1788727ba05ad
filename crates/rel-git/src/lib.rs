//! rel git - repository access for release automation
//!
//! Resolves the project identity from a remote URL, tags releases and pushes
//! them with libgit2.

mod identity;
mod remote;
mod repository;
mod tags;

use std::path::Path;

use rel_core::types::ProjectIdentity;
use rel_core::vcs::VersionControl;

pub use identity::parse_remote_url;
pub use repository::{GitRepo, Result};

impl VersionControl for GitRepo {
    fn identity(&self) -> &ProjectIdentity {
        GitRepo::identity(self)
    }

    fn root(&self) -> &Path {
        GitRepo::root(self)
    }

    fn tag(&self, version: &str) -> rel_core::Result<String> {
        Ok(self.tag_version(version)?)
    }

    fn push(&self, tag: &str) -> rel_core::Result<()> {
        Ok(self.push_release(tag)?)
    }
}
