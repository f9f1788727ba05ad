//! Core types for rel

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Owner and repository name of the hosted project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    /// Account or organization owning the repository
    pub owner: String,
    /// Repository name, without any `.git` suffix
    pub repo: String,
}

impl ProjectIdentity {
    /// Create a new identity
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Project the toolchain operates on
///
/// Every toolchain operation receives this explicitly; nothing in rel changes
/// the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Absolute top-level directory of the repository
    pub root: PathBuf,
    /// Name of the executable the build produces
    pub executable: String,
}

impl ProjectContext {
    /// Create a new project context
    pub fn new(root: impl Into<PathBuf>, executable: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            executable: executable.into(),
        }
    }

    /// Top-level directory of the project
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Release as reported by the release host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Host-assigned identifier
    pub id: u64,
    /// Tag the release is attached to
    pub tag_name: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the release is still a draft
    pub draft: bool,
    /// Commit (or branch) the tag is created from
    #[serde(default)]
    pub target_commitish: Option<String>,
}

impl ReleaseRecord {
    /// Name to show in logs, falling back to the tag
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.tag_name)
    }
}

/// Parameters for creating a draft release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to attach the release to
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Commit the tag points at
    pub target_commitish: String,
    /// Always true on creation
    pub draft: bool,
    /// Let the host generate notes from merged changes
    pub generate_release_notes: bool,
    /// Host expects the string form ("true", "false", "legacy")
    pub make_latest: String,
}

impl NewRelease {
    /// Draft release for `tag` targeting `hash`
    pub fn draft(tag: impl Into<String>, hash: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.clone(),
            tag_name: tag,
            target_commitish: hash.into(),
            draft: true,
            generate_release_notes: true,
            make_latest: "true".to_string(),
        }
    }
}

/// A single binary to attach to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    /// Release to attach to
    pub release_id: u64,
    /// Display name of the asset
    pub name: String,
    /// Local file to upload
    pub path: PathBuf,
}

/// Outcome of a successful release run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
    /// Released version
    pub version: String,
    /// Commit the version tag points at
    pub commit: String,
    /// Host identifier of the published release
    pub release_id: u64,
    /// Uploaded asset name
    pub asset_name: String,
    /// Toolchain that built the artifact
    pub toolchain: String,
}
