//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{debug, info, instrument};

use rel_core::error::GitError;
use rel_core::types::ProjectIdentity;

use crate::identity::parse_remote_url;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Working-tree repository bound to the remote releases are pushed to
pub struct GitRepo {
    pub(crate) repo: Repository,
    pub(crate) remote: String,
    root: PathBuf,
    identity: ProjectIdentity,
}

impl GitRepo {
    /// Discover the repository containing `start_path` and resolve its identity
    /// from `remote`
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path, remote: &str) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::BareRepository(repo.path().to_path_buf()))?;
        let root = workdir
            .canonicalize()
            .map_err(|e| GitError::OpenFailed(format!("{}: {}", workdir.display(), e)))?;

        let url = Self::remote_url(&repo, remote)?;
        let identity = parse_remote_url(&url)?;
        debug!(root = %root.display(), identity = %identity, "resolved project");

        Ok(Self {
            repo,
            remote: remote.to_string(),
            root,
            identity,
        })
    }

    fn remote_url(repo: &Repository, name: &str) -> Result<String> {
        let remote = match repo.find_remote(name) {
            Ok(remote) => remote,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => return Err(GitError::Git2(e)),
        };

        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| GitError::IdentityResolution {
                url: String::from_utf8_lossy(remote.url_bytes()).into_owned(),
            })
    }

    /// Absolute top-level directory of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Owner and repository name of the remote
    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    /// Get the HEAD commit
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        head.peel_to_commit().map_err(GitError::Git2)
    }
}
