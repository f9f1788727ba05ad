//! Tag operations

use tracing::{debug, info, instrument};

use rel_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Commit an existing tag named `name` points at
    pub fn find_tag(&self, name: &str) -> Result<Option<String>> {
        let mut found = None;
        self.repo.tag_foreach(|oid, refname| {
            if found.is_none() {
                let refname = String::from_utf8_lossy(refname);
                if refname.trim_start_matches("refs/tags/") == name {
                    found = Some(oid);
                }
            }
            true
        })?;

        match found {
            Some(oid) => {
                let commit = self.repo.find_object(oid, None)?.peel_to_commit()?;
                Ok(Some(commit.id().to_string()))
            }
            None => Ok(None),
        }
    }

    /// Tag HEAD with `version`, or return the commit of the existing tag
    ///
    /// An existing tag is never moved, even when HEAD has advanced.
    #[instrument(skip(self))]
    pub fn tag_version(&self, version: &str) -> Result<String> {
        if let Some(hash) = self.find_tag(version)? {
            info!(tag = version, hash = %hash, "tag already exists");
            return Ok(hash);
        }

        let head = self.head_commit().map_err(|e| GitError::TagFailed {
            name: version.to_string(),
            reason: e.to_string(),
        })?;
        let hash = head.id().to_string();

        info!(hash = %hash, tag = version, "tagging");
        self.repo
            .tag_lightweight(version, head.as_object(), false)
            .map_err(|e| GitError::TagFailed {
                name: version.to_string(),
                reason: e.message().to_string(),
            })?;

        debug!(tag = version, "created lightweight tag");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::{commit_file, setup_repo};

    fn open(url: &str) -> (tempfile::TempDir, git2::Repository, GitRepo) {
        let (temp, raw) = setup_repo(url);
        let repo = GitRepo::discover(temp.path(), "origin").unwrap();
        (temp, raw, repo)
    }

    fn tag_count(raw: &git2::Repository) -> usize {
        raw.tag_names(None).unwrap().len()
    }

    #[test]
    fn test_tag_is_idempotent() {
        let (_temp, raw, repo) = open("git@github.com:acme/widget.git");
        let head = raw.head().unwrap().peel_to_commit().unwrap().id().to_string();

        let first = repo.tag_version("2.0.0").unwrap();
        let second = repo.tag_version("2.0.0").unwrap();

        assert_eq!(first, head);
        assert_eq!(first, second);
        assert_eq!(tag_count(&raw), 1);
    }

    #[test]
    fn test_existing_tag_is_not_moved() {
        let (_temp, raw, repo) = open("git@github.com:acme/widget.git");
        let tagged = repo.tag_version("1.0.0").unwrap();

        let new_head = commit_file(&raw, "README.md", "more");
        let again = repo.tag_version("1.0.0").unwrap();

        assert_eq!(again, tagged);
        assert_ne!(again, new_head.to_string());
    }

    #[test]
    fn test_annotated_tag_resolves_to_commit() {
        let (_temp, raw, repo) = open("git@github.com:acme/widget.git");
        let head = raw.head().unwrap().peel_to_commit().unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        raw.tag("3.1.0", head.as_object(), &sig, "release", false)
            .unwrap();

        assert_eq!(repo.tag_version("3.1.0").unwrap(), head.id().to_string());
    }

    #[test]
    fn test_find_tag_exact_name() {
        let (_temp, _raw, repo) = open("git@github.com:acme/widget.git");
        repo.tag_version("1.0.0").unwrap();

        assert!(repo.find_tag("1.0.0").unwrap().is_some());
        assert!(repo.find_tag("1.0").unwrap().is_none());
        assert!(repo.find_tag("v1.0.0").unwrap().is_none());
    }
}
