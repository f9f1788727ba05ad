//! Remote operations

use git2::{Cred, CredentialType, PushOptions, RemoteCallbacks};
use tracing::{debug, info, instrument, warn};

use rel_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Refspecs pushing the current branch and `tag` under the same names
    fn release_refspecs(&self, tag: &str) -> Result<Vec<String>> {
        let mut refspecs = Vec::with_capacity(2);

        let head = self.repo.head()?;
        match head.name() {
            Some(branch) if head.is_branch() => refspecs.push(format!("{0}:{0}", branch)),
            _ => warn!("HEAD is detached, pushing the tag only"),
        }

        refspecs.push(format!("refs/tags/{0}:refs/tags/{0}", tag));
        Ok(refspecs)
    }

    fn callbacks<'a>(&self, rejected: &'a mut Vec<String>) -> Result<RemoteCallbacks<'a>> {
        let git_config = self.repo.config()?;
        let mut tried_agent = false;
        let mut tried_helper = false;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username, allowed| {
            if allowed.contains(CredentialType::SSH_KEY) && !tried_agent {
                tried_agent = true;
                debug!(url, "trying ssh-agent credentials");
                return Cred::ssh_key_from_agent(username.unwrap_or("git"));
            }
            if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) && !tried_helper {
                tried_helper = true;
                debug!(url, "trying git credential helper");
                return Cred::credential_helper(&git_config, url, username);
            }
            if allowed.contains(CredentialType::DEFAULT) {
                return Cred::default();
            }
            Err(git2::Error::from_str("no usable credentials for remote"))
        });
        callbacks.push_update_reference(move |refname, status| {
            if let Some(message) = status {
                rejected.push(format!("{}: {}", refname, message));
            }
            Ok(())
        });

        Ok(callbacks)
    }

    /// URL pushes go to: `pushurl` when configured, else `url`
    fn push_url(&self) -> Result<String> {
        let remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|_| GitError::RemoteNotFound(self.remote.clone()))?;
        remote
            .pushurl()
            .or_else(|| remote.url())
            .map(str::to_string)
            .ok_or_else(|| GitError::PushFailed(format!("{}: remote has no URL", self.remote)))
    }

    /// Push the current branch and `tag` to the configured remote
    ///
    /// Refs the remote already has are not an error. Any ref the remote
    /// rejects fails the push.
    #[instrument(skip(self), fields(remote = %self.remote))]
    pub fn push_release(&self, tag: &str) -> Result<()> {
        let start = std::time::Instant::now();
        // Remote::push does not honour remote.<name>.pushurl
        let url = self.push_url()?;
        debug!(url = %url, "resolved push URL");
        let mut remote = self.repo.remote_anonymous(&url)?;
        let refspecs = self.release_refspecs(tag)?;

        let mut rejected = Vec::new();
        {
            let mut options = PushOptions::new();
            options.remote_callbacks(self.callbacks(&mut rejected)?);

            remote
                .push(&refspecs, Some(&mut options))
                .map_err(|e| GitError::PushFailed(format!("{}: {}", self.remote, e.message())))?;
        }

        if !rejected.is_empty() {
            return Err(GitError::PushFailed(rejected.join("; ")));
        }

        info!(
            remote = %self.remote,
            tag,
            duration_ms = start.elapsed().as_millis(),
            "pushed commits and tags"
        );
        Ok(())
    }
}
