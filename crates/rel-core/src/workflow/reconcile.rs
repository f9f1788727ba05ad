//! Remote release reconciliation

use tracing::{info, instrument};

use crate::error::{HostError, Result};
use crate::host::ReleaseHost;
use crate::types::{AssetSpec, NewRelease};

/// Drives a release record through `absent -> draft -> published`
pub struct ReleaseReconciler<'a> {
    host: &'a dyn ReleaseHost,
}

impl<'a> ReleaseReconciler<'a> {
    /// Create a reconciler over a release host
    pub fn new(host: &'a dyn ReleaseHost) -> Self {
        Self { host }
    }

    /// Get or create the draft release for `tag`
    ///
    /// An existing draft is reused untouched. An existing published release
    /// is a conflict; nothing is created or modified in that case.
    #[instrument(skip(self), fields(host = self.host.name()))]
    pub async fn ensure_release(&self, hash: &str, tag: &str) -> Result<u64> {
        match self.host.release_by_tag(tag).await? {
            None => {
                info!(tag, "creating release as draft");
                let created = self.host.create_release(&NewRelease::draft(tag, hash)).await?;
                Ok(created.id)
            }
            Some(existing) if !existing.draft => Err(HostError::ReleaseConflict {
                tag: tag.to_string(),
            }
            .into()),
            Some(existing) => {
                info!(
                    release = existing.display_name(),
                    id = existing.id,
                    "release already exists as a draft release"
                );
                Ok(existing.id)
            }
        }
    }

    /// Upload the release artifact
    #[instrument(skip(self, asset), fields(host = self.host.name(), name = %asset.name))]
    pub async fn upload_asset(&self, asset: &AssetSpec) -> Result<()> {
        info!(name = %asset.name, path = %asset.path.display(), "uploading release asset");
        self.host.upload_asset(asset).await
    }

    /// Publish a draft release
    #[instrument(skip(self), fields(host = self.host.name()))]
    pub async fn finalize_release(&self, id: u64) -> Result<()> {
        let mut release = self
            .host
            .release_by_id(id)
            .await?
            .ok_or(HostError::ReleaseNotFound(id))?;

        info!(release = release.display_name(), "removing draft status");
        release.draft = false;
        self.host.edit_release(&release).await?;
        Ok(())
    }
}
