//! Release host seam

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AssetSpec, NewRelease, ReleaseRecord};

/// Remote release API
///
/// Implementations are thin request wrappers; the get-or-create and
/// finalize rules live in [`crate::workflow::ReleaseReconciler`].
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Host name for logs
    fn name(&self) -> &str;

    /// Look up a release by tag name; `None` when the host has no such release
    async fn release_by_tag(&self, tag: &str) -> Result<Option<ReleaseRecord>>;

    /// Look up a release by id; `None` when the host has no such release
    async fn release_by_id(&self, id: u64) -> Result<Option<ReleaseRecord>>;

    /// Create a release
    async fn create_release(&self, release: &NewRelease) -> Result<ReleaseRecord>;

    /// Upload a binary asset to a release
    async fn upload_asset(&self, asset: &AssetSpec) -> Result<()>;

    /// Submit an edited release
    async fn edit_release(&self, release: &ReleaseRecord) -> Result<ReleaseRecord>;
}
