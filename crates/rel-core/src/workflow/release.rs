//! Release workflow orchestration

use tracing::{info, instrument};

use super::cleanup::CleanupGuard;
use super::reconcile::ReleaseReconciler;
use crate::error::Result;
use crate::host::ReleaseHost;
use crate::toolchain::{select_toolchain, Toolchain};
use crate::types::{AssetSpec, ProjectContext, ReleaseSummary};
use crate::vcs::VersionControl;

/// One release run bound to a toolchain, repository and host
///
/// Steps run strictly in order: read version, build, tag, push, ensure draft
/// release, rebuild, upload, finalize. The toolchain cleanup runs exactly once
/// whichever step ends the run.
pub struct ReleaseWorkflow<'a> {
    toolchain: &'a dyn Toolchain,
    vcs: &'a dyn VersionControl,
    host: &'a dyn ReleaseHost,
    ctx: ProjectContext,
}

impl<'a> ReleaseWorkflow<'a> {
    /// Bind a workflow to an already chosen toolchain
    pub fn new(
        toolchain: &'a dyn Toolchain,
        vcs: &'a dyn VersionControl,
        host: &'a dyn ReleaseHost,
    ) -> Self {
        let ctx = ProjectContext::new(vcs.root(), vcs.identity().repo.clone());
        Self {
            toolchain,
            vcs,
            host,
            ctx,
        }
    }

    /// Probe `toolchains` in order against the repository and bind the first match
    ///
    /// Fails before any side effect when nothing matches.
    pub fn select(
        toolchains: &'a [Box<dyn Toolchain>],
        vcs: &'a dyn VersionControl,
        host: &'a dyn ReleaseHost,
    ) -> Result<Self> {
        let ctx = ProjectContext::new(vcs.root(), vcs.identity().repo.clone());
        let toolchain = select_toolchain(toolchains, &ctx)?;
        Ok(Self {
            toolchain,
            vcs,
            host,
            ctx,
        })
    }

    /// Project the workflow operates on
    pub fn context(&self) -> &ProjectContext {
        &self.ctx
    }

    /// Name of the bound toolchain
    pub fn toolchain_name(&self) -> &'static str {
        self.toolchain.name()
    }

    /// Run the release
    #[instrument(skip(self), fields(project = %self.vcs.identity(), toolchain = self.toolchain.name()))]
    pub async fn execute(&self) -> Result<ReleaseSummary> {
        let _cleanup = CleanupGuard::new(self.toolchain, &self.ctx);

        let version = self.toolchain.current_version(&self.ctx)?;
        info!(version = %version, "executing release workflow");

        self.toolchain.build(&self.ctx)?;

        let hash = self.vcs.tag(&version)?;
        self.vcs.push(&version)?;

        let reconciler = ReleaseReconciler::new(self.host);
        let release_id = reconciler.ensure_release(&hash, &version).await?;

        self.toolchain.build(&self.ctx)?;
        let asset = AssetSpec {
            release_id,
            name: self
                .toolchain
                .artifact_name(&self.ctx.executable, &version),
            path: self.toolchain.artifact_path(&self.ctx)?,
        };
        reconciler.upload_asset(&asset).await?;
        reconciler.finalize_release(release_id).await?;

        info!(version = %version, release_id, "release complete");
        Ok(ReleaseSummary {
            version,
            commit: hash,
            release_id,
            asset_name: asset.name,
            toolchain: self.toolchain.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GitError, HostError, RelError, ToolchainError};
    use crate::types::ReleaseRecord;
    use crate::workflow::fakes::{FakeHost, FakeToolchain, FakeVcs};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_happy_path() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let summary = ReleaseWorkflow::new(&toolchain, &vcs, &host)
            .execute()
            .await
            .unwrap();

        assert_eq!(summary.version, "2.0.0");
        assert_eq!(summary.commit, "abc123");
        assert_eq!(summary.asset_name, "widget-2.0.0-x86_64-unknown-linux-gnu");
        assert_eq!(summary.toolchain, "fake");

        assert_eq!(vcs.tags().get("2.0.0").map(String::as_str), Some("abc123"));
        assert_eq!(vcs.pushes(), vec!["2.0.0"]);

        let release = host.release(summary.release_id).unwrap();
        assert!(!release.draft);
        assert_eq!(release.target_commitish.as_deref(), Some("abc123"));

        let uploads = host.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].release_id, summary.release_id);
        assert_eq!(uploads[0].name, "widget-2.0.0-x86_64-unknown-linux-gnu");
        assert_eq!(
            uploads[0].path,
            PathBuf::from("/work/widget/target/widget")
        );

        assert_eq!(toolchain.builds(), 2);
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_rerun_reuses_tag_and_draft() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();
        host.insert(ReleaseRecord {
            id: 5,
            tag_name: "2.0.0".to_string(),
            name: Some("2.0.0".to_string()),
            draft: true,
            target_commitish: Some("abc123".to_string()),
        });

        let summary = ReleaseWorkflow::new(&toolchain, &vcs, &host)
            .execute()
            .await
            .unwrap();

        assert_eq!(summary.release_id, 5);
        assert_eq!(host.creates(), 0);
        assert!(!host.release(5).unwrap().draft);
    }

    #[tokio::test]
    async fn test_version_failure_runs_cleanup_once() {
        let toolchain = FakeToolchain::new().failing_version();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Toolchain(ToolchainError::VersionExtraction { .. }))
        ));
        assert_eq!(toolchain.builds(), 0);
        assert!(vcs.tags().is_empty());
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_build_failure_runs_cleanup_once() {
        let toolchain = FakeToolchain::new().failing_build();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Toolchain(ToolchainError::BuildFailed { .. }))
        ));
        assert!(vcs.tags().is_empty());
        assert_eq!(host.creates(), 0);
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_tag_failure_runs_cleanup_once() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new().failing_tag();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Git(GitError::TagFailed { .. }))
        ));
        assert!(vcs.pushes().is_empty());
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_push_failure_runs_cleanup_once() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new().failing_push();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(result, Err(RelError::Git(GitError::PushFailed(_)))));
        assert_eq!(host.creates(), 0);
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_release_conflict_runs_cleanup_once() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();
        host.insert(ReleaseRecord {
            id: 9,
            tag_name: "2.0.0".to_string(),
            name: None,
            draft: false,
            target_commitish: None,
        });

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Host(HostError::ReleaseConflict { .. }))
        ));
        assert!(host.uploads().is_empty());
        assert_eq!(host.edits(), 0);
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_draft() {
        let toolchain = FakeToolchain::new();
        let vcs = FakeVcs::new();
        let host = FakeHost::new().failing_upload();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Host(HostError::Api { status: 500, .. }))
        ));
        assert_eq!(host.edits(), 0);
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_failure_does_not_mask_error() {
        let toolchain = FakeToolchain::new().failing_build().failing_cleanup();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::new(&toolchain, &vcs, &host).execute().await;

        assert!(matches!(
            result,
            Err(RelError::Toolchain(ToolchainError::BuildFailed { .. }))
        ));
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_failure_does_not_fail_success() {
        let toolchain = FakeToolchain::new().failing_cleanup();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let summary = ReleaseWorkflow::new(&toolchain, &vcs, &host)
            .execute()
            .await
            .unwrap();

        assert_eq!(summary.version, "2.0.0");
        assert_eq!(toolchain.cleanups(), 1);
    }

    #[test]
    fn test_select_without_match_has_no_side_effects() {
        let toolchains: Vec<Box<dyn Toolchain>> = Vec::new();
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let result = ReleaseWorkflow::select(&toolchains, &vcs, &host);

        assert!(matches!(
            result,
            Err(RelError::Toolchain(ToolchainError::NoSuitableToolchain { .. }))
        ));
        assert!(vcs.tags().is_empty());
        assert_eq!(host.creates(), 0);
    }

    #[test]
    fn test_select_binds_executable_to_repo_name() {
        let toolchains: Vec<Box<dyn Toolchain>> = vec![Box::new(FakeToolchain::new())];
        let vcs = FakeVcs::new();
        let host = FakeHost::new();

        let workflow = ReleaseWorkflow::select(&toolchains, &vcs, &host).unwrap();

        assert_eq!(workflow.toolchain_name(), "fake");
        assert_eq!(workflow.context().executable, "widget");
        assert_eq!(workflow.context().root, PathBuf::from("/work/widget"));
    }
}
