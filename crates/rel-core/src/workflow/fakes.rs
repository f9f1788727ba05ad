//! In-memory collaborators for workflow tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{GitError, HostError, Result, ToolchainError};
use crate::host::ReleaseHost;
use crate::toolchain::Toolchain;
use crate::types::{AssetSpec, NewRelease, ProjectContext, ProjectIdentity, ReleaseRecord};
use crate::vcs::VersionControl;

#[derive(Default)]
pub struct FakeToolchain {
    fail_version: bool,
    fail_build: bool,
    fail_cleanup: bool,
    builds: AtomicUsize,
    cleanups: AtomicUsize,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_version(mut self) -> Self {
        self.fail_version = true;
        self
    }

    pub fn failing_build(mut self) -> Self {
        self.fail_build = true;
        self
    }

    pub fn failing_cleanup(mut self) -> Self {
        self.fail_cleanup = true;
        self
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

impl Toolchain for FakeToolchain {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn manifest_name(&self) -> &'static str {
        "Fakefile"
    }

    fn platform(&self) -> &'static str {
        "x86_64-unknown-linux-gnu"
    }

    fn can_build(&self, _ctx: &ProjectContext) -> Result<bool> {
        Ok(true)
    }

    fn artifact_dir(&self, ctx: &ProjectContext) -> Result<PathBuf> {
        Ok(ctx.root.join("target"))
    }

    fn build(&self, _ctx: &ProjectContext) -> Result<()> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.fail_build {
            return Err(ToolchainError::BuildFailed {
                command: "fake build".to_string(),
                output: "error: boom".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn current_version(&self, _ctx: &ProjectContext) -> Result<String> {
        if self.fail_version {
            return Err(ToolchainError::VersionExtraction {
                source_name: "Fakefile".to_string(),
                reason: "no version".to_string(),
            }
            .into());
        }
        Ok("2.0.0".to_string())
    }

    fn cleanup(&self, ctx: &ProjectContext) -> Result<()> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        if self.fail_cleanup {
            return Err(ToolchainError::Cleanup {
                path: ctx.root.join("target"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }
            .into());
        }
        Ok(())
    }
}

pub struct FakeVcs {
    identity: ProjectIdentity,
    root: PathBuf,
    head: String,
    fail_tag: bool,
    fail_push: bool,
    tags: Mutex<HashMap<String, String>>,
    pushes: Mutex<Vec<String>>,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self {
            identity: ProjectIdentity::new("acme", "widget"),
            root: PathBuf::from("/work/widget"),
            head: "abc123".to_string(),
            fail_tag: false,
            fail_push: false,
            tags: Mutex::new(HashMap::new()),
            pushes: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_tag(mut self) -> Self {
        self.fail_tag = true;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn tags(&self) -> HashMap<String, String> {
        self.tags.lock().unwrap().clone()
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

impl VersionControl for FakeVcs {
    fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn tag(&self, version: &str) -> Result<String> {
        if self.fail_tag {
            return Err(GitError::TagFailed {
                name: version.to_string(),
                reason: "locked".to_string(),
            }
            .into());
        }
        let mut tags = self.tags.lock().unwrap();
        Ok(tags
            .entry(version.to_string())
            .or_insert_with(|| self.head.clone())
            .clone())
    }

    fn push(&self, tag: &str) -> Result<()> {
        if self.fail_push {
            return Err(GitError::PushFailed("rejected".to_string()).into());
        }
        self.pushes.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHost {
    fail_upload: bool,
    next_id: AtomicU64,
    releases: Mutex<Vec<ReleaseRecord>>,
    uploads: Mutex<Vec<AssetSpec>>,
    creates: AtomicUsize,
    edits: AtomicUsize,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn insert(&self, release: ReleaseRecord) {
        self.releases.lock().unwrap().push(release);
    }

    pub fn release(&self, id: u64) -> Option<ReleaseRecord> {
        self.releases
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn uploads(&self) -> Vec<AssetSpec> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn edits(&self) -> usize {
        self.edits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseHost for FakeHost {
    fn name(&self) -> &str {
        "fake"
    }

    async fn release_by_tag(&self, tag: &str) -> Result<Option<ReleaseRecord>> {
        Ok(self
            .releases
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.tag_name == tag)
            .cloned())
    }

    async fn release_by_id(&self, id: u64) -> Result<Option<ReleaseRecord>> {
        Ok(self.release(id))
    }

    async fn create_release(&self, release: &NewRelease) -> Result<ReleaseRecord> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let record = ReleaseRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            tag_name: release.tag_name.clone(),
            name: Some(release.name.clone()),
            draft: release.draft,
            target_commitish: Some(release.target_commitish.clone()),
        };
        self.insert(record.clone());
        Ok(record)
    }

    async fn upload_asset(&self, asset: &AssetSpec) -> Result<()> {
        if self.fail_upload {
            return Err(HostError::Api {
                action: "uploading asset".to_string(),
                status: 500,
                body: "server error".to_string(),
            }
            .into());
        }
        self.uploads.lock().unwrap().push(asset.clone());
        Ok(())
    }

    async fn edit_release(&self, release: &ReleaseRecord) -> Result<ReleaseRecord> {
        self.edits.fetch_add(1, Ordering::SeqCst);
        let mut releases = self.releases.lock().unwrap();
        let stored = releases
            .iter_mut()
            .find(|r| r.id == release.id)
            .ok_or(HostError::ReleaseNotFound(release.id))?;
        *stored = release.clone();
        Ok(stored.clone())
    }
}
