//! Toolchain adapter trait and selection

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::error::{Result, ToolchainError};
use crate::probe::manifest_present;
use crate::types::ProjectContext;

/// A build ecosystem that can produce the release artifact
///
/// New ecosystems implement this trait and register in the toolchain list;
/// the release workflow never names a concrete toolchain.
pub trait Toolchain: Send + Sync {
    /// Short identifier used in configuration (e.g., "cargo", "go")
    fn name(&self) -> &'static str;

    /// Marker file whose presence in the project root selects this toolchain
    fn manifest_name(&self) -> &'static str;

    /// Platform string embedded in artifact names
    fn platform(&self) -> &'static str;

    /// Whether this toolchain applies to the project
    fn can_build(&self, ctx: &ProjectContext) -> Result<bool> {
        manifest_present(ctx.root(), self.manifest_name())
    }

    /// Directory holding the built executable after a successful build
    fn artifact_dir(&self, ctx: &ProjectContext) -> Result<PathBuf>;

    /// Display name of the uploaded asset
    fn artifact_name(&self, executable: &str, version: &str) -> String {
        format!("{}-{}-{}", executable, version, self.platform())
    }

    /// Local path of the built executable
    fn artifact_path(&self, ctx: &ProjectContext) -> Result<PathBuf> {
        Ok(self.artifact_dir(ctx)?.join(&ctx.executable))
    }

    /// Run the release build
    fn build(&self, ctx: &ProjectContext) -> Result<()>;

    /// Version about to be released
    fn current_version(&self, ctx: &ProjectContext) -> Result<String>;

    /// Remove the built executable, if present
    fn cleanup(&self, ctx: &ProjectContext) -> Result<()> {
        let path = self.artifact_path(ctx)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed artifact");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ToolchainError::Cleanup { path, source }.into()),
        }
    }
}

/// Pick the first toolchain, in order, that can build the project
///
/// Toolchains after the first match are never probed. A probe error aborts
/// selection.
#[instrument(skip_all, fields(root = %ctx.root().display()))]
pub fn select_toolchain<'a>(
    toolchains: &'a [Box<dyn Toolchain>],
    ctx: &ProjectContext,
) -> Result<&'a dyn Toolchain> {
    for toolchain in toolchains {
        if toolchain.can_build(ctx)? {
            info!(toolchain = toolchain.name(), "selected toolchain");
            return Ok(toolchain.as_ref());
        }
        debug!(toolchain = toolchain.name(), "toolchain does not apply");
    }

    let supported = toolchains
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ToolchainError::NoSuitableToolchain {
        path: ctx.root.clone(),
        supported,
    }
    .into())
}
