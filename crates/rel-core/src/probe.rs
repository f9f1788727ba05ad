//! Toolchain capability probing

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ToolchainError};

/// Check whether `manifest` exists in the project root
///
/// Absence is a negative answer, not an error. Any other stat failure
/// (permissions, I/O) is reported as a probe error.
pub fn manifest_present(root: &Path, manifest: &str) -> Result<bool> {
    let path = root.join(manifest);
    match std::fs::metadata(&path) {
        Ok(_) => {
            debug!(path = %path.display(), "found toolchain manifest");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ToolchainError::CapabilityProbe { path, source }.into()),
    }
}
