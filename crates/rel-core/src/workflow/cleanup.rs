//! Scoped artifact cleanup

use tracing::{debug, warn};

use crate::toolchain::Toolchain;
use crate::types::ProjectContext;

/// Runs the toolchain cleanup exactly once when dropped
///
/// Failures are logged and swallowed so they never replace the run's result.
pub struct CleanupGuard<'a> {
    toolchain: &'a dyn Toolchain,
    ctx: &'a ProjectContext,
}

impl<'a> CleanupGuard<'a> {
    /// Register cleanup for `toolchain` in `ctx`
    pub fn new(toolchain: &'a dyn Toolchain, ctx: &'a ProjectContext) -> Self {
        debug!(toolchain = toolchain.name(), "registered artifact cleanup");
        Self { toolchain, ctx }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        match self.toolchain.cleanup(self.ctx) {
            Ok(()) => debug!(toolchain = self.toolchain.name(), "cleanup complete"),
            Err(e) => warn!(
                toolchain = self.toolchain.name(),
                error = %e,
                "error running cleanup"
            ),
        }
    }
}
