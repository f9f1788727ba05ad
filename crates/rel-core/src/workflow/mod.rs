//! Release workflow

mod cleanup;
mod reconcile;
mod release;

#[cfg(test)]
pub(crate) mod fakes;

pub use cleanup::CleanupGuard;
pub use reconcile::ReleaseReconciler;
pub use release::ReleaseWorkflow;
