//! rel core - release orchestration library
//!
//! Toolchain selection, the version-control and release-host seams, and the
//! release workflow that composes them. Concrete toolchains, git plumbing and
//! the GitHub client live in their own crates.

pub mod config;
pub mod error;
pub mod host;
pub mod probe;
pub mod toolchain;
pub mod types;
pub mod vcs;
pub mod workflow;

pub use config::Config;
pub use error::{
    ConfigError, CredentialError, GitError, HostError, RelError, Result, ToolchainError,
};
pub use host::ReleaseHost;
pub use toolchain::{select_toolchain, Toolchain};
pub use types::{
    AssetSpec, NewRelease, ProjectContext, ProjectIdentity, ReleaseRecord, ReleaseSummary,
};
pub use vcs::VersionControl;
pub use workflow::{CleanupGuard, ReleaseReconciler, ReleaseWorkflow};
