//! Exit codes for the CLI

use rel_core::error::{RelError, ToolchainError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version could not be determined
pub const VERSION_ERROR: i32 = 4;

/// Toolchain selection or build error
pub const BUILD_ERROR: i32 = 5;

/// Release host error
pub const HOST_ERROR: i32 = 6;

/// Token could not be resolved
pub const CREDENTIAL_ERROR: i32 = 7;

/// Exit code for the first rel error in the chain
pub fn for_error(err: &anyhow::Error) -> i32 {
    let Some(rel) = err.chain().find_map(|e| e.downcast_ref::<RelError>()) else {
        return ERROR;
    };

    match rel {
        RelError::Config(_) => CONFIG_ERROR,
        RelError::Git(_) => GIT_ERROR,
        RelError::Toolchain(ToolchainError::VersionExtraction { .. }) => VERSION_ERROR,
        RelError::Toolchain(_) => BUILD_ERROR,
        RelError::Host(_) => HOST_ERROR,
        RelError::Credential(_) => CREDENTIAL_ERROR,
        RelError::Io(_) => ERROR,
    }
}
