//! Error types for rel

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelError
pub type Result<T> = std::result::Result<T, RelError>;

/// Main error type for rel operations
#[derive(Debug, Error)]
pub enum RelError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Toolchain-related errors
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// Release host errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// Credential errors
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to deserialize the configuration file
    #[error("Failed to deserialize config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Bare repositories have no work tree to build from
    #[error("Repository at {0} has no working directory")]
    BareRepository(PathBuf),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Remote URL does not identify an owner/repo pair
    #[error("Unable to determine repository owner and name from remote URL '{url}'")]
    IdentityResolution { url: String },

    /// Failed to create or resolve a tag
    #[error("Failed to tag {name}: {reason}")]
    TagFailed { name: String, reason: String },

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Toolchain-related errors
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// Stat of a toolchain manifest failed for a reason other than absence
    #[error("Failed to probe {path}: {source}")]
    CapabilityProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No registered toolchain can build the project
    #[error("No suitable toolchain found at {path}. Supported toolchains: {supported}")]
    NoSuitableToolchain { path: PathBuf, supported: String },

    /// Toolchain name in configuration is not registered
    #[error("Unknown toolchain: {0}")]
    UnknownToolchain(String),

    /// Version could not be determined
    #[error("Unable to determine version from {source_name}: {reason}")]
    VersionExtraction { source_name: String, reason: String },

    /// Required executable is not on PATH
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    /// External command could not be spawned
    #[error("Failed to run {command}: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Build invocation failed
    #[error("Build failed: {command}\n{output}")]
    BuildFailed { command: String, output: String },

    /// Artifact removal failed
    #[error("Failed to clean up {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Release host errors
#[derive(Debug, Error)]
pub enum HostError {
    /// A release exists for the tag but has already been published
    #[error("Release {tag} exists but is not a draft release")]
    ReleaseConflict { tag: String },

    /// Release disappeared between creation and finalization
    #[error("Release {0} not found")]
    ReleaseNotFound(u64),

    /// Non-success response from the host
    #[error("Error {action}: status {status}, body: {body}")]
    Api {
        action: String,
        status: u16,
        body: String,
    },

    /// Request could not be sent or its response decoded
    #[error("Error {action}: {reason}")]
    Transport { action: String, reason: String },
}

/// Credential errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Nothing in the configuration produces a token
    #[error("Unable to determine token: set token_from_gh, token_command or token")]
    NoSource,

    /// Token command could not be run or exited unsuccessfully
    #[error("Token command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Token source produced an empty token
    #[error("Token from {0} is empty")]
    Empty(String),
}
