//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_API_URL, DEFAULT_REMOTE, DEFAULT_TIMEOUT_SECS, DEFAULT_TOOLCHAINS, DEFAULT_UPLOADS_URL,
};

/// Main configuration for rel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Obtain the token from `gh auth token`
    pub token_from_gh: bool,

    /// Shell command printing the token on stdout
    pub token_command: String,

    /// Literal token
    pub token: String,

    /// Remote name
    pub remote: String,

    /// Toolchain names in probing order
    pub toolchains: Vec<String>,

    /// REST API base URL
    pub api_url: String,

    /// Asset upload base URL
    pub uploads_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Configuration used when no config file exists
    pub fn missing_file() -> Self {
        Self {
            token_from_gh: true,
            ..Self::default()
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_from_gh: false,
            token_command: String::new(),
            token: String::new(),
            remote: DEFAULT_REMOTE.to_string(),
            toolchains: DEFAULT_TOOLCHAINS.iter().map(|t| t.to_string()).collect(),
            api_url: DEFAULT_API_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
