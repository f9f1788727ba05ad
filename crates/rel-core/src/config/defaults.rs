//! Default configuration values

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/rel/rel.yml";

/// Remote the project identity is read from and pushes go to
pub const DEFAULT_REMOTE: &str = "origin";

/// GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub asset upload base URL
pub const DEFAULT_UPLOADS_URL: &str = "https://uploads.github.com";

/// Per-request timeout for release host calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Toolchain probing order, first match wins
pub const DEFAULT_TOOLCHAINS: &[&str] = &["cargo", "go"];

