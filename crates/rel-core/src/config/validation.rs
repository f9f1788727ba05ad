//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::defaults::DEFAULT_TOOLCHAINS;
use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_toolchains(config)?;
    validate_host(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.remote.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_toolchains(config: &Config) -> Result<()> {
    if config.toolchains.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "toolchains".to_string(),
            message: "at least one toolchain is required".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for (i, name) in config.toolchains.iter().enumerate() {
        if !DEFAULT_TOOLCHAINS.contains(&name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("toolchains[{}]", i),
                message: format!(
                    "unknown toolchain '{}', expected one of: {}",
                    name,
                    DEFAULT_TOOLCHAINS.join(", ")
                ),
            }
            .into());
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("toolchains[{}]", i),
                message: format!("duplicate toolchain '{}'", name),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_host(config: &Config) -> Result<()> {
    for (field, url) in [
        ("api_url", &config.api_url),
        ("uploads_url", &config.uploads_url),
    ] {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("'{}' is not an http(s) URL", url),
            }
            .into());
        }
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "timeout_secs".to_string(),
            message: "timeout must be positive".to_string(),
        }
        .into());
    }

    Ok(())
}
