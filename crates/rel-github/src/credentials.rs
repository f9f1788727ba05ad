//! API token resolution

use std::process::Command;

use tracing::{debug, instrument};

use rel_core::config::Config;
use rel_core::error::{CredentialError, Result};

const GH_COMMAND: &str = "gh auth token";

/// Where the API token comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Output of `gh auth token`
    GitHubCli,
    /// Output of a shell command
    Command(String),
    /// Token stored in the configuration file
    Literal(String),
}

impl TokenSource {
    /// First configured source, in order: gh CLI, token command, literal token
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.token_from_gh {
            Ok(Self::GitHubCli)
        } else if !config.token_command.trim().is_empty() {
            Ok(Self::Command(config.token_command.clone()))
        } else if !config.token.is_empty() {
            Ok(Self::Literal(config.token.clone()))
        } else {
            Err(CredentialError::NoSource.into())
        }
    }

    fn describe(&self) -> &str {
        match self {
            Self::GitHubCli => GH_COMMAND,
            Self::Command(command) => command,
            Self::Literal(_) => "token",
        }
    }

    /// Produce the token, trimmed of surrounding whitespace
    #[instrument(skip(self), fields(source = self.describe()))]
    pub fn resolve(&self) -> Result<String> {
        let token = match self {
            Self::GitHubCli => {
                which::which("gh").map_err(|_| CredentialError::CommandFailed {
                    command: GH_COMMAND.to_string(),
                    reason: "gh not found on PATH".to_string(),
                })?;
                run_shell(GH_COMMAND)?
            }
            Self::Command(command) => run_shell(command)?,
            Self::Literal(token) => token.trim().to_string(),
        };

        if token.is_empty() {
            return Err(CredentialError::Empty(self.describe().to_string()).into());
        }

        debug!("resolved API token");
        Ok(token)
    }
}

fn run_shell(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| CredentialError::CommandFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(CredentialError::CommandFailed {
            command: command.to_string(),
            reason: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Resolve the API token from configuration
pub fn resolve_token(config: &Config) -> Result<String> {
    TokenSource::from_config(config)?.resolve()
}
