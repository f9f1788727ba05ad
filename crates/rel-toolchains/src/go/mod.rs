//! Go toolchain

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use rel_core::error::{RelError, Result, ToolchainError};
use rel_core::toolchain::Toolchain;
use rel_core::types::ProjectContext;
use tracing::{info, instrument};

use crate::command::ToolCommand;

const MANIFEST: &str = "go.mod";
const PLATFORM: &str = "linux-x86_64";
const VERSION_COMMAND: &str = "go run main.go --version";

fn version_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v?\d+\.\d+\.\d+$").expect("valid pattern"))
}

/// Version from the last whitespace-separated token of `--version` output
///
/// `"widget version v1.4.0\n"` yields `"v1.4.0"`.
pub fn parse_version_output(output: &str) -> Result<String> {
    let token = output.split_whitespace().last().unwrap_or_default();

    if version_token().is_match(token) {
        Ok(token.to_string())
    } else {
        Err(ToolchainError::VersionExtraction {
            source_name: VERSION_COMMAND.to_string(),
            reason: format!("version '{}' does not match expected format", token),
        }
        .into())
    }
}

/// Static Linux builds with the go tool
#[derive(Debug, Clone, Copy, Default)]
pub struct GoToolchain;

impl GoToolchain {
    /// Create a new go toolchain
    pub fn new() -> Self {
        Self
    }

    /// `go build` for linux/amd64 with cgo disabled
    pub fn build_command<'a>(&self, ctx: &'a ProjectContext) -> ToolCommand<'a> {
        ToolCommand::new("go", ctx.root())
            .args(&["build", "-o", ctx.executable.as_str()])
            .env("CGO_ENABLED", "0")
            .env("GOOS", "linux")
            .env("GOARCH", "amd64")
    }
}

impl Toolchain for GoToolchain {
    fn name(&self) -> &'static str {
        "go"
    }

    fn manifest_name(&self) -> &'static str {
        MANIFEST
    }

    fn platform(&self) -> &'static str {
        PLATFORM
    }

    fn artifact_dir(&self, ctx: &ProjectContext) -> Result<PathBuf> {
        Ok(ctx.root().to_path_buf())
    }

    #[instrument(skip_all, fields(root = %ctx.root().display()))]
    fn build(&self, ctx: &ProjectContext) -> Result<()> {
        info!(executable = %ctx.executable, "building release binary");
        self.build_command(ctx).run()
    }

    fn current_version(&self, ctx: &ProjectContext) -> Result<String> {
        let output = ToolCommand::new("go", ctx.root())
            .args(&["run", "main.go", "--version"])
            .stdout()
            .map_err(|e| match e {
                RelError::Toolchain(ToolchainError::BuildFailed { output, .. }) => {
                    ToolchainError::VersionExtraction {
                        source_name: VERSION_COMMAND.to_string(),
                        reason: output,
                    }
                    .into()
                }
                other => other,
            })?;

        parse_version_output(&output)
    }
}
