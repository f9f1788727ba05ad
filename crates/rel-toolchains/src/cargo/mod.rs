//! Cargo toolchain

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use rel_core::error::{Result, ToolchainError};
use rel_core::toolchain::Toolchain;
use rel_core::types::ProjectContext;
use tracing::{info, instrument};

use crate::command::ToolCommand;

const MANIFEST: &str = "Cargo.toml";
const TARGET: &str = "x86_64-unknown-linux-gnu";
const RUSTFLAGS: &str = "-C target-feature=+crt-static";

fn version_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"version = "(\d+\.\d+\.\d+)""#).expect("valid pattern"))
}

/// Version from the first `version = "X.Y.Z"` line of a manifest
pub fn parse_manifest_version(manifest: &str) -> Option<String> {
    manifest
        .lines()
        .find_map(|line| version_line().captures(line))
        .map(|caps| caps[1].to_string())
}

/// Statically linked Linux release builds with cargo
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoToolchain;

impl CargoToolchain {
    /// Create a new cargo toolchain
    pub fn new() -> Self {
        Self
    }

    fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(MANIFEST)
    }

    /// `cargo build` producing a statically linked binary for the target triple
    pub fn build_command<'a>(&self, ctx: &'a ProjectContext) -> ToolCommand<'a> {
        ToolCommand::new("cargo", ctx.root())
            .args(&["build", "--release", "--target", TARGET])
            .env("RUSTFLAGS", RUSTFLAGS)
    }
}

impl Toolchain for CargoToolchain {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn manifest_name(&self) -> &'static str {
        MANIFEST
    }

    fn platform(&self) -> &'static str {
        TARGET
    }

    fn artifact_dir(&self, ctx: &ProjectContext) -> Result<PathBuf> {
        Ok(ctx.root().join("target").join(TARGET).join("release"))
    }

    #[instrument(skip_all, fields(root = %ctx.root().display()))]
    fn build(&self, ctx: &ProjectContext) -> Result<()> {
        info!(target = TARGET, "building release binary");
        self.build_command(ctx).run()
    }

    fn current_version(&self, ctx: &ProjectContext) -> Result<String> {
        let path = self.manifest_path(ctx.root());
        let manifest =
            std::fs::read_to_string(&path).map_err(|e| ToolchainError::VersionExtraction {
                source_name: path.display().to_string(),
                reason: e.to_string(),
            })?;

        parse_manifest_version(&manifest).ok_or_else(|| {
            ToolchainError::VersionExtraction {
                source_name: path.display().to_string(),
                reason: "no version line found".to_string(),
            }
            .into()
        })
    }
}
