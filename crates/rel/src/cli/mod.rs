//! CLI definition and command handling

pub mod output;
mod release;

use std::path::PathBuf;

use clap::Parser;

use rel_core::config::DEFAULT_CONFIG_PATH;

/// rel - build, tag, push and publish a GitHub release
#[derive(Debug, Parser)]
#[command(name = "rel")]
#[command(author, version = concat!("v", env!("CARGO_PKG_VERSION")), about, long_about = None)]
pub struct Cli {
    /// Path inside the repository to release
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Configuration file
    #[arg(short, long, env = "REL_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for the release summary
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

impl Cli {
    /// Run the release on a single-threaded runtime
    pub fn execute(&self) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(release::run(self))
    }
}
