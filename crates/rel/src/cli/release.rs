//! The release run

use anyhow::Context;
use tracing::{debug, info};

use rel_core::config::{expand_path, load_config_or_default};
use rel_core::toolchain::select_toolchain;
use rel_core::types::{ProjectContext, ReleaseSummary};
use rel_core::workflow::ReleaseWorkflow;
use rel_git::GitRepo;
use rel_github::{resolve_token, GitHubClient};
use rel_toolchains::ToolchainRegistry;

use super::{output, Cli, OutputFormat};

/// Resolve collaborators from configuration and run one release
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = expand_path(&cli.file);
    let (config, found) = load_config_or_default(&config_path)?;
    if !found {
        debug!(path = %config_path.display(), "config file not found");
        if cli.format == OutputFormat::Text {
            output::notice(&format!(
                "no configuration at {}, taking the token from gh",
                output::path(&config_path)
            ));
        }
    }

    let repo = GitRepo::discover(&cli.path, &config.remote)?;
    info!(
        project = %repo.identity(),
        root = %repo.root().display(),
        "resolved repository"
    );

    let registry = ToolchainRegistry::from_names(&config.toolchains)?;
    let ctx = ProjectContext::new(repo.root(), repo.identity().repo.clone());
    let toolchain = select_toolchain(registry.all(), &ctx)?;

    let token = resolve_token(&config)?;
    let host = GitHubClient::new(&config, repo.identity().clone(), token)?;

    if cli.format == OutputFormat::Text {
        output::step(&format!(
            "releasing {} from {} with {}",
            repo.identity(),
            output::path(repo.root()),
            toolchain.name()
        ));
    }

    let summary = ReleaseWorkflow::new(toolchain, &repo, &host)
        .execute()
        .await
        .with_context(|| format!("releasing {}", repo.identity()))?;

    print_summary(cli.format, &summary)?;
    Ok(())
}

fn print_summary(format: OutputFormat, summary: &ReleaseSummary) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            println!("{}", output::released(&summary.version));
            println!("{}", output::field("toolchain", &summary.toolchain));
            println!("{}", output::field("commit", &summary.commit));
            println!("{}", output::field("release", &summary.release_id.to_string()));
            println!("{}", output::field("asset", &summary.asset_name));
        }
    }
    Ok(())
}
