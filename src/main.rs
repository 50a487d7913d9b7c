//! git-mature - promote mature commits to trunk
//!
//! CLI binary that moves stable commits from a development branch onto trunk
//! and opens pull requests for stable issue groups.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[derive(Parser)]
#[command(name = "git-mature")]
#[command(about = "Promote mature commits from a development branch to trunk")]
#[command(version)]
struct Cli {
    /// Path to the git repository
    #[arg(default_value = ".")]
    path: PathBuf,

    /// GitHub token (defaults to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long)]
    token: Option<String>,

    /// Repository owner, instead of parsing it from the remote URL
    #[arg(long, alias = "repositoryOwner")]
    repository_owner: Option<String>,

    /// Repository name, instead of parsing it from the remote URL
    #[arg(long, alias = "repositoryName")]
    repository_name: Option<String>,

    /// Commits newer than the last N on the source branch are unstable [default: 20]
    #[arg(long, value_name = "N")]
    mature_count: Option<usize>,

    /// Commits younger than DAYS are unstable
    #[arg(long, value_name = "DAYS")]
    mature_age: Option<u32>,

    /// Branch receiving mature commits
    #[arg(long, default_value = "master")]
    trunk: String,

    /// Development branch to promote from
    #[arg(long, default_value = "dev")]
    source: String,

    /// Remote to push to
    #[arg(long, default_value = "origin")]
    remote: String,

    /// Show what would be done without making changes
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize tracing on stderr so stdout stays reserved for progress
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "git_mature=debug"
    } else {
        "git_mature=warn"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1 like every other fatal error; help and
            // version exit 0
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };
    init_tracing(cli.verbose);

    let options = cli::PromoteOptions {
        token: cli.token,
        repository_owner: cli.repository_owner,
        repository_name: cli.repository_name,
        mature_count: cli.mature_count,
        mature_age: cli.mature_age,
        trunk: cli.trunk,
        source: cli.source,
        remote: cli.remote,
        dry_run: cli.dry_run,
    };

    let success = cli::run_promote(&cli.path, &options).await?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
