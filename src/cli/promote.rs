//! Promote command - move mature commits from the source branch to trunk

use crate::cli::progress::CliProgress;
use crate::cli::style::{arrow, cross, Stylize};
use anstream::{eprintln, println};
use chrono::Utc;
use git_mature::auth::get_github_auth;
use git_mature::error::Result;
use git_mature::platform::{create_platform_service, parse_repo_info};
use git_mature::promote::{
    analyze_promotion, report_dry_run, run_promotion, MaturityPolicy, PromotionConfig,
    PromotionResult,
};
use git_mature::repo::{remote_url, GitWorkspace, Workspace};
use git_mature::types::PlatformConfig;
use std::env;
use std::path::Path;
use tracing::debug;

/// Options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct PromoteOptions {
    pub token: Option<String>,
    pub repository_owner: Option<String>,
    pub repository_name: Option<String>,
    pub mature_count: Option<usize>,
    pub mature_age: Option<u32>,
    pub trunk: String,
    pub source: String,
    pub remote: String,
    pub dry_run: bool,
}

/// Run the promote command
///
/// Returns whether the run finished without recorded errors.
pub async fn run_promote(path: &Path, options: &PromoteOptions) -> Result<bool> {
    let mut workspace = GitWorkspace::open(path)?;
    debug!(root = %workspace.workspace_root().display(), "opened repository");

    let identity = resolve_identity(&workspace, options)?;

    let config = PromotionConfig {
        trunk: options.trunk.clone(),
        source: options.source.clone(),
        remote: options.remote.clone(),
        policy: MaturityPolicy::from_options(options.mature_count, options.mature_age),
    };

    println!(
        "Promoting {} {} {} in {}",
        config.source.accent(),
        arrow(),
        config.trunk.accent(),
        format!("{}/{}", identity.owner, identity.repo).emphasis()
    );

    if options.dry_run {
        let plan = analyze_promotion(&workspace, &config, Utc::now())?;
        report_dry_run(&plan, &CliProgress).await;
        return Ok(true);
    }

    let auth = get_github_auth(options.token.as_deref()).await?;
    debug!(source = ?auth.source, "resolved GitHub token");
    let platform = create_platform_service(&identity, &auth.token)?;

    let result = run_promotion(
        &config,
        &mut workspace,
        platform.as_ref(),
        &CliProgress,
        Utc::now(),
    )
    .await?;

    print_summary(&result);
    Ok(result.success)
}

/// Repository identity from the override flags, or from the remote URL
fn resolve_identity(workspace: &GitWorkspace, options: &PromoteOptions) -> Result<PlatformConfig> {
    if let (Some(owner), Some(repo)) = (&options.repository_owner, &options.repository_name) {
        return Ok(PlatformConfig {
            owner: owner.clone(),
            repo: repo.clone(),
            host: env::var("GH_HOST").ok().filter(|h| !h.is_empty()),
        });
    }

    let remotes = workspace.git_remotes()?;
    let url = remote_url(&remotes, &options.remote)?;
    parse_repo_info(&url)
}

fn print_summary(result: &PromotionResult) {
    println!();
    if !result.applied_commits.is_empty() {
        println!(
            "{} commit{} promoted to trunk{}",
            result.applied_commits.len().accent(),
            if result.applied_commits.len() == 1 { "" } else { "s" },
            if result.trunk_pushed { "" } else { " (not pushed)" }
        );
    }
    if !result.published_branches.is_empty() {
        println!(
            "Published {}",
            result.published_branches.join(", ").accent()
        );
    }
    if !result.discarded_issues.is_empty() {
        let issues = result
            .discarded_issues
            .iter()
            .map(|i| format!("#{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{} {}", "Held back:".warn(), issues);
    }

    if result.success {
        println!("{}", "Promotion complete".success());
    } else {
        eprintln!(
            "{} {} error{} during promotion:",
            cross(),
            result.errors.len(),
            if result.errors.len() == 1 { "" } else { "s" }
        );
        for err in &result.errors {
            eprintln!("  - {}", err.error());
        }
    }
}
