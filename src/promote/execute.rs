//! Run coordination
//!
//! Executes a promotion plan: cherry-pick standalone commits onto trunk,
//! publish issue branches, open PRs. Per-commit and per-issue failures are
//! recorded and the run moves on; only a dirty working tree or an
//! unreachable trunk aborts it.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::promote::plan::{analyze_promotion, PromotionConfig, PromotionPlan};
use crate::promote::progress::{Phase, ProgressCallback};
use crate::promote::publish::{
    issue_review_request, publish_issue_branch, PublishOutcome, ReviewOutcome,
};
use crate::promote::trunk::update_trunk;
use crate::repo::Workspace;
use crate::types::PullRequest;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Result of a promotion run
#[derive(Debug, Clone)]
pub struct PromotionResult {
    /// Whether every step succeeded
    pub success: bool,
    /// Standalone commits cherry-picked onto trunk
    pub applied_commits: Vec<String>,
    /// Whether trunk was pushed
    pub trunk_pushed: bool,
    /// Issue branches pushed in this run
    pub published_branches: Vec<String>,
    /// PRs that were created
    pub created_prs: Vec<PullRequest>,
    /// Open PRs found instead of creating duplicates
    pub existing_prs: Vec<PullRequest>,
    /// Issues held back because of unstable commits
    pub discarded_issues: Vec<u64>,
    /// Errors encountered (non-fatal)
    pub errors: Vec<String>,
}

impl Default for PromotionResult {
    fn default() -> Self {
        Self {
            success: true,
            applied_commits: Vec::new(),
            trunk_pushed: false,
            published_branches: Vec::new(),
            created_prs: Vec::new(),
            existing_prs: Vec::new(),
            discarded_issues: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl PromotionResult {
    /// Report a non-fatal error and mark the run as failed
    pub async fn record_error(&mut self, progress: &dyn ProgressCallback, err: Error) {
        progress.on_error(&err).await;
        self.record_failure(&err);
    }

    /// Mark the run as failed for an error the progress callback already saw
    pub fn record_failure(&mut self, err: &Error) {
        warn!(%err, "promotion step failed");
        self.errors.push(err.to_string());
        self.success = false;
    }
}

/// Read, plan and execute a promotion in one go
pub async fn run_promotion(
    config: &PromotionConfig,
    workspace: &mut dyn Workspace,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    now: DateTime<Utc>,
) -> Result<PromotionResult> {
    progress.on_phase(Phase::Classifying).await;
    let plan = analyze_promotion(workspace, config, now)?;
    execute_promotion(&plan, workspace, platform, progress).await
}

/// Execute a promotion plan
///
/// This performs the actual operations:
/// 1. Check the working tree is clean
/// 2. Cherry-pick standalone commits onto trunk and push it
/// 3. Publish each issue branch and open its PR
/// 4. Return to the branch that was checked out before
pub async fn execute_promotion(
    plan: &PromotionPlan,
    workspace: &mut dyn Workspace,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<PromotionResult> {
    let mut result = PromotionResult {
        discarded_issues: plan.discarded_issues.clone(),
        ..PromotionResult::default()
    };

    if !plan.has_stable_commits() {
        progress
            .on_message(&format!(
                "No stable commits among {} commits on {} (adjust --mature-count or --mature-age)",
                plan.total_commits, plan.source
            ))
            .await;
        progress.on_phase(Phase::Complete).await;
        return Ok(result);
    }

    if workspace.is_dirty()? {
        return Err(Error::DirtyWorkingTree);
    }

    let original_branch = workspace.current_branch()?;
    workspace.checkout(&plan.trunk)?;

    update_trunk(plan, workspace, progress, &mut result).await;

    for issue in &plan.discarded_issues {
        progress
            .on_message(&format!(
                "Issue {issue} still has unstable commits, not publishing it yet"
            ))
            .await;
    }

    if !plan.issues.is_empty() {
        progress.on_phase(Phase::PublishingIssues).await;
    }

    for group in &plan.issues {
        progress
            .on_message(&format!(
                "Issue {} ({} commit{}) is stable",
                group.issue,
                group.commits.len(),
                if group.commits.len() == 1 { "" } else { "s" }
            ))
            .await;

        match publish_issue_branch(group, plan, workspace, progress).await {
            Ok(PublishOutcome::Published) => {
                result.published_branches.push(group.branch.clone());
            }
            Ok(PublishOutcome::Updated { appended }) => {
                progress
                    .on_message(&format!(
                        "Appended {appended} commit{} to {}",
                        if appended == 1 { "" } else { "s" },
                        group.branch
                    ))
                    .await;
                result.published_branches.push(group.branch.clone());
            }
            Ok(PublishOutcome::AlreadyPublished) => {}
            Err(e) => {
                result.record_error(progress, e).await;
                continue;
            }
        }

        // Branch is pushed; failing to return to trunk must not block its PR
        if let Err(e) = workspace.checkout(&plan.trunk) {
            result.record_error(progress, e).await;
        }

        match issue_review_request(group, plan, platform, progress).await {
            Ok(ReviewOutcome::Created(pr)) => result.created_prs.push(pr),
            Ok(ReviewOutcome::Existing(pr)) => result.existing_prs.push(pr),
            Err(e) => result.record_error(progress, e).await,
        }
    }

    if let Some(branch) = original_branch.filter(|b| *b != plan.trunk)
        && let Err(e) = workspace.checkout(&branch)
    {
        result.record_error(progress, e).await;
    }

    info!(
        applied = result.applied_commits.len(),
        published = result.published_branches.len(),
        created_prs = result.created_prs.len(),
        errors = result.errors.len(),
        "promotion finished"
    );

    progress.on_phase(Phase::Complete).await;
    Ok(result)
}

/// Report what would be done without touching the repository or network
pub async fn report_dry_run(plan: &PromotionPlan, progress: &dyn ProgressCallback) {
    progress
        .on_message("Dry run - no changes will be made")
        .await;

    if !plan.has_stable_commits() {
        progress
            .on_message(&format!(
                "No stable commits among {} commits on {}",
                plan.total_commits, plan.source
            ))
            .await;
        return;
    }

    if !plan.standalone.is_empty() {
        progress
            .on_message(&format!("Would cherry-pick onto {}:", plan.trunk))
            .await;
        for commit in &plan.standalone {
            progress
                .on_message(&format!("  - {} {}", commit.short_id(), commit.subject()))
                .await;
        }
        progress
            .on_message(&format!("Would push {} to {}", plan.trunk, plan.remote))
            .await;
    }

    if !plan.issues.is_empty() {
        progress.on_message("Would publish issue branches:").await;
        for group in &plan.issues {
            progress
                .on_message(&format!(
                    "  - {} ({} commit{}) → PR \"{}\" against {}",
                    group.branch,
                    group.commits.len(),
                    if group.commits.len() == 1 { "" } else { "s" },
                    group.title,
                    plan.trunk
                ))
                .await;
        }
    }

    for issue in &plan.discarded_issues {
        progress
            .on_message(&format!("Issue {issue} held back: it still has unstable commits"))
            .await;
    }
}
