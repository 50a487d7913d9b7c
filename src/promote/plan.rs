//! Promotion planning
//!
//! Turns the divergent commit history into the list of operations a run
//! performs. Everything here is pure apart from reading the commit list.

use crate::error::Result;
use crate::promote::classify::{classify_commits, MaturityPolicy};
use crate::promote::group::{group_commits, issue_branch_name};
use crate::repo::Workspace;
use crate::types::CommitInfo;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use tracing::debug;

/// What to promote, from where, to where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionConfig {
    /// Stable branch receiving commits
    pub trunk: String,
    /// Development branch mined for mature commits
    pub source: String,
    /// Remote that trunk and issue branches are pushed to
    pub remote: String,
    /// Maturity rule
    pub policy: MaturityPolicy,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            trunk: "master".to_string(),
            source: "dev".to_string(),
            remote: "origin".to_string(),
            policy: MaturityPolicy::default(),
        }
    }
}

/// An issue group that will become a branch and a PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueBranch {
    /// Issue number
    pub issue: u64,
    /// Branch name (`Issue<n>`)
    pub branch: String,
    /// Commits to reapply, in order
    pub commits: Vec<CommitInfo>,
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
}

impl IssueBranch {
    /// Build the branch and PR text for an issue group
    pub fn new(issue: u64, commits: Vec<CommitInfo>) -> Self {
        Self {
            issue,
            branch: issue_branch_name(issue),
            title: generate_pr_title(issue),
            body: generate_pr_body(issue, &commits),
            commits,
        }
    }

    /// Commit ids in reapply order
    pub fn commit_ids(&self) -> Vec<String> {
        self.commits.iter().map(|c| c.id.clone()).collect()
    }
}

/// Promotion plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPlan {
    /// Trunk branch name
    pub trunk: String,
    /// Divergent branch name
    pub source: String,
    /// Remote name to push to
    pub remote: String,
    /// Number of commits on source but not on trunk
    pub total_commits: usize,
    /// Number of stable commits
    pub stable_count: usize,
    /// Stable commits without issue, to cherry-pick onto trunk
    pub standalone: Vec<CommitInfo>,
    /// Complete issue groups, ascending by issue number
    pub issues: Vec<IssueBranch>,
    /// Issues held back because they still have unstable commits
    pub discarded_issues: Vec<u64>,
}

impl PromotionPlan {
    /// Whether any commit is mature enough to promote
    pub const fn has_stable_commits(&self) -> bool {
        self.stable_count > 0
    }
}

/// Title of the PR opened for an issue
pub fn generate_pr_title(issue: u64) -> String {
    format!("Implement issue {issue}")
}

/// Body of the PR opened for an issue
pub fn generate_pr_body(issue: u64, commits: &[CommitInfo]) -> String {
    let mut body = format!("Issue #{issue}");
    if !commits.is_empty() {
        body.push_str("\n\nPromoted commits:");
        for commit in commits {
            let _ = write!(body, "\n- {} {}", commit.short_id(), commit.subject());
        }
    }
    body
}

/// Create a promotion plan from the commits `source` holds over `trunk`
///
/// `commits` must be oldest first.
pub fn create_promotion_plan(
    commits: Vec<CommitInfo>,
    config: &PromotionConfig,
    now: DateTime<Utc>,
) -> PromotionPlan {
    let total_commits = commits.len();
    let classification = classify_commits(commits, config.policy, now);
    let groups = group_commits(&classification);

    debug!(
        total_commits,
        stable = classification.stable.len(),
        standalone = groups.standalone.len(),
        issues = groups.issues.len(),
        discarded = groups.discarded.len(),
        "classified commits"
    );

    PromotionPlan {
        trunk: config.trunk.clone(),
        source: config.source.clone(),
        remote: config.remote.clone(),
        total_commits,
        stable_count: classification.stable.len(),
        standalone: groups.standalone,
        issues: groups
            .issues
            .into_iter()
            .map(|(issue, commits)| IssueBranch::new(issue, commits))
            .collect(),
        discarded_issues: groups.discarded,
    }
}

/// Read the divergent commits from the workspace and plan the run
pub fn analyze_promotion(
    workspace: &dyn Workspace,
    config: &PromotionConfig,
    now: DateTime<Utc>,
) -> Result<PromotionPlan> {
    let commits = workspace.commits_between(&config.trunk, &config.source)?;
    Ok(create_promotion_plan(commits, config, now))
}
