//! Promotion engine
//!
//! Handles the workflow of promoting mature commits:
//! 1. Classification - split divergent commits into stable and unstable
//! 2. Grouping - route stable commits to trunk or to issue groups
//! 3. Execution - update trunk, publish issue branches, open PRs

mod classify;
mod execute;
mod group;
mod plan;
mod progress;
mod publish;
mod trunk;

pub use classify::{
    classify_commits, Classification, MaturityPolicy, DEFAULT_MATURE_AGE_DAYS,
    DEFAULT_MATURE_COUNT,
};
pub use execute::{execute_promotion, report_dry_run, run_promotion, PromotionResult};
pub use group::{group_commits, issue_branch_name, parse_issue_id, IssueGroups};
pub use plan::{
    analyze_promotion, create_promotion_plan, generate_pr_body, generate_pr_title, IssueBranch,
    PromotionConfig, PromotionPlan,
};
pub use progress::{NoopProgress, Phase, ProgressCallback, PushStatus};
pub use publish::{issue_review_request, publish_issue_branch, PublishOutcome, ReviewOutcome};
pub use trunk::update_trunk;
