//! Issue branch publication and review requests
//!
//! An issue's commits form one logical change: either the whole group lands
//! on its branch and gets pushed, or nothing of it is published.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::promote::plan::{IssueBranch, PromotionPlan};
use crate::promote::progress::{ProgressCallback, PushStatus};
use crate::repo::Workspace;
use crate::types::{CommitInfo, PullRequest};
use tracing::{debug, warn};

/// How an issue branch ended up on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Branch created, populated and pushed in this run
    Published,
    /// Existing branch was missing commits; they were appended and pushed
    Updated {
        /// Number of commits appended
        appended: usize,
    },
    /// Existing branch already held every commit and was pushed again
    AlreadyPublished,
}

/// Outcome of the review request step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// A new PR was opened
    Created(PullRequest),
    /// An open PR for the branch already existed
    Existing(PullRequest),
}

/// Bring the issue branch up to date with the group and push it
///
/// A new branch is created from trunk. A branch left by an earlier run is
/// reused: commits it lacks are appended, and it is pushed again so the
/// remote always has the head the PR points at. Leaves the issue branch
/// checked out on success; the caller returns to trunk. On failure trunk is
/// checked out, and a branch created in this run is deleted so no partial
/// branch is left behind.
pub async fn publish_issue_branch(
    group: &IssueBranch,
    plan: &PromotionPlan,
    workspace: &mut dyn Workspace,
    progress: &dyn ProgressCallback,
) -> Result<PublishOutcome> {
    let created = if workspace.branch_exists(&group.branch)? {
        progress
            .on_message(&format!(
                "Branch {} already exists, checking it against the issue's commits",
                group.branch
            ))
            .await;
        false
    } else {
        workspace.create_branch(&group.branch, &plan.trunk)?;
        true
    };

    if let Err(e) = workspace.checkout(&group.branch) {
        leave_branch(workspace, plan, &group.branch, created);
        return Err(e);
    }

    let pending = if created {
        group.commit_ids()
    } else {
        match workspace.missing_commits(&group.branch, &group.commit_ids()) {
            Ok(missing) => missing,
            Err(e) => {
                leave_branch(workspace, plan, &group.branch, created);
                return Err(e);
            }
        }
    };

    if !pending.is_empty()
        && let Err(e) = workspace.cherry_pick(&pending)
    {
        leave_branch(workspace, plan, &group.branch, created);
        return Err(Error::Reapply {
            commits: group
                .commits
                .iter()
                .filter(|c| pending.contains(&c.id))
                .map(CommitInfo::short_id)
                .collect::<Vec<_>>()
                .join(" "),
            branch: group.branch.clone(),
            source: Box::new(e),
        });
    }

    progress
        .on_branch_push(&group.branch, PushStatus::Started)
        .await;

    if let Err(e) = workspace.push(&plan.remote, &group.branch) {
        leave_branch(workspace, plan, &group.branch, created);
        return Err(e);
    }

    progress
        .on_branch_push(&group.branch, PushStatus::Success)
        .await;

    Ok(match (created, pending.len()) {
        (true, _) => PublishOutcome::Published,
        (false, 0) => PublishOutcome::AlreadyPublished,
        (false, appended) => PublishOutcome::Updated { appended },
    })
}

/// Return to trunk after a failed publication, dropping a branch created
/// in this run
fn leave_branch(workspace: &mut dyn Workspace, plan: &PromotionPlan, branch: &str, created: bool) {
    if let Err(e) = workspace.checkout(&plan.trunk) {
        warn!(%e, "failed to return to {} after aborting {branch}", plan.trunk);
        return;
    }
    if !created {
        return;
    }
    match workspace.delete_branch(branch) {
        Ok(()) => debug!(branch, "deleted unpublished branch"),
        Err(e) => warn!(%e, branch, "failed to delete unpublished branch"),
    }
}

/// Open a PR for a published issue branch unless one is already open
pub async fn issue_review_request(
    group: &IssueBranch,
    plan: &PromotionPlan,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<ReviewOutcome> {
    if let Some(pr) = platform
        .find_existing_pr(&group.branch, &plan.trunk)
        .await?
    {
        progress.on_pr_exists(group.issue, &pr).await;
        return Ok(ReviewOutcome::Existing(pr));
    }

    progress
        .on_message(&format!(
            "Creating PR for {} (base: {})",
            group.branch, plan.trunk
        ))
        .await;

    let pr = platform
        .create_pr(&group.branch, &plan.trunk, &group.title, &group.body)
        .await?;
    progress.on_pr_created(group.issue, &pr).await;
    Ok(ReviewOutcome::Created(pr))
}
