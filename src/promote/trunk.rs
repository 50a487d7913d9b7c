//! Trunk updater
//!
//! Standalone commits are independent of each other, so each one is applied
//! on its own and a failure only costs that commit.

use crate::error::Error;
use crate::promote::execute::PromotionResult;
use crate::promote::plan::PromotionPlan;
use crate::promote::progress::{Phase, ProgressCallback, PushStatus};
use crate::repo::Workspace;
use tracing::info;

/// Cherry-pick every standalone commit onto trunk, then push trunk once
///
/// Trunk must already be checked out.
pub async fn update_trunk(
    plan: &PromotionPlan,
    workspace: &mut dyn Workspace,
    progress: &dyn ProgressCallback,
    result: &mut PromotionResult,
) {
    if plan.standalone.is_empty() {
        return;
    }

    progress.on_phase(Phase::UpdatingTrunk).await;

    for commit in &plan.standalone {
        match workspace.cherry_pick(std::slice::from_ref(&commit.id)) {
            Ok(()) => {
                progress.on_commit_applied(commit, &plan.trunk).await;
                result.applied_commits.push(commit.id.clone());
            }
            Err(e) => {
                let err = Error::Reapply {
                    commits: commit.short_id().to_string(),
                    branch: plan.trunk.clone(),
                    source: Box::new(e),
                };
                result.record_error(progress, err).await;
            }
        }
    }

    info!(
        applied = result.applied_commits.len(),
        total = plan.standalone.len(),
        "cherry-picked standalone commits onto {}",
        plan.trunk
    );

    if result.applied_commits.is_empty() {
        return;
    }

    progress.on_phase(Phase::PushingTrunk).await;
    progress
        .on_branch_push(&plan.trunk, PushStatus::Started)
        .await;

    match workspace.push(&plan.remote, &plan.trunk) {
        Ok(()) => {
            progress
                .on_branch_push(&plan.trunk, PushStatus::Success)
                .await;
            result.trunk_pushed = true;
        }
        Err(e) => {
            progress
                .on_branch_push(&plan.trunk, PushStatus::Failed(e.to_string()))
                .await;
            result.record_failure(&e);
        }
    }
}
