//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, tests, etc.) to receive
//! progress updates during a promotion run.

use crate::error::Error;
use crate::types::{CommitInfo, PullRequest};
use async_trait::async_trait;
use std::fmt;

/// Promotion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading and classifying the divergent commits
    Classifying,
    /// Cherry-picking standalone commits onto trunk
    UpdatingTrunk,
    /// Pushing trunk to the remote
    PushingTrunk,
    /// Publishing issue branches and opening PRs
    PublishingIssues,
    /// Run complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Classifying => "Classifying commits",
            Self::UpdatingTrunk => "Updating trunk",
            Self::PushingTrunk => "Pushing trunk",
            Self::PublishingIssues => "Publishing issues",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// Push operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// Push started
    Started,
    /// Push succeeded
    Success,
    /// Push failed with error message
    Failed(String),
}

impl fmt::Display for PushStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => f.write_str("pushing"),
            Self::Success => f.write_str("pushed"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called after a standalone commit was cherry-picked onto trunk
    async fn on_commit_applied(&self, commit: &CommitInfo, branch: &str);

    /// Called when a branch is being pushed
    async fn on_branch_push(&self, branch: &str, status: PushStatus);

    /// Called when a PR is created for an issue
    async fn on_pr_created(&self, issue: u64, pr: &PullRequest);

    /// Called when an open PR for an issue already exists
    async fn on_pr_exists(&self, issue: u64, pr: &PullRequest);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_commit_applied(&self, _commit: &CommitInfo, _branch: &str) {}
    async fn on_branch_push(&self, _branch: &str, _status: PushStatus) {}
    async fn on_pr_created(&self, _issue: u64, _pr: &PullRequest) {}
    async fn on_pr_exists(&self, _issue: u64, _pr: &PullRequest) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
