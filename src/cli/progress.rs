//! CLI progress callback with styled output

use crate::cli::style::{check, cross, hyperlink_url, Stream, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use git_mature::error::Error;
use git_mature::promote::{Phase, ProgressCallback, PushStatus};
use git_mature::types::{CommitInfo, PullRequest};

/// CLI progress callback that prints to stdout, errors to stderr
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => println!("{}", phase.to_string().emphasis()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_commit_applied(&self, commit: &CommitInfo, branch: &str) {
        println!(
            "  {} {} {} {}",
            check(),
            commit.short_id().accent(),
            commit.subject(),
            format!("→ {branch}").muted()
        );
    }

    async fn on_branch_push(&self, branch: &str, status: PushStatus) {
        match &status {
            PushStatus::Started => println!("  Pushing {}...", branch.accent()),
            PushStatus::Success => println!("  {} Pushed {}", check(), branch.emphasis()),
            PushStatus::Failed(_) => eprintln!(
                "  {} Failed to push {}: {}",
                cross(),
                branch.accent().for_stderr(),
                status.to_string().error()
            ),
        }
    }

    async fn on_pr_created(&self, issue: u64, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Created PR {} for issue {}",
            check(),
            pr_num.accent(),
            issue.emphasis()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_exists(&self, issue: u64, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} PR {} for issue {} is already open",
            "-".muted(),
            pr_num.accent(),
            issue
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "error".error(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
