//! Test data factories for git-mature types

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use git_mature::types::{CommitInfo, PullRequest};

/// Fixed evaluation time so age-based tests are deterministic
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Commit id used for the `n`th commit of a history
pub fn commit_id(n: usize) -> String {
    format!("commit{n:02}0123456789abcdef")
}

/// Create a commit `days_old` days before [`now`]
pub fn make_commit(n: usize, message: &str, days_old: i64) -> CommitInfo {
    CommitInfo {
        id: commit_id(n),
        message: message.to_string(),
        committed_at: now() - Duration::days(days_old),
    }
}

/// Oldest-first history with one commit per message, one day apart, the
/// newest committed a day before [`now`]
pub fn make_history(messages: &[&str]) -> Vec<CommitInfo> {
    let total = messages.len();
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| make_commit(i, msg, (total - i) as i64))
        .collect()
}

/// History of `count` plain commits without issue trailers
pub fn plain_history(count: usize) -> Vec<CommitInfo> {
    let messages: Vec<String> = (0..count).map(|i| format!("Change {i}")).collect();
    let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
    make_history(&refs)
}

/// Create a pull request with default values
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: format!("PR for {head}"),
    }
}
