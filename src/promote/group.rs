//! Issue grouping of classified commits

use crate::promote::classify::Classification;
use crate::types::CommitInfo;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ISSUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Issue: #(\d+)").expect("hardcoded issue pattern is valid"));

/// Extract the issue number a commit message refers to
///
/// Only the first `Issue: #<digits>` occurrence counts. Zero and values that
/// overflow are treated as no reference.
pub fn parse_issue_id(message: &str) -> Option<u64> {
    ISSUE_PATTERN
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .filter(|id| *id > 0)
}

/// Name of the branch published for an issue
pub fn issue_branch_name(issue: u64) -> String {
    format!("Issue{issue}")
}

/// Stable commits split into standalone commits and complete issue groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueGroups {
    /// Stable commits without an issue reference, in order
    pub standalone: Vec<CommitInfo>,
    /// Issue number to its stable commits, in order
    pub issues: BTreeMap<u64, Vec<CommitInfo>>,
    /// Issues dropped because some of their commits are still unstable
    pub discarded: Vec<u64>,
}

/// Group stable commits by issue and evict issues with unstable commits
pub fn group_commits(classification: &Classification) -> IssueGroups {
    let mut groups = IssueGroups::default();

    for commit in &classification.stable {
        match parse_issue_id(&commit.message) {
            Some(issue) => groups.issues.entry(issue).or_default().push(commit.clone()),
            None => groups.standalone.push(commit.clone()),
        }
    }

    for commit in &classification.unstable {
        if let Some(issue) = parse_issue_id(&commit.message)
            && groups.issues.remove(&issue).is_some()
        {
            groups.discarded.push(issue);
        }
    }

    groups.discarded.sort_unstable();
    groups
}
