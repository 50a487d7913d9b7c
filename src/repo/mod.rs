//! Version-control backend
//!
//! The promotion engine never touches git directly: every read and every
//! mutation of the working copy goes through a [`Workspace`] handle that the
//! coordinator threads through each step.

mod git;

pub use git::GitWorkspace;

use crate::error::{Error, Result};
use crate::types::{CommitInfo, GitRemote};

/// Operations the promotion engine needs from a working copy
///
/// The checked-out branch is process-wide state of the working copy, so every
/// method that changes it takes `&mut self`.
pub trait Workspace: Send {
    /// Commits reachable from `head` but not from `base`, oldest first in
    /// topological order
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>>;

    /// Whether tracked files have uncommitted modifications
    fn is_dirty(&self) -> Result<bool>;

    /// Currently checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether a local branch with this name exists
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Create a local branch at `start_point` without checking it out
    fn create_branch(&mut self, name: &str, start_point: &str) -> Result<()>;

    /// Delete a local branch, merged or not
    fn delete_branch(&mut self, name: &str) -> Result<()>;

    /// Check out an existing local branch
    fn checkout(&mut self, branch: &str) -> Result<()>;

    /// Reapply `commits`, in order, onto the current branch
    ///
    /// On failure the partially applied sequence is aborted so the working
    /// copy is left clean at the branch tip it had before the call.
    fn cherry_pick(&mut self, commits: &[String]) -> Result<()>;

    /// Those of `commits` whose changes are not yet on `branch`, in order
    ///
    /// Compares patches rather than ids, so a commit cherry-picked onto the
    /// branch earlier counts as present.
    fn missing_commits(&self, branch: &str, commits: &[String]) -> Result<Vec<String>>;

    /// Push a local branch to a remote
    fn push(&mut self, remote: &str, branch: &str) -> Result<()>;

    /// Configured remotes with their URLs
    fn git_remotes(&self) -> Result<Vec<GitRemote>>;
}

/// Pick the single URL of the named remote
///
/// A remote with zero or several URLs is ambiguous.
pub fn remote_url(remotes: &[GitRemote], name: &str) -> Result<String> {
    let remote = remotes
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| Error::RemoteNotFound(name.to_string()))?;

    match remote.urls.as_slice() {
        [url] => Ok(url.clone()),
        urls => Err(Error::AmbiguousRemote {
            remote: name.to_string(),
            count: urls.len(),
        }),
    }
}
