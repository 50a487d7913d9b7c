//! In-memory workspace for testing the promotion engine
//!
//! Branches are lists of commit ids. A cherry-pick appends ids to the current
//! branch; reapplying an id the branch already holds fails the way an empty
//! git cherry-pick does.

#![allow(dead_code)]

use git_mature::error::{Error, Result};
use git_mature::repo::Workspace;
use git_mature::types::{CommitInfo, GitRemote};
use std::collections::{BTreeMap, HashMap, HashSet};

pub struct MockWorkspace {
    history: Vec<CommitInfo>,
    branches: BTreeMap<String, Vec<String>>,
    current: Option<String>,
    dirty: bool,
    remotes: Vec<GitRemote>,
    // Failure injection
    failing_commits: HashSet<String>,
    failing_pushes: HashSet<String>,
    failing_checkouts: HashSet<String>,
    checkouts_before_failure: HashMap<String, usize>,
    // Call tracking
    operations: Vec<String>,
    pushes: Vec<(String, String)>,
}

impl MockWorkspace {
    /// Workspace with `master` checked out and `dev` holding `history`
    /// on top of it
    pub fn new(history: Vec<CommitInfo>) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert("master".to_string(), Vec::new());
        branches.insert(
            "dev".to_string(),
            history.iter().map(|c| c.id.clone()).collect(),
        );
        Self {
            history,
            branches,
            current: Some("master".to_string()),
            dirty: false,
            remotes: vec![GitRemote {
                name: "origin".to_string(),
                urls: vec!["git@github.com:test/repo.git".to_string()],
            }],
            failing_commits: HashSet::new(),
            failing_pushes: HashSet::new(),
            failing_checkouts: HashSet::new(),
            checkouts_before_failure: HashMap::new(),
            operations: Vec::new(),
            pushes: Vec::new(),
        }
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn set_current_branch(&mut self, branch: Option<&str>) {
        self.current = branch.map(ToString::to_string);
    }

    /// Add a local branch holding `commits`
    pub fn add_branch(&mut self, name: &str, commits: &[&str]) {
        self.branches.insert(
            name.to_string(),
            commits.iter().map(ToString::to_string).collect(),
        );
    }

    /// Make cherry-picking this commit conflict
    pub fn fail_commit(&mut self, id: &str) {
        self.failing_commits.insert(id.to_string());
    }

    /// Make pushing this branch fail
    pub fn fail_push(&mut self, branch: &str) {
        self.failing_pushes.insert(branch.to_string());
    }

    /// Make checking out this branch fail
    pub fn fail_checkout(&mut self, branch: &str) {
        self.failing_checkouts.insert(branch.to_string());
    }

    /// Let `successes` checkouts of this branch through, then fail the rest
    pub fn fail_checkout_after(&mut self, branch: &str, successes: usize) {
        self.checkouts_before_failure
            .insert(branch.to_string(), successes);
    }

    // === Inspection ===

    pub fn branch(&self, name: &str) -> Option<&Vec<String>> {
        self.branches.get(name)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// `(remote, branch)` pairs pushed successfully
    pub fn pushes(&self) -> &[(String, String)] {
        &self.pushes
    }

    /// Every call that would change the repository or the remote
    pub fn mutations(&self) -> Vec<String> {
        self.operations
            .iter()
            .filter(|op| !op.starts_with("checkout"))
            .cloned()
            .collect()
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    fn git_error(command: &str, stderr: &str) -> Error {
        Error::Git {
            command: command.to_string(),
            stderr: stderr.to_string(),
        }
    }
}

impl Workspace for MockWorkspace {
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>> {
        if !self.branches.contains_key(base) {
            return Err(Self::git_error("log", &format!("unknown revision {base}")));
        }
        let head_ids = self
            .branches
            .get(head)
            .ok_or_else(|| Self::git_error("log", &format!("unknown revision {head}")))?;

        // Picked copies get new hashes in git, so `base` never hides them.
        Ok(self
            .history
            .iter()
            .filter(|c| head_ids.contains(&c.id))
            .cloned()
            .collect())
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current.clone())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.branches.contains_key(name))
    }

    fn create_branch(&mut self, name: &str, start_point: &str) -> Result<()> {
        self.operations.push(format!("branch {name} {start_point}"));
        if self.branches.contains_key(name) {
            return Err(Self::git_error("branch", "already exists"));
        }
        let start = self
            .branches
            .get(start_point)
            .cloned()
            .ok_or_else(|| Self::git_error("branch", "not a valid object name"))?;
        self.branches.insert(name.to_string(), start);
        Ok(())
    }

    fn delete_branch(&mut self, name: &str) -> Result<()> {
        self.operations.push(format!("branch -D {name}"));
        if self.current.as_deref() == Some(name) {
            return Err(Self::git_error("branch -D", "cannot delete checked out branch"));
        }
        self.branches
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Self::git_error("branch -D", "branch not found"))
    }

    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.operations.push(format!("checkout {branch}"));
        if let Some(remaining) = self.checkouts_before_failure.get_mut(branch) {
            if *remaining == 0 {
                self.failing_checkouts.insert(branch.to_string());
            } else {
                *remaining -= 1;
            }
        }
        if self.failing_checkouts.contains(branch) || !self.branches.contains_key(branch) {
            return Err(Self::git_error("checkout", &format!("pathspec '{branch}' did not match")));
        }
        self.current = Some(branch.to_string());
        Ok(())
    }

    fn cherry_pick(&mut self, commits: &[String]) -> Result<()> {
        self.operations
            .push(format!("cherry-pick {}", commits.join(" ")));
        let current = self
            .current
            .clone()
            .ok_or_else(|| Self::git_error("cherry-pick", "HEAD is detached"))?;
        let tip = self
            .branches
            .get(&current)
            .ok_or_else(|| Self::git_error("cherry-pick", "no such branch"))?;

        for id in commits {
            if self.failing_commits.contains(id) {
                return Err(Self::git_error("cherry-pick", &format!("could not apply {id}")));
            }
            if tip.contains(id) {
                return Err(Self::git_error(
                    "cherry-pick",
                    "The previous cherry-pick is now empty",
                ));
            }
        }

        if let Some(tip) = self.branches.get_mut(&current) {
            tip.extend(commits.iter().cloned());
        }
        Ok(())
    }

    fn missing_commits(&self, branch: &str, commits: &[String]) -> Result<Vec<String>> {
        let tip = self
            .branches
            .get(branch)
            .ok_or_else(|| Self::git_error("cherry", &format!("unknown commit {branch}")))?;
        Ok(commits
            .iter()
            .filter(|id| !tip.contains(id))
            .cloned()
            .collect())
    }

    fn push(&mut self, remote: &str, branch: &str) -> Result<()> {
        self.operations.push(format!("push {remote} {branch}"));
        if self.failing_pushes.contains(branch) {
            return Err(Self::git_error("push", "rejected"));
        }
        self.pushes.push((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn git_remotes(&self) -> Result<Vec<GitRemote>> {
        Ok(self.remotes.clone())
    }
}
