//! Workspace backed by the `git` command-line tool

use crate::error::{Error, Result};
use crate::repo::Workspace;
use crate::types::{CommitInfo, GitRemote};
use chrono::DateTime;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

/// A git working copy driven through the `git` CLI
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Open the working copy containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::NotARepository(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()?;

        if !output.status.success() {
            return Err(Error::NotARepository(format!(
                "{}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(root = %root.display(), "opened git workspace");
        Ok(Self { root })
    }

    /// Root directory of the working copy
    pub fn workspace_root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()?;
        Ok(output)
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Workspace for GitWorkspace {
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>> {
        let range = format!("{base}..{head}");
        let stdout = self.git(&[
            "log",
            "--topo-order",
            "--reverse",
            "--format=%H%x1f%ct%x1f%B%x1e",
            &range,
        ])?;

        let commits = parse_log(&stdout)?;
        debug!(%range, count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn is_dirty(&self) -> Result<bool> {
        let stdout = self.git(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!stdout.trim().is_empty())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let output = self.run(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        if output.status.success() {
            Ok(Some(
                String::from_utf8_lossy(&output.stdout).trim().to_string(),
            ))
        } else {
            // Exit status 1 without stderr means detached HEAD
            Ok(None)
        }
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{name}");
        let output = self.run(&["show-ref", "--verify", "--quiet", &reference])?;
        Ok(output.status.success())
    }

    fn create_branch(&mut self, name: &str, start_point: &str) -> Result<()> {
        self.git(&["branch", name, start_point])?;
        Ok(())
    }

    fn delete_branch(&mut self, name: &str) -> Result<()> {
        self.git(&["branch", "-D", name])?;
        Ok(())
    }

    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.git(&["checkout", "--quiet", branch])?;
        Ok(())
    }

    fn cherry_pick(&mut self, commits: &[String]) -> Result<()> {
        let mut args = vec!["cherry-pick"];
        args.extend(commits.iter().map(String::as_str));

        match self.git(&args) {
            Ok(_) => Ok(()),
            Err(err) => {
                // Nothing to abort when git rejected the arguments up front
                if let Err(abort_err) = self.git(&["cherry-pick", "--abort"]) {
                    debug!(%abort_err, "cherry-pick abort was a no-op");
                }
                Err(err)
            }
        }
    }

    fn missing_commits(&self, branch: &str, commits: &[String]) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for id in commits {
            // `git cherry` marks commits without an equivalent patch with '+'
            let parent = format!("{id}^");
            let stdout = self.git(&["cherry", branch, id, &parent])?;
            if stdout.lines().any(|line| line.starts_with('+')) {
                missing.push(id.clone());
            }
        }
        debug!(branch, missing = missing.len(), "compared commits with branch");
        Ok(missing)
    }

    fn push(&mut self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["push", "--quiet", remote, branch])?;
        Ok(())
    }

    fn git_remotes(&self) -> Result<Vec<GitRemote>> {
        let names = self.git(&["remote"])?;
        names
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                let urls = self.git(&["remote", "get-url", "--all", name])?;
                Ok(GitRemote {
                    name: name.to_string(),
                    urls: urls.lines().map(|u| u.trim().to_string()).collect(),
                })
            })
            .collect()
    }
}

/// Parse `git log` output written with the record format used above
fn parse_log(stdout: &str) -> Result<Vec<CommitInfo>> {
    stdout
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.is_empty())
        .map(|record| {
            let mut fields = record.splitn(3, FIELD_SEP);
            let (Some(id), Some(timestamp), Some(message)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Parse(format!("malformed git log record: {record:?}")));
            };

            let secs: i64 = timestamp
                .trim()
                .parse()
                .map_err(|e| Error::Parse(format!("bad commit timestamp {timestamp:?}: {e}")))?;
            let committed_at = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| Error::Parse(format!("commit timestamp out of range: {secs}")))?;

            Ok(CommitInfo {
                id: id.trim().to_string(),
                message: message.trim_end().to_string(),
                committed_at,
            })
        })
        .collect()
}
