//! Core types for git-mature

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit on the divergent branch, as read from the version-control backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash (hex)
    pub id: String,
    /// Full commit message
    pub message: String,
    /// When the commit was committed
    pub committed_at: DateTime<Utc>,
}

impl CommitInfo {
    /// Abbreviated commit hash for display
    pub fn short_id(&self) -> &str {
        &self.id[..8.min(self.id.len())]
    }

    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Configured URLs, usually exactly one
    pub urls: Vec<String>,
}

/// Hosting repository identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}
