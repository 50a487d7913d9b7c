//! Error types for git-mature

use thiserror::Error;

/// Errors produced by git-mature
#[derive(Debug, Error)]
pub enum Error {
    /// Path does not point at a git working copy
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// A git command exited unsuccessfully
    #[error("`git {command}` failed: {stderr}")]
    Git {
        /// Arguments passed to git
        command: String,
        /// Trimmed stderr of the failed command
        stderr: String,
    },

    /// Commits could not be cherry-picked onto a branch
    #[error("cannot apply {commits} onto {branch}: {source}")]
    Reapply {
        /// Short ids of the commits, space separated
        commits: String,
        /// Branch the commits were applied onto
        branch: String,
        /// Underlying backend failure
        #[source]
        source: Box<Error>,
    },

    /// Tracked files have uncommitted modifications
    #[error("working tree has uncommitted changes; commit or stash them before promoting")]
    DirtyWorkingTree,

    /// Named remote does not exist
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// Remote has zero or several URLs configured
    #[error("expected exactly one URL for remote '{remote}', found {count}")]
    AmbiguousRemote {
        /// Remote name
        remote: String,
        /// Number of configured URLs
        count: usize,
    },

    /// Remote URL does not point at a supported GitHub host
    #[error(
        "cannot determine repository owner and name from remote URL '{0}'; \
         pass --repository-owner and --repository-name"
    )]
    UnsupportedRemote(String),

    /// Value could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API returned an error or an unexpected payload
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Hosting platform operation failed
    #[error("platform error: {0}")]
    Platform(String),

    /// Process spawn or other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias for git-mature
pub type Result<T> = std::result::Result<T, Error>;
