//! Authentication for the hosting platform
//!
//! Supports an explicit token, environment variables, and the gh CLI.

mod github;

pub use github::{get_github_auth, token_from_sources, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
    /// Token from the gh CLI
    Cli,
}
