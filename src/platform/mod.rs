//! Hosting platform services
//!
//! Provides the pull request operations the promotion engine needs.

mod detection;
mod factory;
mod github;
mod graphql;

pub use detection::{is_github_host, parse_repo_info, parse_repo_info_with_host};
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for pull request operations
///
/// Abstracts the hosting backend so the promotion logic can run against
/// GitHub or a test double.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Opaque repository identifier, resolved once and cached
    async fn repository_id(&self) -> Result<String>;

    /// Find an existing open PR from `head` into `base`
    async fn find_existing_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>>;

    /// Create a new PR
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
