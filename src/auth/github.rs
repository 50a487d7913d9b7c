//! GitHub authentication

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. explicit token (`--token`)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
/// 4. gh CLI (`gh auth token`)
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(config) = token_from_sources(explicit, |name| env::var(name).ok()) {
        return Ok(config);
    }

    if let Some(token) = get_gh_cli_token().await {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "GitHub token not found. Pass --token, set GITHUB_TOKEN, or run `gh auth login`"
            .to_string(),
    ))
}

/// Pick a token from the flag or the environment, ignoring blank values
pub fn token_from_sources(
    explicit: Option<&str>,
    env_var: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    let non_blank = |t: &str| {
        let t = t.trim();
        (!t.is_empty()).then(|| t.to_string())
    };

    if let Some(token) = explicit.and_then(non_blank) {
        return Some(GitHubAuthConfig {
            token,
            source: AuthSource::Flag,
        });
    }

    ["GITHUB_TOKEN", "GH_TOKEN"]
        .into_iter()
        .find_map(|name| env_var(name).as_deref().and_then(non_blank))
        .map(|token| GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        })
}

async fn get_gh_cli_token() -> Option<String> {
    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    // Get token
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
