//! Repository identity detection from remote URLs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

static SSH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@/]+@[^:]+:(.+?)(?:\.git)?/?$").expect("hardcoded SSH URL pattern is valid")
});

static SCHEME_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|ssh|git)://[^/]+/(.+?)(?:\.git)?/?$")
        .expect("hardcoded URL pattern is valid")
});

/// Whether `hostname` is GitHub or the configured GitHub Enterprise host
pub fn is_github_host(hostname: &str, enterprise_host: Option<&str>) -> bool {
    hostname == "github.com"
        || hostname.ends_with(".github.com")
        || enterprise_host.is_some_and(|h| hostname == h)
}

/// Parse repository owner and name from a remote URL
///
/// Honors `GH_HOST` for GitHub Enterprise remotes.
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let gh_host = env::var("GH_HOST").ok();
    parse_repo_info_with_host(url, gh_host.as_deref())
}

/// Parse repository owner and name from a remote URL, with an explicit
/// enterprise host instead of reading `GH_HOST`
pub fn parse_repo_info_with_host(url: &str, enterprise_host: Option<&str>) -> Result<PlatformConfig> {
    let url = url.trim();
    let hostname = extract_hostname(url).ok_or_else(|| Error::UnsupportedRemote(url.to_string()))?;

    if !is_github_host(&hostname, enterprise_host) {
        return Err(Error::UnsupportedRemote(url.to_string()));
    }

    // SSH format: git@host:owner/repo.git
    // URL format: https://host/owner/repo.git
    let path = SSH_URL
        .captures(url)
        .or_else(|| SCHEME_URL.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::UnsupportedRemote(url.to_string()))?;

    let (owner, repo) = match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            ((*owner).to_string(), (*repo).to_string())
        }
        _ => return Err(Error::UnsupportedRemote(url.to_string())),
    };

    let host = (hostname != "github.com").then_some(hostname);

    Ok(PlatformConfig { owner, repo, host })
}

fn extract_hostname(url: &str) -> Option<String> {
    if !url.contains("://") {
        // scp-like SSH: user@host:path
        return url
            .split_once('@')
            .and_then(|(_, rest)| rest.split(':').next())
            .filter(|h| !h.is_empty())
            .map(ToString::to_string);
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}
