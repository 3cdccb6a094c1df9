//! Repository detection from remote URLs

use crate::error::{Error, Result};
use crate::types::RepoId;
use regex::Regex;
use std::sync::OnceLock;

/// Whether a hostname is GitHub (github.com, its subdomains, or `gh_host`)
pub fn is_github_host(hostname: &str, gh_host: Option<&str>) -> bool {
    hostname == "github.com"
        || hostname.ends_with(".github.com")
        || gh_host.is_some_and(|h| hostname == h)
}

fn ssh_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^git@([^:]+):([^/]+)/(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
    })
}

fn https_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://([^/]+)/([^/]+)/(.+?)(?:\.git)?/?$")
            .expect("hardcoded regex is valid")
    })
}

/// Parse `owner/repo` or a GitHub remote URL into a repository id and host
///
/// The host is `None` for github.com and `Some` for Enterprise hosts.
/// Accepts `owner/repo`, `https://host/owner/repo(.git)` and
/// `git@host:owner/repo(.git)`.
pub fn parse_repo_url(url: &str, gh_host: Option<&str>) -> Result<(RepoId, Option<String>)> {
    let url = url.trim();

    let captures = ssh_pattern()
        .captures(url)
        .or_else(|| https_pattern().captures(url));

    let Some(caps) = captures else {
        return match url.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok((RepoId::new(owner, repo.trim_end_matches(".git")), None))
            }
            _ => Err(Error::Config(format!("cannot parse repository: {url}"))),
        };
    };

    let hostname = &caps[1];
    if !is_github_host(hostname, gh_host) {
        return Err(Error::Config(format!(
            "{hostname} is not a GitHub host (set GH_HOST for GitHub Enterprise)"
        )));
    }

    let repo = &caps[3];
    if repo.contains('/') {
        return Err(Error::Config(format!("invalid repository path: {url}")));
    }

    let host = (hostname != "github.com").then(|| hostname.to_string());
    Ok((RepoId::new(&caps[2], repo), host))
}
