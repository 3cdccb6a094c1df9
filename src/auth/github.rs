//! GitHub authentication

use crate::auth::{AuthSource, Credential};
use crate::error::{Error, Result};
use crate::platform::{GitHubService, HostingService};
use std::env;
use tokio::process::Command;
use tracing::debug;

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Bearer credential
    pub credential: Credential,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. gh CLI (`gh auth token`, scoped to `host` when given)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = get_gh_cli_token(host).await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            credential: Credential::new(token)?,
            source: AuthSource::Cli,
        });
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var) {
            if token.trim().is_empty() {
                continue;
            }
            debug!("using GitHub token from {var}");
            return Ok(GitHubAuthConfig {
                credential: Credential::new(token)?,
                source: AuthSource::EnvVar,
            });
        }
    }

    Err(Error::Unauthorized(
        "No GitHub authentication found. Run `gh auth login` or set GITHUB_TOKEN".to_string(),
    ))
}

async fn get_gh_cli_token(host: Option<&str>) -> Option<String> {
    Command::new("gh").arg("--version").output().await.ok()?;

    let mut args = vec!["auth", "token"];
    if let Some(host) = host {
        args.extend(["--hostname", host]);
    }

    let output = Command::new("gh").args(&args).output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}

/// Test GitHub authentication, returning the login it belongs to
pub async fn test_github_auth(config: &GitHubAuthConfig, host: Option<&str>) -> Result<String> {
    let service = GitHubService::new(&config.credential, host)?;
    service.current_user().await
}
