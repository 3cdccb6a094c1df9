//! Application configuration
//!
//! Loaded from an optional `config.toml` in the platform config directory
//! (`~/.config/taxonomy-contrib/config.toml` on Linux), then overridden by
//! environment variables.
//!
//! ```toml
//! repo = "instructlab/taxonomy"   # or an https/ssh URL
//! base-branch = "main"
//! fork-poll-attempts = 10
//! fork-poll-delay-ms = 500
//! ```

use crate::error::{Error, Result};
use crate::platform::parse_repo_url;
use crate::publish::ForkWait;
use crate::types::{RepoId, UpstreamConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Directory name under the platform config dir
pub const CONFIG_DIR: &str = "taxonomy-contrib";
/// Configuration file name
pub const CONFIG_FILE: &str = "config.toml";
/// Environment variable for the tracing filter
pub const LOG_ENV_VAR: &str = "TAXON_LOG";
/// Environment variable for the upstream as `owner/repo` or URL
pub const REPO_URL_ENV_VAR: &str = "TAXONOMY_REPO_URL";
/// Environment variable for the upstream owner
pub const REPO_OWNER_ENV_VAR: &str = "TAXONOMY_REPO_OWNER";
/// Environment variable for the upstream repository name
pub const REPO_NAME_ENV_VAR: &str = "TAXONOMY_REPO";
/// Environment variable for the upstream base branch
pub const BASE_BRANCH_ENV_VAR: &str = "TAXONOMY_BASE_BRANCH";
/// Environment variable for a GitHub Enterprise host
pub const GH_HOST_ENV_VAR: &str = "GH_HOST";
/// Environment variable for fork readiness poll attempts
pub const FORK_POLL_ATTEMPTS_ENV_VAR: &str = "TAXON_FORK_POLL_ATTEMPTS";
/// Environment variable for the initial fork readiness delay
pub const FORK_POLL_DELAY_ENV_VAR: &str = "TAXON_FORK_POLL_DELAY_MS";

/// Default upstream base branch
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Raw contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    /// Upstream as `owner/repo` or URL
    pub repo: Option<String>,
    /// Upstream owner (when `repo` is not given)
    pub owner: Option<String>,
    /// Upstream repository name (when `repo` is not given)
    pub name: Option<String>,
    /// Upstream base branch
    pub base_branch: Option<String>,
    /// GitHub Enterprise host
    pub host: Option<String>,
    /// Fork readiness poll attempts
    pub fork_poll_attempts: Option<u32>,
    /// Initial fork readiness delay in milliseconds
    pub fork_poll_delay_ms: Option<u64>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("invalid config at {}: {e}", path.display())))
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream taxonomy repository
    pub upstream: UpstreamConfig,
    /// Fork readiness polling policy
    pub fork_wait: ForkWait,
}

fn parse_number<T: FromStr>(var: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| Error::Config(format!("{var} must be a number, got {v:?}")))
        })
        .transpose()
}

impl Config {
    /// Load from the config file (if present) and the process environment
    pub fn load() -> Result<Self> {
        Self::resolve(Self::read_file()?, |key| env::var(key).ok())
    }

    /// Resolve only the GitHub host, without requiring an upstream repository
    pub fn load_host() -> Result<Option<String>> {
        Ok(Self::resolve_host(&Self::read_file()?, |key| env::var(key).ok()))
    }

    fn read_file() -> Result<FileConfig> {
        match Self::path() {
            Some(path) if path.exists() => FileConfig::read(&path),
            _ => Ok(FileConfig::default()),
        }
    }

    /// The config file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// GitHub host: the upstream URL's Enterprise host, else `GH_HOST`,
    /// else the file's `host`
    pub fn resolve_host(
        file: &FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = env(GH_HOST_ENV_VAR).or_else(|| file.host.clone());
        let url_host = env(REPO_URL_ENV_VAR)
            .or_else(|| file.repo.clone())
            .and_then(|url| parse_repo_url(&url, host.as_deref()).ok())
            .and_then(|(_, url_host)| url_host);
        url_host.or(host)
    }

    /// Merge file values with an environment lookup; the environment wins
    pub fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = Self::resolve_host(&file, &lookup);
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let repo = if let Some(url) = env(REPO_URL_ENV_VAR).or(file.repo) {
            parse_repo_url(&url, host.as_deref())?.0
        } else {
            let owner = env(REPO_OWNER_ENV_VAR).or(file.owner);
            let name = env(REPO_NAME_ENV_VAR).or(file.name);
            match (owner, name) {
                (Some(owner), Some(name)) => RepoId::new(owner, name),
                _ => {
                    return Err(Error::Config(format!(
                        "upstream repository not configured: set {REPO_URL_ENV_VAR}, or \
                         {REPO_OWNER_ENV_VAR} and {REPO_NAME_ENV_VAR}"
                    )));
                }
            }
        };

        let base_branch = env(BASE_BRANCH_ENV_VAR)
            .or(file.base_branch)
            .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string());

        let mut fork_wait = ForkWait::default();
        if let Some(attempts) = parse_number::<u32>(
            FORK_POLL_ATTEMPTS_ENV_VAR,
            env(FORK_POLL_ATTEMPTS_ENV_VAR),
        )?
        .or(file.fork_poll_attempts)
        {
            fork_wait.attempts = attempts.max(1);
        }
        if let Some(ms) =
            parse_number::<u64>(FORK_POLL_DELAY_ENV_VAR, env(FORK_POLL_DELAY_ENV_VAR))?
                .or(file.fork_poll_delay_ms)
        {
            fork_wait.initial_delay = Duration::from_millis(ms);
            fork_wait.max_delay = fork_wait.max_delay.max(fork_wait.initial_delay);
        }

        Ok(Self {
            upstream: UpstreamConfig {
                repo,
                base_branch,
                host,
            },
            fork_wait,
        })
    }
}
