//! Fork discovery and readiness polling

use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::publish::ProgressCallback;
use crate::types::{RepoId, UpstreamConfig};
use backon::{BackoffBuilder, ExponentialBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bounded polling policy for a freshly requested fork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkWait {
    /// Readiness checks before giving up (at least 1)
    pub attempts: u32,
    /// Sleep before the first check
    pub initial_delay: Duration,
    /// Upper bound for the doubling delay
    pub max_delay: Duration,
}

impl Default for ForkWait {
    fn default() -> Self {
        Self {
            attempts: 10,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl ForkWait {
    /// Policy that checks `attempts` times without sleeping
    pub const fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Sleep before each readiness check, doubling up to `max_delay`
    ///
    /// A `max_delay` below `initial_delay` is treated as `initial_delay`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let attempts = self.attempts.max(1);
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay.max(self.initial_delay))
            .with_max_times(attempts as usize)
            .build()
    }
}

/// Make sure `username` owns a fork of the upstream repository
///
/// No fork call is made when the fork already exists. Otherwise the fork
/// is requested and polled until its base branch resolves.
pub async fn ensure_fork(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    username: &str,
    wait: &ForkWait,
    progress: &dyn ProgressCallback,
) -> Result<RepoId> {
    let fork = RepoId::new(username, &upstream.repo.name);

    if service.repo_exists(&fork).await? {
        debug!("fork {fork} already exists");
        return Ok(fork);
    }

    info!("forking {} as {fork}", upstream.repo);
    service.create_fork(&upstream.repo).await?;
    wait_for_fork(service, &fork, &upstream.base_branch, wait, progress).await?;
    Ok(fork)
}

async fn wait_for_fork(
    service: &dyn HostingService,
    fork: &RepoId,
    base_branch: &str,
    wait: &ForkWait,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    let attempts = wait.attempts.max(1);

    for (attempt, delay) in (1..=attempts).zip(wait.delays()) {
        progress.on_fork_wait(attempt, attempts).await;
        tokio::time::sleep(delay).await;

        match service.branch_sha(fork, base_branch).await {
            Ok(_) => {
                info!("fork {fork} ready after {attempt} check(s)");
                return Ok(());
            }
            Err(e) if matches!(e, Error::NotFound(_)) || e.is_retryable() => {
                warn!("fork {fork} not ready (attempt {attempt}/{attempts}): {e}");
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::UpstreamUnavailable(format!(
        "fork {fork} not ready after {attempts} attempts"
    )))
}
