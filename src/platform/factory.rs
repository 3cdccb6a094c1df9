//! Hosting service factory
//!
//! Creates the hosting service for the configured upstream.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GitHubService, HostingService};
use crate::types::UpstreamConfig;

/// Create a hosting service from configuration
///
/// Resolves the contributor's credential and builds the GitHub client for
/// the upstream's host.
pub async fn create_hosting_service(config: &UpstreamConfig) -> Result<Box<dyn HostingService>> {
    let auth = get_github_auth(config.host.as_deref()).await?;
    Ok(Box::new(GitHubService::new(
        &auth.credential,
        config.host.as_deref(),
    )?))
}
