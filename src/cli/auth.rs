//! Auth command - test and explain authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use anyhow::{Result, bail};
use taxonomy_contrib::auth::{get_github_auth, test_github_auth};
use taxonomy_contrib::config::{
    BASE_BRANCH_ENV_VAR, Config, GH_HOST_ENV_VAR, REPO_NAME_ENV_VAR, REPO_OWNER_ENV_VAR,
    REPO_URL_ENV_VAR,
};

/// Run the auth test command
pub async fn run_auth_test() -> Result<()> {
    let host = Config::load_host()?;

    println!("Testing GitHub authentication...");
    let config = get_github_auth(host.as_deref()).await?;
    let username = test_github_auth(&config, host.as_deref()).await?;

    println!("{} Authenticated as: {}", check(), username.accent());
    println!("  Token source: {:?}", config.source);
    if let Some(host) = host {
        println!("  Host: {host}");
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set {GH_HOST_ENV_VAR} to your instance hostname, or `host` in the config file");
    println!();
    println!("{}", "Upstream taxonomy".emphasis());
    println!("  Set {REPO_URL_ENV_VAR} (owner/repo or URL),");
    println!("  or {REPO_OWNER_ENV_VAR} and {REPO_NAME_ENV_VAR}");
    println!("  Optional: {BASE_BRANCH_ENV_VAR} (default: main)");
    if let Some(path) = Config::path() {
        println!("  Or write them to {}", path.display().to_string().muted());
    }
}

/// Wrapper for auth commands
pub async fn run_auth(action: &str) -> Result<()> {
    match action {
        "test" => run_auth_test().await,
        "setup" => {
            run_auth_setup();
            Ok(())
        }
        _ => bail!("unknown auth action: {action} (use 'test' or 'setup')"),
    }
}
