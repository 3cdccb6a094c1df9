//! Submit command - publish a new contribution as a pull request

use crate::cli::progress::{CliProgress, Reported};
use crate::cli::request::read_submission;
use crate::cli::style::{Stream, Stylize, arrow, hyperlink_url};
use anstream::println;
use anyhow::Result;
use chrono::Utc;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::Path;
use taxonomy_contrib::config::Config;
use taxonomy_contrib::platform::create_hosting_service;
use taxonomy_contrib::publish::{PublishPlan, plan_for_user, publish_submission};
use taxonomy_contrib::types::{FileChange, UpstreamConfig};

fn report_plan(plan: &PublishPlan, login: &str, upstream: &UpstreamConfig) {
    println!(
        "  {} Fork {} into {}/{} (if missing)",
        arrow(),
        upstream.repo,
        login,
        upstream.repo.name
    );
    println!("  {} Create branch {}", arrow(), plan.branch_name.accent());
    println!("  {} Commit {} file(s):", arrow(), plan.files.len());
    for file in &plan.files {
        if let FileChange::Write { path, content } = file {
            println!("      {} {}", path.accent(), format!("({} bytes)", content.len()).muted());
        }
    }
    for line in plan.commit_message.lines() {
        println!("      {}", line.muted());
    }
    println!(
        "  {} Open PR \"{}\" against {}",
        arrow(),
        plan.title,
        upstream.base_branch.accent()
    );
}

/// Confirm before writing, unless `--yes` or stdin is not a terminal
pub fn confirmed(prompt: &str, yes: bool) -> Result<bool> {
    if yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}

/// Run the submit command
pub async fn run_submit(request: &Path, dry_run: bool, yes: bool) -> Result<()> {
    let submission = read_submission(request)?;
    let config = Config::load()?;
    let service = create_hosting_service(&config.upstream).await?;

    let (login, plan) =
        plan_for_user(service.as_ref(), &submission, Utc::now().timestamp_millis()).await?;

    println!(
        "Submitting {} contribution to {}:",
        submission.kind.to_string().emphasis(),
        config.upstream.repo.to_string().accent()
    );
    report_plan(&plan, &login, &config.upstream);
    println!();

    if dry_run {
        println!("{}", "Dry run - no changes made".muted());
        return Ok(());
    }

    if !confirmed("Open this pull request?", yes)? {
        println!("Aborted");
        return Ok(());
    }

    let outcome = publish_submission(
        service.as_ref(),
        &config.upstream,
        &submission,
        &config.fork_wait,
        &CliProgress,
    )
    .await
    .map_err(Reported)?;

    println!();
    println!(
        "Pull request {} opened: {}",
        format!("#{}", outcome.pull_request.number).accent(),
        hyperlink_url(Stream::Stdout, &outcome.pull_request.html_url)
    );
    Ok(())
}
