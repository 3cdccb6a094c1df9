//! CLI progress callback with styled output

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url, short_sha};
use anstream::{eprintln, println};
use async_trait::async_trait;
use taxonomy_contrib::error::PublishFailure;
use taxonomy_contrib::publish::{Phase, ProgressCallback};
use taxonomy_contrib::types::{BranchRef, CommitRef, PullRequest};

/// Prints each workflow step to stdout and failures to stderr
pub struct CliProgress;

/// A publish failure that [`CliProgress`] has already printed
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Reported(#[from] pub PublishFailure);

/// Whether a command error was already printed by the progress output
pub fn already_reported(err: &anyhow::Error) -> bool {
    err.is::<Reported>()
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => println!("{} {}", check(), phase.to_string().success()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_fork_wait(&self, attempt: u32, attempts: u32) {
        if attempt == 1 {
            println!("  Waiting for the fork to become ready...");
        } else {
            println!("  {}", format!("still waiting ({attempt}/{attempts})").muted());
        }
    }

    async fn on_branch_created(&self, branch: &BranchRef) {
        println!(
            "  {} Created branch {} in {}",
            check(),
            branch.name.accent(),
            branch.repo
        );
    }

    async fn on_commit_created(&self, commit: &CommitRef) {
        println!("  {} Committed {}", check(), short_sha(&commit.sha).accent());
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        let number = format!("#{}", pr.number);
        println!("  {} Created PR {}", check(), number.accent());
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_updated(&self, pr: &PullRequest) {
        let number = format!("#{}", pr.number);
        println!("  {} Updated PR {}", check(), number.accent());
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_error(&self, failure: &PublishFailure) {
        eprintln!("  {} {}", cross(), failure.title.error());
        eprintln!("    {}", failure.message());
        if failure.is_retryable() {
            eprintln!("    {}", "This may be temporary; try again shortly.".warn());
        }
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
