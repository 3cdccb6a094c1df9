//! Progress callback trait for interface-agnostic updates
//!
//! Front ends (the CLI, a web handler) implement this to follow a publish
//! or edit workflow as it runs.

use crate::error::PublishFailure;
use crate::types::{BranchRef, CommitRef, PullRequest};
use async_trait::async_trait;
use std::fmt;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking up the authenticated login
    ResolvingUser,
    /// Checking for (or creating) the contributor's fork
    EnsuringFork,
    /// Creating the contribution branch
    CreatingBranch,
    /// Writing the files in a single commit
    Committing,
    /// Opening the pull request
    OpeningPullRequest,
    /// Loading an existing pull request for editing
    LoadingPullRequest,
    /// Rewriting an existing pull request
    UpdatingPullRequest,
    /// Workflow complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ResolvingUser => "Resolving GitHub user",
            Self::EnsuringFork => "Checking fork",
            Self::CreatingBranch => "Creating branch",
            Self::Committing => "Committing files",
            Self::OpeningPullRequest => "Opening pull request",
            Self::LoadingPullRequest => "Loading pull request",
            Self::UpdatingPullRequest => "Updating pull request",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called before each fork readiness check
    async fn on_fork_wait(&self, attempt: u32, attempts: u32);

    /// Called when the contribution branch exists
    async fn on_branch_created(&self, branch: &BranchRef);

    /// Called when the branch points at the new commit
    async fn on_commit_created(&self, commit: &CommitRef);

    /// Called when a PR is created
    async fn on_pr_created(&self, pr: &PullRequest);

    /// Called when a PR is updated
    async fn on_pr_updated(&self, pr: &PullRequest);

    /// Called once when the workflow fails
    async fn on_error(&self, failure: &PublishFailure);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for tests and library callers
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_fork_wait(&self, _attempt: u32, _attempts: u32) {}
    async fn on_branch_created(&self, _branch: &BranchRef) {}
    async fn on_commit_created(&self, _commit: &CommitRef) {}
    async fn on_pr_created(&self, _pr: &PullRequest) {}
    async fn on_pr_updated(&self, _pr: &PullRequest) {}
    async fn on_error(&self, _failure: &PublishFailure) {}
    async fn on_message(&self, _message: &str) {}
}
