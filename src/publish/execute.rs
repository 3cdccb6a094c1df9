//! Publish execution
//!
//! Drives the hosting service through the git data primitives: fork,
//! branch, one multi-file commit, pull request. Amending rewrites the
//! branch tip in place instead of stacking another commit.

use crate::error::{PublishFailure, Result};
use crate::platform::HostingService;
use crate::publish::{
    AmendPlan, ForkWait, Phase, ProgressCallback, PublishPlan, Titled, ensure_fork,
    plan_submission,
};
use crate::types::{
    BranchRef, CommitRef, FileChange, NewPullRequest, PullRequest, RepoId, Submission,
    UpstreamConfig,
};
use chrono::Utc;
use tracing::{debug, info};

/// Result of a successful publish
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// The opened pull request
    pub pull_request: PullRequest,
    /// Branch created in the fork
    pub branch: BranchRef,
    /// Commit carrying the contribution files
    pub commit: CommitRef,
}

/// Create `name` in `fork` at the tip of `base_branch`
pub async fn create_branch(
    service: &dyn HostingService,
    fork: &RepoId,
    base_branch: &str,
    name: &str,
) -> Result<BranchRef> {
    let base_sha = service.branch_sha(fork, base_branch).await?;
    service.create_branch_ref(fork, name, &base_sha).await?;
    debug!("created {name} in {fork} at {base_sha}");

    Ok(BranchRef {
        repo: fork.clone(),
        name: name.to_string(),
        head_sha: base_sha,
    })
}

/// Write `files` on top of the branch tip as a single commit
///
/// The new commit has exactly one parent (the current tip) and the branch
/// is force-moved to it.
pub async fn publish_files(
    service: &dyn HostingService,
    branch: &BranchRef,
    files: &[FileChange],
    message: &str,
) -> Result<CommitRef> {
    let tip_sha = service.branch_sha(&branch.repo, &branch.name).await?;
    let tip = service.get_commit(&branch.repo, &tip_sha).await?;

    let tree = service
        .create_tree(&branch.repo, &tip.tree_sha, files)
        .await?;
    let commit = service
        .create_commit(&branch.repo, message, &tree, std::slice::from_ref(&tip.sha))
        .await?;
    service
        .update_branch_ref(&branch.repo, &branch.name, &commit.sha, true)
        .await?;

    info!("committed {} file(s) to {} as {}", files.len(), branch.name, commit.sha);
    Ok(commit)
}

/// Open a pull request from `branch` against the upstream base branch
pub async fn open_pull_request(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    branch: &BranchRef,
    title: &str,
    body: &str,
) -> Result<PullRequest> {
    let request = NewPullRequest {
        title: title.to_string(),
        head: format!("{}:{}", branch.repo.owner, branch.name),
        base: upstream.base_branch.clone(),
        body: body.to_string(),
    };
    let pr = service.create_pull_request(&upstream.repo, &request).await?;
    info!("opened pull request #{} ({})", pr.number, pr.html_url);
    Ok(pr)
}

/// Rewrite an open pull request
///
/// Title and body are updated first. The branch tip is then replaced by a
/// commit whose tree is the old tip's tree with `plan.changes` applied and
/// whose parent is the old tip's parent, and the ref is force-moved.
pub async fn amend_pull_request(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    plan: &AmendPlan,
) -> Result<PullRequest> {
    let pr = service
        .update_pull_request(&upstream.repo, plan.number, &plan.title, &plan.body)
        .await?;

    let tip_sha = service.branch_sha(&plan.fork, &plan.branch).await?;
    let tip = service.get_commit(&plan.fork, &tip_sha).await?;

    let tree = service
        .create_tree(&plan.fork, &tip.tree_sha, &plan.changes)
        .await?;
    let parents: Vec<String> = tip.parents.first().cloned().into_iter().collect();
    let commit = service
        .create_commit(&plan.fork, &plan.commit_message, &tree, &parents)
        .await?;
    service
        .update_branch_ref(&plan.fork, &plan.branch, &commit.sha, true)
        .await?;

    info!(
        "replaced tip of {} ({tip_sha} -> {}) for #{}",
        plan.branch, commit.sha, plan.number
    );
    Ok(pr)
}

/// Publish a new submission as a pull request
///
/// Ensures the fork, creates a timestamped branch, writes both files in one
/// commit and opens the pull request. A failure after branch creation
/// leaves the branch in the fork.
pub async fn publish_submission(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    submission: &Submission,
    fork_wait: &ForkWait,
    progress: &dyn ProgressCallback,
) -> std::result::Result<PublishOutcome, PublishFailure> {
    let timestamp = Utc::now().timestamp_millis();
    publish_submission_at(service, upstream, submission, fork_wait, timestamp, progress).await
}

/// [`publish_submission`] with an explicit branch timestamp
pub async fn publish_submission_at(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    submission: &Submission,
    fork_wait: &ForkWait,
    timestamp_millis: i64,
    progress: &dyn ProgressCallback,
) -> std::result::Result<PublishOutcome, PublishFailure> {
    let result = run_publish(
        service,
        upstream,
        submission,
        fork_wait,
        timestamp_millis,
        progress,
    )
    .await;

    if let Err(failure) = &result {
        debug!("publish failed: {failure}");
        progress.on_error(failure).await;
    }
    result
}

/// Resolve the login and build the plan without writing anything
pub async fn plan_for_user(
    service: &dyn HostingService,
    submission: &Submission,
    timestamp_millis: i64,
) -> std::result::Result<(String, PublishPlan), PublishFailure> {
    let login = service
        .current_user()
        .await
        .titled("Failed to fetch GitHub username")?;
    let plan = plan_submission(submission, &login, timestamp_millis)
        .titled("Invalid submission")?;
    Ok((login, plan))
}

async fn run_publish(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    submission: &Submission,
    fork_wait: &ForkWait,
    timestamp_millis: i64,
    progress: &dyn ProgressCallback,
) -> std::result::Result<PublishOutcome, PublishFailure> {
    progress.on_phase(Phase::ResolvingUser).await;
    let (login, plan) = plan_for_user(service, submission, timestamp_millis).await?;
    progress.on_message(&format!("Signed in as {login}")).await;

    progress.on_phase(Phase::EnsuringFork).await;
    let fork = ensure_fork(service, upstream, &login, fork_wait, progress)
        .await
        .titled("Failed to fork taxonomy repository")?;

    progress.on_phase(Phase::CreatingBranch).await;
    let branch = create_branch(service, &fork, &upstream.base_branch, &plan.branch_name)
        .await
        .titled("Failed to create branch")?;
    progress.on_branch_created(&branch).await;

    progress.on_phase(Phase::Committing).await;
    let commit = publish_files(service, &branch, &plan.files, &plan.commit_message)
        .await
        .titled("Failed to commit files")?;
    progress.on_commit_created(&commit).await;

    progress.on_phase(Phase::OpeningPullRequest).await;
    let pull_request = open_pull_request(service, upstream, &branch, &plan.title, &plan.body)
        .await
        .titled("Failed to create pull request")?;
    progress.on_pr_created(&pull_request).await;

    progress.on_phase(Phase::Complete).await;

    Ok(PublishOutcome {
        pull_request,
        branch,
        commit,
    })
}
