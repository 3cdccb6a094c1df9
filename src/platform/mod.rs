//! Hosting platform services
//!
//! Provides the git-data, pull request, and contents operations the
//! publishing workflow and the tree fetcher need, behind one trait.

mod detection;
mod factory;
mod github;

pub use detection::{is_github_host, parse_repo_url};
pub use factory::create_hosting_service;
pub use github::{API_VERSION, GitHubService};

use crate::error::Result;
use crate::types::{
    CommitRef, ContentEntry, FileChange, NewPullRequest, PullRequest, PullRequestFile, RepoId,
};
use async_trait::async_trait;

/// Hosting service trait for repository, git-data and PR operations
///
/// Implementations hold the contributor's credential; callers never see it.
/// Every method is a single API round trip and may fail with any
/// [`crate::error::Error`] variant produced by HTTP classification.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Login of the authenticated user
    async fn current_user(&self) -> Result<String>;

    /// Whether a repository exists and is visible
    async fn repo_exists(&self, repo: &RepoId) -> Result<bool>;

    /// Fork `upstream` into the authenticated user's account
    async fn create_fork(&self, upstream: &RepoId) -> Result<()>;

    /// Commit SHA at the tip of a branch
    async fn branch_sha(&self, repo: &RepoId, branch: &str) -> Result<String>;

    /// Create `refs/heads/<branch>` at `sha`
    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()>;

    /// Move `refs/heads/<branch>` to `sha`
    async fn update_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<()>;

    /// Read a commit object
    async fn get_commit(&self, repo: &RepoId, sha: &str) -> Result<CommitRef>;

    /// Create a tree layered on `base_tree`, returning the new tree SHA
    async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        changes: &[FileChange],
    ) -> Result<String>;

    /// Create a commit object
    async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<CommitRef>;

    /// Open a pull request against `upstream`
    async fn create_pull_request(
        &self,
        upstream: &RepoId,
        pr: &NewPullRequest,
    ) -> Result<PullRequest>;

    /// Read a pull request
    async fn get_pull_request(&self, upstream: &RepoId, number: u64) -> Result<PullRequest>;

    /// Replace a pull request's title and body
    async fn update_pull_request(
        &self,
        upstream: &RepoId,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// Files touched by a pull request
    async fn list_pull_request_files(
        &self,
        upstream: &RepoId,
        number: u64,
    ) -> Result<Vec<PullRequestFile>>;

    /// Text of a file at a git ref
    async fn file_content(&self, repo: &RepoId, path: &str, git_ref: &str) -> Result<String>;

    /// Entries of a directory on the default branch (`""` is the root)
    async fn list_directory(&self, repo: &RepoId, path: &str) -> Result<Vec<ContentEntry>>;

    /// Download raw text from a URL returned by a directory listing
    async fn download(&self, url: &str) -> Result<String>;
}
