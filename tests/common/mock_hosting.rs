//! Mock hosting service for testing
//!
//! These are test utilities - not every helper is used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use taxonomy_contrib::error::{Error, Result};
use taxonomy_contrib::platform::HostingService;
use taxonomy_contrib::types::{
    CommitRef, ContentEntry, FileChange, NewPullRequest, PullRequest, PullRequestFile, RepoId,
};

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    RepoExists(RepoId),
    CreateFork(RepoId),
    BranchSha { repo: RepoId, branch: String },
    CreateBranchRef { repo: RepoId, branch: String, sha: String },
    UpdateBranchRef { repo: RepoId, branch: String, sha: String, force: bool },
    GetCommit(String),
    CreateTree { repo: RepoId, base_tree: String, changes: Vec<FileChange> },
    CreateCommit { repo: RepoId, message: String, parents: Vec<String> },
    CreatePullRequest(NewPullRequest),
    GetPullRequest(u64),
    UpdatePullRequest { number: u64, title: String, body: String },
    ListPullRequestFiles(u64),
    FileContent { repo: RepoId, path: String, git_ref: String },
    ListDirectory(String),
    Download(String),
}

impl Call {
    /// Method name, for ordering assertions
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentUser => "current_user",
            Self::RepoExists(_) => "repo_exists",
            Self::CreateFork(_) => "create_fork",
            Self::BranchSha { .. } => "branch_sha",
            Self::CreateBranchRef { .. } => "create_branch_ref",
            Self::UpdateBranchRef { .. } => "update_branch_ref",
            Self::GetCommit(_) => "get_commit",
            Self::CreateTree { .. } => "create_tree",
            Self::CreateCommit { .. } => "create_commit",
            Self::CreatePullRequest(_) => "create_pull_request",
            Self::GetPullRequest(_) => "get_pull_request",
            Self::UpdatePullRequest { .. } => "update_pull_request",
            Self::ListPullRequestFiles(_) => "list_pull_request_files",
            Self::FileContent { .. } => "file_content",
            Self::ListDirectory(_) => "list_directory",
            Self::Download(_) => "download",
        }
    }
}

/// A commit in the in-memory object store
#[derive(Debug, Clone)]
pub struct StoredCommit {
    pub tree: String,
    pub parents: Vec<String>,
    pub message: String,
}

#[derive(Default)]
struct State {
    next_id: u64,
    next_pr: u64,
    repos: HashSet<RepoId>,
    refs: HashMap<(RepoId, String), String>,
    commits: HashMap<String, StoredCommit>,
    trees: HashMap<String, BTreeMap<String, String>>,
    pulls: HashMap<u64, PullRequest>,
    pull_files: HashMap<u64, Vec<PullRequestFile>>,
    directories: HashMap<String, Vec<ContentEntry>>,
    downloads: HashMap<String, String>,
    fork_not_ready: u32,
    pending_fork: Option<RepoId>,
}

impl State {
    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{:04}", self.next_id)
    }

    fn store_commit(
        &mut self,
        files: BTreeMap<String, String>,
        parents: Vec<String>,
        message: &str,
    ) -> String {
        let tree = self.new_id("tree");
        self.trees.insert(tree.clone(), files);
        let sha = self.new_id("commit");
        self.commits.insert(
            sha.clone(),
            StoredCommit {
                tree,
                parents,
                message: message.to_string(),
            },
        );
        sha
    }

    fn resolve(&self, repo: &RepoId, git_ref: &str) -> Option<String> {
        if self.commits.contains_key(git_ref) {
            return Some(git_ref.to_string());
        }
        self.refs
            .get(&(repo.clone(), git_ref.to_string()))
            .cloned()
    }
}

/// In-memory hosting service
///
/// Holds a tiny git object store (refs, commits, trees as path maps) so
/// tests can assert on the exact contents a workflow committed.
pub struct MockHostingService {
    login: String,
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, u16>>,
}

fn not_found(what: impl std::fmt::Display) -> Error {
    Error::NotFound(what.to_string())
}

impl MockHostingService {
    /// Create a mock authenticated as `login`
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            state: Mutex::new(State {
                next_pr: 1,
                ..State::default()
            }),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    // === Seeding ===

    /// Create `repo` with `branch` holding a single commit of `files`
    pub fn seed_repo(&self, repo: &RepoId, branch: &str, files: &[(&str, &str)]) -> String {
        let mut state = self.state.lock().unwrap();
        let tree = files
            .iter()
            .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
            .collect();
        let sha = state.store_commit(tree, Vec::new(), "Initial commit");
        state.repos.insert(repo.clone());
        state
            .refs
            .insert((repo.clone(), branch.to_string()), sha.clone());
        sha
    }

    /// Copy `upstream` into the login's fork immediately
    pub fn seed_fork(&self, upstream: &RepoId) -> RepoId {
        let fork = RepoId::new(&self.login, &upstream.name);
        let mut state = self.state.lock().unwrap();
        copy_refs(&mut state, upstream, &fork);
        state.repos.insert(fork.clone());
        fork
    }

    /// Add a commit with `files` written on top of `base` and point `branch` at it
    pub fn seed_branch(
        &self,
        repo: &RepoId,
        base: &str,
        branch: &str,
        files: &[(&str, &str)],
        message: &str,
    ) -> String {
        let mut state = self.state.lock().unwrap();
        let base_sha = state.resolve(repo, base).expect("seeded base branch");
        let base_tree = state.commits[&base_sha].tree.clone();
        let mut tree = state.trees[&base_tree].clone();
        for (path, content) in files {
            tree.insert((*path).to_string(), (*content).to_string());
        }
        let sha = state.store_commit(tree, vec![base_sha], message);
        state
            .refs
            .insert((repo.clone(), branch.to_string()), sha.clone());
        sha
    }

    /// Register an open pull request and the files it touches
    pub fn seed_pull_request(&self, pr: PullRequest, files: &[&str]) {
        let mut state = self.state.lock().unwrap();
        let files = files
            .iter()
            .map(|f| PullRequestFile {
                filename: (*f).to_string(),
                status: "added".to_string(),
            })
            .collect();
        state.pull_files.insert(pr.number, files);
        state.pulls.insert(pr.number, pr);
    }

    /// Set the listing returned for a directory path
    pub fn set_directory(&self, path: &str, entries: Vec<ContentEntry>) {
        self.state
            .lock()
            .unwrap()
            .directories
            .insert(path.to_string(), entries);
    }

    /// Set the body served for a download URL
    pub fn set_download(&self, url: &str, body: &str) {
        self.state
            .lock()
            .unwrap()
            .downloads
            .insert(url.to_string(), body.to_string());
    }

    /// A new fork answers 404 for this many readiness checks
    pub fn set_fork_not_ready(&self, polls: u32) {
        self.state.lock().unwrap().fork_not_ready = polls;
    }

    // === Error injection ===

    /// Make `method` fail with HTTP `status`
    pub fn fail(&self, method: &'static str, status: u16) {
        self.failures.lock().unwrap().insert(method, status);
    }

    // === Verification ===

    /// All calls in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Method names of all calls in order
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(Call::name).collect()
    }

    /// Number of calls to `method`
    pub fn count(&self, method: &str) -> usize {
        self.call_names().iter().filter(|n| **n == method).count()
    }

    /// Commit SHA a branch points at
    pub fn branch_tip(&self, repo: &RepoId, branch: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .refs
            .get(&(repo.clone(), branch.to_string()))
            .cloned()
    }

    /// A stored commit
    pub fn commit(&self, sha: &str) -> StoredCommit {
        self.state.lock().unwrap().commits[sha].clone()
    }

    /// Files (path to content) at the tip of a branch
    pub fn files_at(&self, repo: &RepoId, branch: &str) -> BTreeMap<String, String> {
        let state = self.state.lock().unwrap();
        let sha = &state.refs[&(repo.clone(), branch.to_string())];
        state.trees[&state.commits[sha].tree].clone()
    }

    /// A stored pull request
    pub fn pull_request(&self, number: u64) -> Option<PullRequest> {
        self.state.lock().unwrap().pulls.get(&number).cloned()
    }

    fn enter(&self, call: Call) -> Result<()> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(name) {
            Some(status) => Err(Error::from_status(*status, format!("injected {name} failure"))),
            None => Ok(()),
        }
    }
}

fn copy_refs(state: &mut State, from: &RepoId, to: &RepoId) {
    let copied: Vec<((RepoId, String), String)> = state
        .refs
        .iter()
        .filter(|((repo, _), _)| repo == from)
        .map(|((_, branch), sha)| ((to.clone(), branch.clone()), sha.clone()))
        .collect();
    state.refs.extend(copied);
}

#[async_trait]
impl HostingService for MockHostingService {
    async fn current_user(&self) -> Result<String> {
        self.enter(Call::CurrentUser)?;
        Ok(self.login.clone())
    }

    async fn repo_exists(&self, repo: &RepoId) -> Result<bool> {
        self.enter(Call::RepoExists(repo.clone()))?;
        Ok(self.state.lock().unwrap().repos.contains(repo))
    }

    async fn create_fork(&self, upstream: &RepoId) -> Result<()> {
        self.enter(Call::CreateFork(upstream.clone()))?;
        let mut state = self.state.lock().unwrap();
        if !state.repos.contains(upstream) {
            return Err(not_found(upstream));
        }
        let fork = RepoId::new(&self.login, &upstream.name);
        copy_refs(&mut state, upstream, &fork);
        state.repos.insert(fork.clone());
        state.pending_fork = Some(fork);
        Ok(())
    }

    async fn branch_sha(&self, repo: &RepoId, branch: &str) -> Result<String> {
        self.enter(Call::BranchSha {
            repo: repo.clone(),
            branch: branch.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        if state.pending_fork.as_ref() == Some(repo) && state.fork_not_ready > 0 {
            state.fork_not_ready -= 1;
            return Err(not_found(format!("{repo} is still being created")));
        }
        state
            .refs
            .get(&(repo.clone(), branch.to_string()))
            .cloned()
            .ok_or_else(|| not_found(format!("{repo}:{branch}")))
    }

    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()> {
        self.enter(Call::CreateBranchRef {
            repo: repo.clone(),
            branch: branch.to_string(),
            sha: sha.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        let key = (repo.clone(), branch.to_string());
        if state.refs.contains_key(&key) {
            return Err(Error::from_status(422, "Reference already exists"));
        }
        state.refs.insert(key, sha.to_string());
        Ok(())
    }

    async fn update_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<()> {
        self.enter(Call::UpdateBranchRef {
            repo: repo.clone(),
            branch: branch.to_string(),
            sha: sha.to_string(),
            force,
        })?;
        let mut state = self.state.lock().unwrap();
        let key = (repo.clone(), branch.to_string());
        if !state.refs.contains_key(&key) {
            return Err(not_found(format!("{repo}:{branch}")));
        }
        state.refs.insert(key, sha.to_string());
        Ok(())
    }

    async fn get_commit(&self, _repo: &RepoId, sha: &str) -> Result<CommitRef> {
        self.enter(Call::GetCommit(sha.to_string()))?;
        let state = self.state.lock().unwrap();
        let commit = state.commits.get(sha).ok_or_else(|| not_found(sha))?;
        Ok(CommitRef {
            sha: sha.to_string(),
            tree_sha: commit.tree.clone(),
            parents: commit.parents.clone(),
        })
    }

    async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        changes: &[FileChange],
    ) -> Result<String> {
        self.enter(Call::CreateTree {
            repo: repo.clone(),
            base_tree: base_tree.to_string(),
            changes: changes.to_vec(),
        })?;
        let mut state = self.state.lock().unwrap();
        let mut tree = state
            .trees
            .get(base_tree)
            .cloned()
            .ok_or_else(|| not_found(base_tree))?;
        for change in changes {
            match change {
                FileChange::Write { path, content } => {
                    tree.insert(path.clone(), content.clone());
                }
                FileChange::Delete { path } => {
                    tree.remove(path);
                }
            }
        }
        let id = state.new_id("tree");
        state.trees.insert(id.clone(), tree);
        Ok(id)
    }

    async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<CommitRef> {
        self.enter(Call::CreateCommit {
            repo: repo.clone(),
            message: message.to_string(),
            parents: parents.to_vec(),
        })?;
        let mut state = self.state.lock().unwrap();
        if !state.trees.contains_key(tree_sha) {
            return Err(not_found(tree_sha));
        }
        let sha = state.new_id("commit");
        state.commits.insert(
            sha.clone(),
            StoredCommit {
                tree: tree_sha.to_string(),
                parents: parents.to_vec(),
                message: message.to_string(),
            },
        );
        Ok(CommitRef {
            sha,
            tree_sha: tree_sha.to_string(),
            parents: parents.to_vec(),
        })
    }

    async fn create_pull_request(
        &self,
        upstream: &RepoId,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.enter(Call::CreatePullRequest(pr.clone()))?;
        let mut state = self.state.lock().unwrap();
        let (owner, branch) = pr
            .head
            .split_once(':')
            .ok_or_else(|| Error::from_status(422, "head must be owner:branch"))?;
        let head_repo = RepoId::new(owner, &upstream.name);
        let head_sha = state
            .refs
            .get(&(head_repo.clone(), branch.to_string()))
            .cloned()
            .ok_or_else(|| Error::from_status(422, "head branch does not exist"))?;

        let number = state.next_pr;
        state.next_pr += 1;
        let created = PullRequest {
            number,
            html_url: format!("https://github.com/{upstream}/pull/{number}"),
            title: pr.title.clone(),
            body: pr.body.clone(),
            head_ref: branch.to_string(),
            head_sha,
            head_repo: Some(head_repo),
        };
        state.pulls.insert(number, created.clone());
        Ok(created)
    }

    async fn get_pull_request(&self, _upstream: &RepoId, number: u64) -> Result<PullRequest> {
        self.enter(Call::GetPullRequest(number))?;
        self.state
            .lock()
            .unwrap()
            .pulls
            .get(&number)
            .cloned()
            .ok_or_else(|| not_found(format!("pull request #{number}")))
    }

    async fn update_pull_request(
        &self,
        _upstream: &RepoId,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.enter(Call::UpdatePullRequest {
            number,
            title: title.to_string(),
            body: body.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        let pr = state
            .pulls
            .get_mut(&number)
            .ok_or_else(|| not_found(format!("pull request #{number}")))?;
        title.clone_into(&mut pr.title);
        body.clone_into(&mut pr.body);
        Ok(pr.clone())
    }

    async fn list_pull_request_files(
        &self,
        _upstream: &RepoId,
        number: u64,
    ) -> Result<Vec<PullRequestFile>> {
        self.enter(Call::ListPullRequestFiles(number))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .pull_files
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn file_content(&self, repo: &RepoId, path: &str, git_ref: &str) -> Result<String> {
        self.enter(Call::FileContent {
            repo: repo.clone(),
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        })?;
        let state = self.state.lock().unwrap();
        let sha = state
            .resolve(repo, git_ref)
            .ok_or_else(|| not_found(git_ref))?;
        let tree = &state.trees[&state.commits[&sha].tree];
        tree.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn list_directory(&self, _repo: &RepoId, path: &str) -> Result<Vec<ContentEntry>> {
        self.enter(Call::ListDirectory(path.to_string()))?;
        self.state
            .lock()
            .unwrap()
            .directories
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn download(&self, url: &str) -> Result<String> {
        self.enter(Call::Download(url.to_string()))?;
        self.state
            .lock()
            .unwrap()
            .downloads
            .get(url)
            .cloned()
            .ok_or_else(|| not_found(url))
    }
}
