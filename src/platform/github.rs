//! GitHub hosting service implementation

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::{
    CommitRef, ContentEntry, EntryKind, FileChange, NewPullRequest, PullRequest, PullRequestFile,
    RepoId,
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use http::header::HeaderName;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// REST API version pinned on every request
pub const API_VERSION: &str = "2022-11-28";

/// Timeout for raw file downloads
const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Page size for paginated listings
const PAGE_SIZE: usize = 100;

/// Mode for regular (non-executable) blobs
const BLOB_MODE: &str = "100644";

/// GitHub service using octocrab for the REST API and reqwest for raw downloads
pub struct GitHubService {
    client: Octocrab,
    http: reqwest::Client,
    credential: Credential,
}

#[derive(Deserialize)]
struct RefResponse {
    object: ShaOnly,
}

#[derive(Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
    tree: ShaOnly,
    #[serde(default)]
    parents: Vec<ShaOnly>,
}

impl From<CommitResponse> for CommitRef {
    fn from(c: CommitResponse) -> Self {
        Self {
            sha: c.sha,
            tree_sha: c.tree.sha,
            parents: c.parents.into_iter().map(|p| p.sha).collect(),
        }
    }
}

#[derive(Deserialize)]
struct Login {
    login: String,
}

#[derive(Deserialize)]
struct HeadRepo {
    name: String,
    owner: Login,
}

#[derive(Deserialize)]
struct PullHead {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
    repo: Option<HeadRepo>,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
    #[serde(default)]
    title: String,
    body: Option<String>,
    head: PullHead,
}

impl From<PullResponse> for PullRequest {
    fn from(pr: PullResponse) -> Self {
        Self {
            number: pr.number,
            html_url: pr.html_url,
            title: pr.title,
            body: pr.body.unwrap_or_default(),
            head_ref: pr.head.ref_name,
            head_sha: pr.head.sha,
            head_repo: pr.head.repo.map(|r| RepoId::new(r.owner.login, r.name)),
        }
    }
}

#[derive(Deserialize)]
struct PullFileResponse {
    filename: String,
    status: String,
}

#[derive(Deserialize)]
struct ContentsFile {
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

impl From<ContentsEntry> for ContentEntry {
    fn from(entry: ContentsEntry) -> Self {
        let kind = match entry.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        };
        Self {
            name: entry.name,
            path: entry.path,
            kind,
            download_url: entry.download_url,
        }
    }
}

#[derive(Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

#[derive(Serialize)]
struct RefParam<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

/// Percent-encode each segment of a slash-separated path
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn repo_route(repo: &RepoId, rest: &str) -> String {
    format!(
        "/repos/{}/{}{rest}",
        urlencoding::encode(&repo.owner),
        urlencoding::encode(&repo.name)
    )
}

fn tree_entry(change: &FileChange) -> serde_json::Value {
    match change {
        FileChange::Write { path, content } => json!({
            "path": path,
            "mode": BLOB_MODE,
            "type": "blob",
            "content": content,
        }),
        FileChange::Delete { path } => json!({
            "path": path,
            "mode": BLOB_MODE,
            "type": "blob",
            "sha": null,
        }),
    }
}

impl GitHubService {
    /// Create a service for github.com or a GitHub Enterprise host
    pub fn new(credential: &Credential, host: Option<&str>) -> Result<Self> {
        let base_url = host.map(|h| format!("https://{h}/api/v3"));
        Self::build(credential, base_url.as_deref())
    }

    /// Create a service against an explicit API base URL
    pub fn with_base_url(credential: &Credential, base_url: &str) -> Result<Self> {
        Self::build(credential, Some(base_url))
    }

    fn build(credential: &Credential, base_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .personal_token(credential.token().to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                API_VERSION.to_string(),
            );

        if let Some(url) = base_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| Error::Config(format!("invalid GitHub API URL {url}: {e}")))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to build GitHub client: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .user_agent(concat!("taxonomy-contrib/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            http,
            credential: credential.clone(),
        })
    }
}

#[async_trait]
impl HostingService for GitHubService {
    async fn current_user(&self) -> Result<String> {
        let user = self.client.current().user().await?;
        Ok(user.login)
    }

    async fn repo_exists(&self, repo: &RepoId) -> Result<bool> {
        debug!("checking repository {repo}");
        let response: octocrab::Result<serde_json::Value> =
            self.client.get(repo_route(repo, ""), None::<&()>).await;

        match response.map_err(Error::from) {
            Ok(_) => Ok(true),
            Err(Error::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_fork(&self, upstream: &RepoId) -> Result<()> {
        debug!("forking {upstream}");
        let _: serde_json::Value = self
            .client
            .post(repo_route(upstream, "/forks"), None::<&()>)
            .await?;
        Ok(())
    }

    async fn branch_sha(&self, repo: &RepoId, branch: &str) -> Result<String> {
        let route = repo_route(repo, &format!("/git/ref/heads/{}", encode_path(branch)));
        let reference: RefResponse = self.client.get(route, None::<&()>).await?;
        Ok(reference.object.sha)
    }

    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()> {
        debug!("creating branch {branch} in {repo} at {sha}");
        let body = json!({ "ref": format!("refs/heads/{branch}"), "sha": sha });
        let _: serde_json::Value = self
            .client
            .post(repo_route(repo, "/git/refs"), Some(&body))
            .await?;
        Ok(())
    }

    async fn update_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<()> {
        debug!("moving {branch} in {repo} to {sha} (force: {force})");
        let route = repo_route(repo, &format!("/git/refs/heads/{}", encode_path(branch)));
        let body = json!({ "sha": sha, "force": force });
        let _: serde_json::Value = self.client.patch(route, Some(&body)).await?;
        Ok(())
    }

    async fn get_commit(&self, repo: &RepoId, sha: &str) -> Result<CommitRef> {
        let route = repo_route(repo, &format!("/git/commits/{sha}"));
        let commit: CommitResponse = self.client.get(route, None::<&()>).await?;
        Ok(commit.into())
    }

    async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        changes: &[FileChange],
    ) -> Result<String> {
        debug!("creating tree on {base_tree} with {} change(s)", changes.len());
        let body = json!({
            "base_tree": base_tree,
            "tree": changes.iter().map(tree_entry).collect::<Vec<_>>(),
        });
        let tree: ShaOnly = self
            .client
            .post(repo_route(repo, "/git/trees"), Some(&body))
            .await?;
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<CommitRef> {
        let body = json!({ "message": message, "tree": tree_sha, "parents": parents });
        let commit: CommitResponse = self
            .client
            .post(repo_route(repo, "/git/commits"), Some(&body))
            .await?;
        Ok(commit.into())
    }

    async fn create_pull_request(
        &self,
        upstream: &RepoId,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        debug!("opening pull request {} -> {upstream}:{}", pr.head, pr.base);
        let created: PullResponse = self
            .client
            .post(repo_route(upstream, "/pulls"), Some(pr))
            .await?;
        Ok(created.into())
    }

    async fn get_pull_request(&self, upstream: &RepoId, number: u64) -> Result<PullRequest> {
        let pr: PullResponse = self
            .client
            .get(repo_route(upstream, &format!("/pulls/{number}")), None::<&()>)
            .await?;
        Ok(pr.into())
    }

    async fn update_pull_request(
        &self,
        upstream: &RepoId,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let payload = json!({ "title": title, "body": body });
        let pr: PullResponse = self
            .client
            .patch(repo_route(upstream, &format!("/pulls/{number}")), Some(&payload))
            .await?;
        Ok(pr.into())
    }

    async fn list_pull_request_files(
        &self,
        upstream: &RepoId,
        number: u64,
    ) -> Result<Vec<PullRequestFile>> {
        let route = repo_route(upstream, &format!("/pulls/{number}/files"));
        let mut files = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: PAGE_SIZE,
                page,
            };
            let batch: Vec<PullFileResponse> = self.client.get(&route, Some(&params)).await?;
            let done = batch.len() < PAGE_SIZE;
            files.extend(batch.into_iter().map(|f| PullRequestFile {
                filename: f.filename,
                status: f.status,
            }));
            if done {
                break;
            }
            page += 1;
        }

        Ok(files)
    }

    async fn file_content(&self, repo: &RepoId, path: &str, git_ref: &str) -> Result<String> {
        let route = repo_route(repo, &format!("/contents/{}", encode_path(path)));
        let file: ContentsFile = self
            .client
            .get(route, Some(&RefParam { git_ref }))
            .await?;

        if file.encoding != "base64" {
            return Ok(file.content);
        }

        let compact: String = file.content.split_whitespace().collect();
        let bytes = BASE64
            .decode(compact)
            .map_err(|e| Error::InvalidDocument(format!("{path}: bad base64 content: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::InvalidDocument(format!("{path}: not UTF-8: {e}")))
    }

    async fn list_directory(&self, repo: &RepoId, path: &str) -> Result<Vec<ContentEntry>> {
        let encoded = encode_path(path);
        let route = if encoded.is_empty() {
            repo_route(repo, "/contents")
        } else {
            repo_route(repo, &format!("/contents/{encoded}"))
        };
        let entries: Vec<ContentsEntry> = self.client.get(route, None::<&()>).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn download(&self, url: &str) -> Result<String> {
        let text = self
            .http
            .get(url)
            .bearer_auth(self.credential.token())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}
