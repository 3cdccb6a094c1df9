//! Editing an open contribution
//!
//! Loads the files of an existing pull request back into structured form
//! and rewrites them through [`amend_pull_request`].

use crate::document::{TaxonomyDocument, kind_for_path, parse_attribution, split_path};
use crate::error::{Error, PublishFailure, Result};
use crate::platform::HostingService;
use crate::publish::{Phase, ProgressCallback, Titled, amend_pull_request, plan_amendment};
use crate::types::{
    Attribution, ContributionKind, Identity, PullRequest, PullRequestFile, RepoId, UpstreamConfig,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contribution loaded from its pull request
#[derive(Debug, Clone, PartialEq)]
pub struct EditableSubmission {
    /// The pull request being edited
    pub pull_request: PullRequest,
    /// Repository holding the head branch
    pub fork: RepoId,
    /// Kind inferred from the data file's location
    pub kind: ContributionKind,
    /// Repository-relative directory of the files, with trailing slash
    pub directory: String,
    /// Path of the data file
    pub yaml_path: String,
    /// Path of the attribution file
    pub attribution_path: String,
    /// Parsed data file
    pub document: TaxonomyDocument,
    /// Parsed attribution file
    pub attribution: Attribution,
}

/// Replacement values for an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    /// Who signs off on the amended commit
    pub author: Identity,
    /// New PR title (blank keeps the current one)
    #[serde(default)]
    pub title: String,
    /// New PR body (blank keeps the current one)
    #[serde(default)]
    pub body: String,
    /// Repository-relative target directory (blank keeps the current one)
    #[serde(default)]
    pub file_path: String,
    /// New data file YAML
    pub content: String,
    /// New attribution (absent keeps the current one)
    #[serde(default)]
    pub attribution: Option<Attribution>,
}

fn find_file<'a>(
    files: &'a [PullRequestFile],
    number: u64,
    what: &str,
    matches: impl Fn(&str) -> bool,
) -> Result<&'a PullRequestFile> {
    files
        .iter()
        .filter(|f| f.status != "removed")
        .find(|f| matches(&f.filename))
        .ok_or_else(|| Error::MissingFile(format!("pull request #{number} has no {what}")))
}

/// Load the contribution carried by pull request `number`
///
/// Both files are read from the head repository at the head commit.
pub async fn load_submission(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    number: u64,
) -> Result<EditableSubmission> {
    let pull_request = service.get_pull_request(&upstream.repo, number).await?;
    let files = service.list_pull_request_files(&upstream.repo, number).await?;
    debug!("pull request #{number} touches {} file(s)", files.len());

    let yaml = find_file(&files, number, "YAML file", |name| {
        name.ends_with(".yaml") || name.ends_with(".yml")
    })?;
    let attribution_file =
        find_file(&files, number, "attribution file", |name| name.contains("attribution"))?;

    let fork = pull_request.head_repo.clone().ok_or_else(|| {
        Error::NotFound(format!("head repository of pull request #{number}"))
    })?;

    let yaml_text = service
        .file_content(&fork, &yaml.filename, &pull_request.head_sha)
        .await?;
    let attribution_text = service
        .file_content(&fork, &attribution_file.filename, &pull_request.head_sha)
        .await?;

    let kind = kind_for_path(&yaml.filename);
    let document = TaxonomyDocument::parse(kind, &yaml_text)?;
    let (directory, _) = split_path(&yaml.filename);

    Ok(EditableSubmission {
        pull_request,
        fork,
        kind,
        directory,
        yaml_path: yaml.filename.clone(),
        attribution_path: attribution_file.filename.clone(),
        document,
        attribution: parse_attribution(&attribution_text),
    })
}

/// Rewrite a loaded contribution and its pull request
pub async fn update_submission(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    editable: &EditableSubmission,
    request: &EditRequest,
    progress: &dyn ProgressCallback,
) -> std::result::Result<PullRequest, PublishFailure> {
    let result = run_update(service, upstream, editable, request, progress).await;

    if let Err(failure) = &result {
        debug!("update of #{} failed: {failure}", editable.pull_request.number);
        progress.on_error(failure).await;
    }
    result
}

async fn run_update(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    editable: &EditableSubmission,
    request: &EditRequest,
    progress: &dyn ProgressCallback,
) -> std::result::Result<PullRequest, PublishFailure> {
    progress.on_phase(Phase::ResolvingUser).await;
    let login = service
        .current_user()
        .await
        .titled("Failed to fetch GitHub username")?;

    let plan = plan_amendment(editable, request, &login).titled("Invalid submission")?;

    progress.on_phase(Phase::UpdatingPullRequest).await;
    let pr = amend_pull_request(service, upstream, &plan)
        .await
        .titled("Failed to update pull request")?;
    progress.on_pr_updated(&pr).await;

    progress.on_phase(Phase::Complete).await;
    Ok(pr)
}
