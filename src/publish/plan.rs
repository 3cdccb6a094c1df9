//! Publish planning
//!
//! Pure construction of everything a workflow writes: branch name, file
//! paths and contents, commit message, pull request title and body. Nothing
//! here talks to the hosting service.

use crate::document::{
    ATTRIBUTION_FILE, QNA_FILE, TaxonomyDocument, normalize_dir, render_attribution, split_path,
};
use crate::error::Result;
use crate::publish::{EditRequest, EditableSubmission};
use crate::types::{ContributionKind, FileChange, Identity, RepoId, Submission};

/// Commit subject used when an existing contribution is rewritten
pub const AMEND_SUBJECT: &str = "Amend commit with updated content";

/// Everything a new submission writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Contribution kind
    pub kind: ContributionKind,
    /// Branch created in the fork
    pub branch_name: String,
    /// The two blobs of the commit (data file, then attribution)
    pub files: Vec<FileChange>,
    /// Commit message ending with the sign-off line
    pub commit_message: String,
    /// Pull request title
    pub title: String,
    /// Pull request body
    pub body: String,
}

/// Everything an edit rewrites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendPlan {
    /// Pull request number in the upstream repository
    pub number: u64,
    /// Repository holding the head branch
    pub fork: RepoId,
    /// Head branch of the pull request
    pub branch: String,
    /// New pull request title
    pub title: String,
    /// New pull request body
    pub body: String,
    /// Deletions of moved paths followed by the new contents
    pub changes: Vec<FileChange>,
    /// Commit message ending with the sign-off line
    pub commit_message: String,
}

/// Branch name for a submission created at `timestamp_millis`
pub fn branch_name(kind: ContributionKind, timestamp_millis: i64) -> String {
    format!("{}{timestamp_millis}", kind.branch_prefix())
}

/// `Signed-off-by` trailer for an identity
pub fn sign_off(author: &Identity) -> String {
    format!(
        "Signed-off-by: {} <{}>",
        author.name.trim(),
        author.email.trim()
    )
}

/// Commit message with a sign-off trailer as its last line
pub fn commit_message(subject: &str, author: &Identity) -> String {
    format!("{}\n\n{}", subject.trim(), sign_off(author))
}

/// Repository paths of the data and attribution files of a new submission
pub fn submission_paths(kind: ContributionKind, file_path: &str) -> (String, String) {
    let dir = format!("{}/{}", kind.top_dir(), normalize_dir(file_path));
    (format!("{dir}{QNA_FILE}"), format!("{dir}{ATTRIBUTION_FILE}"))
}

/// Plan a new submission
///
/// The data file is parsed as a YAML mapping and re-serialized; an empty
/// `created_by` is filled with `login`.
pub fn plan_submission(
    submission: &Submission,
    login: &str,
    timestamp_millis: i64,
) -> Result<PublishPlan> {
    let kind = submission.kind;

    let mut document = TaxonomyDocument::parse(kind, &submission.content)?;
    if document.created_by().trim().is_empty() {
        document.set_created_by(login);
    }

    let (yaml_path, attribution_path) = submission_paths(kind, &submission.file_path);

    Ok(PublishPlan {
        kind,
        branch_name: branch_name(kind, timestamp_millis),
        files: vec![
            FileChange::Write {
                path: yaml_path,
                content: document.to_yaml()?,
            },
            FileChange::Write {
                path: attribution_path,
                content: render_attribution(&submission.attribution),
            },
        ],
        commit_message: commit_message(&submission.summary, &submission.author),
        title: format!("{}{}", kind.title_prefix(), submission.summary.trim()),
        body: submission.outline.clone(),
    })
}

/// Changes that move `old_paths` to the paths in `files`
///
/// Old paths not rewritten by `files` are deleted in the same commit.
pub fn amend_changes(old_paths: &[String], files: Vec<(String, String)>) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = old_paths
        .iter()
        .filter(|old| !files.iter().any(|(path, _)| path == *old))
        .map(|path| FileChange::Delete { path: path.clone() })
        .collect();

    changes.extend(
        files
            .into_iter()
            .map(|(path, content)| FileChange::Write { path, content }),
    );
    changes
}

/// Plan the rewrite of a loaded submission
///
/// `created_by` is always set to `login`. A blank directory keeps the files
/// where they are; blank title or body keep the current pull request text.
/// Without a new attribution the loaded one is written back.
pub fn plan_amendment(
    editable: &EditableSubmission,
    request: &EditRequest,
    login: &str,
) -> Result<AmendPlan> {
    let mut document = TaxonomyDocument::parse(editable.kind, &request.content)?;
    document.set_created_by(login);

    let directory = if request.file_path.trim().is_empty() {
        editable.directory.clone()
    } else {
        normalize_dir(&request.file_path)
    };
    let (_, yaml_name) = split_path(&editable.yaml_path);
    let (_, attribution_name) = split_path(&editable.attribution_path);

    let files = vec![
        (format!("{directory}{yaml_name}"), document.to_yaml()?),
        (
            format!("{directory}{attribution_name}"),
            render_attribution(
                request
                    .attribution
                    .as_ref()
                    .unwrap_or(&editable.attribution),
            ),
        ),
    ];
    let old_paths = [
        editable.yaml_path.clone(),
        editable.attribution_path.clone(),
    ];

    let pr = &editable.pull_request;
    let keep_or = |new: &str, current: &str| {
        if new.trim().is_empty() {
            current.to_string()
        } else {
            new.to_string()
        }
    };

    Ok(AmendPlan {
        number: pr.number,
        fork: editable.fork.clone(),
        branch: pr.head_ref.clone(),
        title: keep_or(&request.title, &pr.title),
        body: keep_or(&request.body, &pr.body),
        changes: amend_changes(&old_paths, files),
        commit_message: commit_message(AMEND_SUBJECT, &request.author),
    })
}
