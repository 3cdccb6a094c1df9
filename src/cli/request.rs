//! Request files for `submit` and `edit`
//!
//! YAML (or JSON) files describing a contribution. The `content` field may
//! be the data file as a string or written inline as a mapping:
//!
//! ```yaml
//! kind: skill
//! author: { name: Ada Lovelace, email: ada@example.com }
//! summary: Haiku writing
//! outline: Teaches the model to write haiku
//! file_path: writing/poetry/haiku
//! content:
//!   task_description: Write haiku
//!   seed_examples:
//!     - question: Write a haiku about rain
//!       answer: Soft rain on the roof
//! attribution:
//!   title_of_work: Haiku
//!   creator_names: Ada Lovelace
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use taxonomy_contrib::document::to_yaml_string;
use taxonomy_contrib::error::{Error, Result};
use taxonomy_contrib::publish::EditRequest;
use taxonomy_contrib::types::{Attribution, ContributionKind, Identity, Submission};

#[derive(Deserialize)]
struct SubmissionFile {
    kind: ContributionKind,
    author: Identity,
    summary: String,
    #[serde(default)]
    outline: String,
    file_path: String,
    content: Value,
    #[serde(default)]
    attribution: Attribution,
}

#[derive(Deserialize)]
struct EditFile {
    author: Identity,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    file_path: String,
    content: Value,
    #[serde(default)]
    attribution: Option<Attribution>,
}

fn content_text(value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Mapping(_) => to_yaml_string(&value),
        _ => Err(Error::InvalidDocument(
            "content must be YAML text or a mapping".to_string(),
        )),
    }
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    serde_yaml::from_str(&text)
        .map_err(|e| Error::InvalidDocument(format!("{}: {e}", path.display())))
}

/// Parse a new-submission request
pub fn parse_submission(text: &str) -> Result<Submission> {
    let file: SubmissionFile = serde_yaml::from_str(text)?;
    submission_from(file)
}

/// Read a new-submission request file
pub fn read_submission(path: &Path) -> Result<Submission> {
    let text = fs::read_to_string(path)?;
    parse_submission(&text).map_err(|e| match e {
        Error::InvalidDocument(msg) => {
            Error::InvalidDocument(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

fn submission_from(file: SubmissionFile) -> Result<Submission> {
    Ok(Submission {
        kind: file.kind,
        author: file.author,
        summary: file.summary,
        outline: file.outline,
        file_path: file.file_path,
        content: content_text(file.content)?,
        attribution: file.attribution,
    })
}

/// Read an edit request file
pub fn read_edit_request(path: &Path) -> Result<EditRequest> {
    let file: EditFile = read_file(path)?;
    Ok(EditRequest {
        author: file.author,
        title: file.title,
        body: file.body,
        file_path: file.file_path,
        content: content_text(file.content)?,
        attribution: file.attribution,
    })
}
