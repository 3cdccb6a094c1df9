//! Structured-text documents written into the taxonomy
//!
//! Each contribution produces two files in one directory: a YAML data file
//! (`qna.yaml`) and a plain-text attribution file (`attribution.txt`).

mod attribution;
mod qna;

pub use attribution::{ATTRIBUTION_LABELS, parse_attribution, render_attribution};
pub use qna::TaxonomyDocument;

use crate::error::Result;
use crate::types::ContributionKind;

/// File name of the structured data file
pub const QNA_FILE: &str = "qna.yaml";

/// File name of the attribution file
pub const ATTRIBUTION_FILE: &str = "attribution.txt";

/// Author reported when a document carries no `created_by`
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Normalize a user-supplied directory
///
/// Strips leading slashes and guarantees exactly one trailing slash, so
/// the result can be concatenated directly with a file name. Blank input
/// yields an empty string.
pub fn normalize_dir(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/').trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

/// Split a repository path into (directory with trailing slash, file name)
pub fn split_path(path: &str) -> (String, &str) {
    match path.rsplit_once('/') {
        Some((dir, name)) => (normalize_dir(dir), name),
        None => (String::new(), path),
    }
}

/// Guess the contribution kind from a repository path
pub fn kind_for_path(path: &str) -> ContributionKind {
    if path.trim_start_matches('/').starts_with(ContributionKind::Knowledge.top_dir()) {
        ContributionKind::Knowledge
    } else {
        ContributionKind::Skill
    }
}

/// Parse arbitrary YAML text into a generic value
pub fn parse_yaml_value(text: &str) -> Result<serde_yaml::Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// Serialize a generic value back to normalized YAML text
pub fn to_yaml_string(value: &serde_yaml::Value) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Read a string `created_by` from a parsed YAML mapping
pub fn created_by(value: &serde_yaml::Value) -> Option<&str> {
    value.get("created_by").and_then(serde_yaml::Value::as_str)
}
