//! Core types for taxonomy-contrib

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the taxonomy a contribution targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    /// Knowledge contribution (document-grounded Q&A)
    Knowledge,
    /// Compositional skill contribution
    Skill,
}

impl ContributionKind {
    /// Top-level taxonomy directory that receives this kind
    pub const fn top_dir(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Skill => "compositional_skills",
        }
    }

    /// Prefix for generated branch names
    pub const fn branch_prefix(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge-contribution-",
            Self::Skill => "skill-contribution-",
        }
    }

    /// Prefix for generated pull request titles
    pub const fn title_prefix(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge: ",
            Self::Skill => "Skill: ",
        }
    }
}

impl fmt::Display for ContributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knowledge => write!(f, "knowledge"),
            Self::Skill => write!(f, "skill"),
        }
    }
}

/// Contributor identity used for the sign-off trailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Declared full name
    pub name: String,
    /// Declared email address
    pub email: String,
}

/// Attribution metadata for the source material
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Title of the work
    #[serde(default)]
    pub title_of_work: String,
    /// Link to the work
    #[serde(default)]
    pub link_to_work: String,
    /// Revision (commit, edition, version)
    #[serde(default)]
    pub revision: String,
    /// License of the work
    #[serde(default)]
    pub license_of_the_work: String,
    /// Creator names
    #[serde(default)]
    pub creator_names: String,
}

/// A contribution ready to publish
///
/// Immutable once handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Knowledge or skill
    pub kind: ContributionKind,
    /// Who signs off on the commit
    pub author: Identity,
    /// One-line summary (commit subject and PR title)
    pub summary: String,
    /// Outline text (PR body)
    pub outline: String,
    /// Directory under the kind's top dir, e.g. `science/physics/`
    pub file_path: String,
    /// Structured YAML content of the qna file
    pub content: String,
    /// Attribution for the source material
    pub attribution: Attribution,
}

/// A repository on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a repository id
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Upstream taxonomy repository configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// The canonical taxonomy repository
    pub repo: RepoId,
    /// Branch pull requests target
    pub base_branch: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// A branch inside a fork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Repository holding the branch
    pub repo: RepoId,
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Commit the branch pointed at when it was created
    pub head_sha: String,
}

/// A git commit as reported by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// Commit SHA
    pub sha: String,
    /// Root tree SHA
    pub tree_sha: String,
    /// Parent commit SHAs
    pub parents: Vec<String>,
}

/// One path change layered on a base tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// Write a blob with the given text
    Write {
        /// Repository-relative path
        path: String,
        /// File contents
        content: String,
    },
    /// Remove the path from the tree
    Delete {
        /// Repository-relative path
        path: String,
    },
}

impl FileChange {
    /// Path affected by this change
    pub fn path(&self) -> &str {
        match self {
            Self::Write { path, .. } | Self::Delete { path } => path,
        }
    }
}

/// Parameters for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// PR title
    pub title: String,
    /// Head in `user:branch` form
    pub head: String,
    /// Base branch name in the upstream repository
    pub base: String,
    /// PR body
    pub body: String,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA
    pub head_sha: String,
    /// Repository holding the head branch (None when it was deleted)
    pub head_repo: Option<RepoId>,
}

/// A file touched by a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Repository-relative path
    pub filename: String,
    /// Change status (added, modified, removed, renamed)
    pub status: String,
}

/// Kind of a directory listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symlink or submodule
    Other,
}

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// Entry name
    pub name: String,
    /// Repository-relative path
    pub path: String,
    /// File, directory, or other
    pub kind: EntryKind,
    /// Raw download URL (files only)
    pub download_url: Option<String>,
}

/// Node kind in the rendered taxonomy tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Leaf file
    File,
    /// Directory
    Folder,
}

/// A node of the filtered taxonomy tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    /// Entry name
    pub name: String,
    /// Slash-prefixed path built from ancestor names
    pub path: String,
    /// File or folder
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Normalized YAML, raw text, or a placeholder for folders
    pub content: String,
    /// `created_by` of the file, or "unknown"
    pub author: String,
    /// Child nodes in listing order (folders only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaxonomyNode>,
}
