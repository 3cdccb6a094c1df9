//! Test data factories for taxonomy-contrib types
//!
//! These are test utilities - not every factory is used by every test binary.

#![allow(dead_code)]

use taxonomy_contrib::types::{
    Attribution, ContentEntry, ContributionKind, EntryKind, Identity, PullRequest, RepoId,
    Submission, UpstreamConfig,
};

pub const LOGIN: &str = "ada";

pub const KNOWLEDGE_YAML: &str = "\
version: 3
domain: astronomy
document_outline: Facts about the Phoenix constellation
document:
  repo: https://github.com/ada/docs
  commit: 0123abc
  patterns:
    - phoenix.md
seed_examples:
  - context: Phoenix is a minor constellation in the southern sky.
    questions_and_answers:
      - question: Where is Phoenix?
        answer: In the southern sky.
";

pub const SKILL_YAML: &str = "\
task_description: Write haiku
seed_examples:
  - question: Write a haiku about rain
    answer: Soft rain on the roof
";

/// The upstream taxonomy repository
pub fn upstream_repo() -> RepoId {
    RepoId::new("instructlab", "taxonomy")
}

/// Upstream config targeting `main` on github.com
pub fn upstream() -> UpstreamConfig {
    UpstreamConfig {
        repo: upstream_repo(),
        base_branch: "main".to_string(),
        host: None,
    }
}

/// The contributor's fork of the upstream
pub fn fork_repo() -> RepoId {
    RepoId::new(LOGIN, "taxonomy")
}

pub fn identity() -> Identity {
    Identity {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn attribution() -> Attribution {
    Attribution {
        title_of_work: "Phoenix (constellation)".to_string(),
        link_to_work: "https://en.wikipedia.org/wiki/Phoenix_(constellation)".to_string(),
        revision: "1234".to_string(),
        license_of_the_work: "CC-BY-SA-4.0".to_string(),
        creator_names: "Wikipedia Authors".to_string(),
    }
}

/// A knowledge submission under `knowledge/<file_path>`
pub fn knowledge_submission(file_path: &str) -> Submission {
    Submission {
        kind: ContributionKind::Knowledge,
        author: identity(),
        summary: "Phoenix constellation".to_string(),
        outline: "Adds facts about the Phoenix constellation".to_string(),
        file_path: file_path.to_string(),
        content: KNOWLEDGE_YAML.to_string(),
        attribution: attribution(),
    }
}

/// A skill submission under `compositional_skills/<file_path>`
pub fn skill_submission(file_path: &str) -> Submission {
    Submission {
        kind: ContributionKind::Skill,
        author: identity(),
        summary: "Haiku writing".to_string(),
        outline: "Teaches haiku".to_string(),
        file_path: file_path.to_string(),
        content: SKILL_YAML.to_string(),
        attribution: Attribution::default(),
    }
}

/// An open pull request whose head lives in the contributor's fork
pub fn make_pr(number: u64, head_ref: &str, head_sha: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/instructlab/taxonomy/pull/{number}"),
        title: "Knowledge: Phoenix constellation".to_string(),
        body: "Adds facts about the Phoenix constellation".to_string(),
        head_ref: head_ref.to_string(),
        head_sha: head_sha.to_string(),
        head_repo: Some(fork_repo()),
    }
}

pub fn dir_entry(path: &str) -> ContentEntry {
    ContentEntry {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        kind: EntryKind::Dir,
        download_url: None,
    }
}

/// A file entry downloadable from `raw://<path>`
pub fn file_entry(path: &str) -> ContentEntry {
    ContentEntry {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("raw://{path}")),
    }
}
