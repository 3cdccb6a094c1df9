//! The `qna.yaml` data file of a contribution
//!
//! Content is held as a generic YAML mapping. Nothing is checked beyond
//! well-formedness, so every key the contributor wrote (at any depth)
//! survives a parse/serialize cycle untouched. Only `created_by` is ever
//! written.

use crate::error::{Error, Result};
use crate::types::ContributionKind;
use serde_yaml::{Mapping, Value};

const CREATED_BY: &str = "created_by";

/// A parsed `qna.yaml` of either kind
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyDocument {
    kind: ContributionKind,
    root: Mapping,
}

impl TaxonomyDocument {
    /// Parse YAML text whose top level is a mapping
    pub fn parse(kind: ContributionKind, text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| Error::InvalidDocument(format!("{kind} qna.yaml: {e}")))?;

        match value {
            Value::Mapping(root) => Ok(Self { kind, root }),
            _ => Err(Error::InvalidDocument(format!(
                "{kind} qna.yaml: top level must be a mapping"
            ))),
        }
    }

    /// Contribution kind of this document
    pub const fn kind(&self) -> ContributionKind {
        self.kind
    }

    /// Recorded contributor login, empty when absent or not a string
    pub fn created_by(&self) -> &str {
        self.root
            .get(CREATED_BY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Record the contributor login
    ///
    /// An existing key is overwritten where it stands; otherwise the key is
    /// placed first.
    pub fn set_created_by(&mut self, login: &str) {
        let login = Value::String(login.to_string());
        if let Some(slot) = self.root.get_mut(CREATED_BY) {
            *slot = login;
            return;
        }

        let mut root = Mapping::with_capacity(self.root.len() + 1);
        root.insert(Value::String(CREATED_BY.to_string()), login);
        root.extend(std::mem::take(&mut self.root));
        self.root = root;
    }

    /// Number of entries under `seed_examples`
    pub fn seed_example_count(&self) -> usize {
        self.root
            .get("seed_examples")
            .and_then(Value::as_sequence)
            .map_or(0, Vec::len)
    }

    /// Domain (knowledge) or task description (skill), empty when absent
    pub fn headline(&self) -> &str {
        let key = match self.kind {
            ContributionKind::Knowledge => "domain",
            ContributionKind::Skill => "task_description",
        };
        self.root
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Serialize to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWLEDGE: &str = r"
created_by: alice
version: 3
domain: astronomy
document_outline: Facts about the Phoenix constellation
document:
  repo: https://github.com/alice/docs
  commit: abc123
  patterns:
    - phoenix.md
seed_examples:
  - context: Phoenix is a minor constellation.
    questions_and_answers:
      - question: What is Phoenix?
        answer: A minor constellation.
";

    const SKILL: &str = r"
task_description: Write haiku
seed_examples:
  - question: Write a haiku about rain
    answer: Soft rain on the roof
";

    #[test]
    fn test_parse_knowledge() {
        let doc = TaxonomyDocument::parse(ContributionKind::Knowledge, KNOWLEDGE).unwrap();
        assert_eq!(doc.kind(), ContributionKind::Knowledge);
        assert_eq!(doc.created_by(), "alice");
        assert_eq!(doc.headline(), "astronomy");
        assert_eq!(doc.seed_example_count(), 1);
    }

    #[test]
    fn test_set_created_by_goes_first() {
        let mut doc = TaxonomyDocument::parse(ContributionKind::Skill, SKILL).unwrap();
        assert!(doc.created_by().is_empty());
        doc.set_created_by("bob");
        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.starts_with("created_by: bob\n"));
        assert!(!yaml.contains("context"));
        assert!(!yaml.contains("version"));
    }

    #[test]
    fn test_set_created_by_overwrites_in_place() {
        let mut doc =
            TaxonomyDocument::parse(ContributionKind::Skill, "version: 3\ncreated_by: carol\n")
                .unwrap();
        doc.set_created_by("bob");
        assert_eq!(doc.to_yaml().unwrap(), "version: 3\ncreated_by: bob\n");
    }

    #[test]
    fn test_nested_unknown_keys_survive() {
        let text = "\
version: '3'
seed_examples:
  - context: c
    questions_and_answers: []
    note: keep me
document:
  repo: r
  branch: draft
";
        let doc = TaxonomyDocument::parse(ContributionKind::Knowledge, text).unwrap();
        let yaml = doc.to_yaml().unwrap();

        let original: Value = serde_yaml::from_str(text).unwrap();
        let reparsed: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(original, reparsed);
        assert!(!yaml.contains("document_outline"));
        assert!(!yaml.contains("patterns"));
    }

    #[test]
    fn test_loose_values_are_accepted() {
        let text = "seed_examples:\n  - question: q without an answer\n";
        let doc = TaxonomyDocument::parse(ContributionKind::Skill, text).unwrap();
        assert_eq!(doc.seed_example_count(), 1);
        assert_eq!(doc.headline(), "");
    }

    #[test]
    fn test_malformed_yaml_is_invalid_document() {
        let err = TaxonomyDocument::parse(ContributionKind::Knowledge, "domain: [unclosed")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_non_mapping_is_invalid_document() {
        let err = TaxonomyDocument::parse(ContributionKind::Knowledge, "- just\n- a list\n")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }
}
