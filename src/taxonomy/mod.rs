//! Read-only view of the upstream taxonomy
//!
//! Walks the repository through the contents API and returns a filtered
//! tree of [`TaxonomyNode`](crate::types::TaxonomyNode)s.

mod fetch;
mod render;

pub use fetch::fetch_subtree;
pub use render::render_text_tree;

/// Content placed on folder nodes
pub const FOLDER_CONTENT: &str = "No content";

/// Path filter applied to every listed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFilter {
    /// An entry is kept only if its path contains one of these
    pub allowed: Vec<String>,
    /// An entry is dropped if its path contains any of these
    pub excluded: Vec<String>,
}

impl Default for TreeFilter {
    fn default() -> Self {
        Self {
            allowed: ["compositional_skills", "foundational_skills", "knowledge"]
                .map(String::from)
                .to_vec(),
            excluded: [".gitignore", ".md"].map(String::from).to_vec(),
        }
    }
}

impl TreeFilter {
    /// Whether an entry at `path` belongs in the tree
    pub fn keeps(&self, path: &str) -> bool {
        self.allowed.iter().any(|a| path.contains(a.as_str()))
            && !self.excluded.iter().any(|e| path.contains(e.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = TreeFilter::default();
        assert!(filter.keeps("knowledge"));
        assert!(filter.keeps("compositional_skills/writing/qna.yaml"));
        assert!(filter.keeps("foundational_skills/reasoning"));
        assert!(!filter.keeps("docs"));
        assert!(!filter.keeps("README.md"));
        assert!(!filter.keeps("knowledge/README.md"));
        assert!(!filter.keeps("knowledge/.gitignore"));
    }

    #[test]
    fn test_custom_filter() {
        let filter = TreeFilter {
            allowed: vec!["skills".to_string()],
            excluded: Vec::new(),
        };
        assert!(filter.keeps("compositional_skills/notes.md"));
        assert!(!filter.keeps("knowledge"));
    }
}
