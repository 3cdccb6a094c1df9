//! Plain-text rendering of a taxonomy tree

use crate::types::{NodeKind, TaxonomyNode};
use std::fmt::Write;

/// Render nodes as an indented outline
///
/// Folders end with `/`; files show their author in parentheses.
pub fn render_text_tree(nodes: &[TaxonomyNode]) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&TaxonomyNode, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let _ = match node.kind {
            NodeKind::Folder => writeln!(out, "{indent}{}/", node.name),
            NodeKind::File => writeln!(out, "{indent}{} ({})", node.name, node.author),
        };
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }

    out
}
