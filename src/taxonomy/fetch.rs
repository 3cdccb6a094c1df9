//! Worklist-driven taxonomy walk

use crate::document::{UNKNOWN_AUTHOR, created_by, parse_yaml_value, to_yaml_string};
use crate::error::Result;
use crate::platform::HostingService;
use crate::taxonomy::{FOLDER_CONTENT, TreeFilter};
use crate::types::{ContentEntry, EntryKind, NodeKind, TaxonomyNode, UpstreamConfig};
use tracing::debug;

struct Slot {
    node: Option<TaxonomyNode>,
    parent: Option<usize>,
}

struct PendingDir {
    repo_path: String,
    depth: usize,
    slot: Option<usize>,
}

/// Normalized YAML and author of a downloaded file, or the raw text
fn describe_file(text: String) -> (String, String) {
    match parse_yaml_value(&text) {
        Ok(value) => {
            let author = created_by(&value).unwrap_or(UNKNOWN_AUTHOR).to_string();
            let content = to_yaml_string(&value).unwrap_or(text);
            (content, author)
        }
        Err(e) => {
            debug!("keeping raw content: {e}");
            (text, UNKNOWN_AUTHOR.to_string())
        }
    }
}

async fn file_text(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    entry: &ContentEntry,
) -> Result<String> {
    match &entry.download_url {
        Some(url) => service.download(url).await,
        None => {
            service
                .file_content(&upstream.repo, &entry.path, &upstream.base_branch)
                .await
        }
    }
}

/// Fetch the filtered taxonomy below `path` (`""` for the root)
///
/// Directories are listed one at a time from an explicit worklist. Entries
/// failing `filter` are dropped, files are downloaded and normalized, and
/// folders deeper than `max_depth` are kept but not expanded. Any request
/// failure aborts the whole walk.
pub async fn fetch_subtree(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    path: &str,
    filter: &TreeFilter,
    max_depth: Option<usize>,
) -> Result<Vec<TaxonomyNode>> {
    let root = path.trim_matches('/');
    let mut slots: Vec<Slot> = Vec::new();
    let mut worklist = vec![PendingDir {
        repo_path: root.to_string(),
        depth: 0,
        slot: None,
    }];

    while let Some(dir) = worklist.pop() {
        debug!("listing {}/{}", upstream.repo, dir.repo_path);
        let entries = service.list_directory(&upstream.repo, &dir.repo_path).await?;

        let prefix = match dir.slot.and_then(|i| slots[i].node.as_ref()) {
            Some(parent) => parent.path.clone(),
            None if root.is_empty() => String::new(),
            None => format!("/{root}"),
        };

        for entry in entries {
            if !filter.keeps(&entry.path) {
                continue;
            }

            let node_path = format!("{prefix}/{}", entry.name);
            let node = match entry.kind {
                EntryKind::Dir => {
                    if max_depth.is_none_or(|max| dir.depth < max) {
                        worklist.push(PendingDir {
                            repo_path: entry.path.clone(),
                            depth: dir.depth + 1,
                            slot: Some(slots.len()),
                        });
                    }
                    TaxonomyNode {
                        name: entry.name,
                        path: node_path,
                        kind: NodeKind::Folder,
                        content: FOLDER_CONTENT.to_string(),
                        author: UNKNOWN_AUTHOR.to_string(),
                        children: Vec::new(),
                    }
                }
                EntryKind::File => {
                    let text = file_text(service, upstream, &entry).await?;
                    let (content, author) = describe_file(text);
                    TaxonomyNode {
                        name: entry.name,
                        path: node_path,
                        kind: NodeKind::File,
                        content,
                        author,
                        children: Vec::new(),
                    }
                }
                EntryKind::Other => {
                    debug!("skipping {}", entry.path);
                    continue;
                }
            };

            slots.push(Slot {
                node: Some(node),
                parent: dir.slot,
            });
        }
    }

    Ok(assemble(slots))
}

/// Nest arena slots under their parents, preserving listing order
///
/// Children always sit at higher indices than their parent, so a reverse
/// sweep completes every child before its parent is moved.
fn assemble(mut slots: Vec<Slot>) -> Vec<TaxonomyNode> {
    let mut roots = Vec::new();

    for i in (0..slots.len()).rev() {
        let Some(mut node) = slots[i].node.take() else {
            continue;
        };
        node.children.reverse();

        match slots[i].parent {
            Some(p) => {
                if let Some(parent) = slots[p].node.as_mut() {
                    parent.children.push(node);
                }
            }
            None => roots.push(node),
        }
    }

    roots.reverse();
    roots
}
