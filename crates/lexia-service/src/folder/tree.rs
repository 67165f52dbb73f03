//! Depth-bounded folder tree loading.

use std::collections::{HashMap, HashSet};

use lexia_core::result::AppResult;
use lexia_core::types::FolderId;
use lexia_database::store::FolderStore;
use lexia_entity::folder::{Folder, FolderNode};

/// Materializes `depth` levels of subfolders below each of `tops`.
///
/// Issues one `find_children` query per level. `depth == 0` returns leaves.
/// A folder may appear both in `tops` and below another top.
pub async fn load_subtrees(
    store: &dyn FolderStore,
    tops: Vec<Folder>,
    depth: usize,
) -> AppResult<Vec<FolderNode>> {
    let mut children_of: HashMap<FolderId, Vec<Folder>> = HashMap::new();
    let mut expanded: HashSet<FolderId> = tops.iter().map(|f| f.id).collect();
    let mut frontier: Vec<FolderId> = tops.iter().map(|f| f.id).collect();

    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let children = store.find_children(&frontier).await?;
        let mut next = Vec::with_capacity(children.len());
        for child in children {
            let Some(parent_id) = child.parent_id else {
                continue;
            };
            if expanded.insert(child.id) {
                next.push(child.id);
            }
            children_of.entry(parent_id).or_default().push(child);
        }
        frontier = next;
    }

    Ok(tops
        .into_iter()
        .map(|folder| assemble(folder, &children_of, depth))
        .collect())
}

fn assemble(folder: Folder, children_of: &HashMap<FolderId, Vec<Folder>>, depth: usize) -> FolderNode {
    let subfolders = match (depth, children_of.get(&folder.id)) {
        (0, _) | (_, None) => Vec::new(),
        (_, Some(children)) => children
            .iter()
            .cloned()
            .map(|child| assemble(child, children_of, depth - 1))
            .collect(),
    };
    FolderNode { folder, subfolders }
}
