//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use lexia_core::types::FolderId;

use super::model::Folder;

/// A folder together with an eagerly loaded part of its subtree.
///
/// How deep `subfolders` goes is decided by whoever built the node; an
/// empty vector means "not loaded or no children", never "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// The folder itself.
    pub folder: Folder,
    /// Loaded child nodes.
    pub subfolders: Vec<FolderNode>,
}

impl FolderNode {
    /// Create a node without loaded children.
    pub fn leaf(folder: Folder) -> Self {
        Self {
            folder,
            subfolders: Vec::new(),
        }
    }

    /// The folder ID of this node.
    pub fn id(&self) -> FolderId {
        self.folder.id
    }

    /// Number of levels materialized below this node (0 for a leaf).
    pub fn loaded_depth(&self) -> usize {
        self.subfolders
            .iter()
            .map(|c| c.loaded_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        1 + self.subfolders.iter().map(FolderNode::len).sum::<usize>()
    }

    /// Always false; a node contains at least itself.
    pub fn is_empty(&self) -> bool {
        false
    }
}
