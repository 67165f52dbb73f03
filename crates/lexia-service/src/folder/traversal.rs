//! Iterative descendant traversal used by the cycle check.
//!
//! Walks the forest breadth-first, one `find_children` query per level,
//! inside the caller's transaction. Every folder is visited at most once,
//! and the walk stops early on cancellation, on the deadline, or when the
//! level guard trips.

use std::collections::HashSet;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use lexia_core::config::FolderConfig;
use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_core::types::FolderId;
use lexia_database::store::FolderTransaction;

/// Bounds for a single traversal.
#[derive(Debug, Clone)]
pub struct TraversalLimits {
    /// Absolute point in time after which the walk aborts.
    pub deadline: Instant,
    /// Maximum number of levels below the start folder.
    pub max_depth: usize,
}

impl TraversalLimits {
    /// Limits starting now, from configuration.
    pub fn from_config(config: &FolderConfig) -> Self {
        Self {
            deadline: Instant::now() + config.traversal_timeout(),
            max_depth: config.max_traversal_depth,
        }
    }
}

fn deadline_exceeded() -> AppError {
    AppError::cancelled("Folder traversal exceeded its deadline")
}

fn cancelled() -> AppError {
    AppError::cancelled("Folder traversal was cancelled")
}

/// Collects the full descendant set of `root` (excluding `root` itself).
pub async fn collect_descendants(
    tx: &mut dyn FolderTransaction,
    root: FolderId,
    limits: &TraversalLimits,
    cancel: &CancellationToken,
) -> AppResult<HashSet<FolderId>> {
    let mut visited: HashSet<FolderId> = HashSet::from([root]);
    let mut frontier = vec![root];
    let mut level = 0usize;

    while !frontier.is_empty() {
        if cancel.is_cancelled() {
            return Err(cancelled());
        }
        if Instant::now() >= limits.deadline {
            return Err(deadline_exceeded());
        }
        if level >= limits.max_depth {
            return Err(AppError::invalid_operation(format!(
                "Folder tree is deeper than {} levels",
                limits.max_depth
            )));
        }

        let children = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled()),
            res = tokio::time::timeout_at(limits.deadline, tx.find_children(&frontier)) => {
                res.map_err(|_| deadline_exceeded())??
            }
        };

        frontier = children
            .into_iter()
            .map(|f| f.id)
            .filter(|id| visited.insert(*id))
            .collect();
        level += 1;

        debug!(
            root = %root,
            level,
            discovered = frontier.len(),
            "Traversed folder level"
        );
    }

    visited.remove(&root);
    Ok(visited)
}
