//! Folder hierarchy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits applied by the folder tree manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Overall deadline for one descendant traversal, in milliseconds.
    #[serde(default = "default_traversal_timeout")]
    pub traversal_timeout_ms: u64,
    /// Maximum number of tree levels a traversal will walk.
    #[serde(default = "default_max_depth")]
    pub max_traversal_depth: usize,
}

impl FolderConfig {
    /// The traversal deadline as a [`Duration`].
    pub fn traversal_timeout(&self) -> Duration {
        Duration::from_millis(self.traversal_timeout_ms)
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            traversal_timeout_ms: default_traversal_timeout(),
            max_traversal_depth: default_max_depth(),
        }
    }
}

fn default_traversal_timeout() -> u64 {
    5_000
}

fn default_max_depth() -> usize {
    10_000
}
