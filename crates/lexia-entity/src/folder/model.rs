//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lexia_core::types::{FolderId, UserId};

use super::kind::FolderKind;
use super::language::Language;

/// A folder in a user's vocabulary forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name (never empty).
    pub name: String,
    /// What the folder may contain. Fixed at creation.
    pub kind: FolderKind,
    /// Denormalized number of words stored directly in this folder.
    pub word_count: i32,
    /// Source language (word collections only).
    pub language_from: Option<Language>,
    /// Target language (word collections only, optional).
    pub language_to: Option<Language>,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// The owning user.
    pub owner_id: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether `user_id` owns this folder.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Whether any words are stored in this folder.
    pub fn has_words(&self) -> bool {
        self.word_count > 0
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Folder kind.
    pub kind: FolderKind,
    /// Source language.
    pub language_from: Option<Language>,
    /// Target language.
    pub language_to: Option<Language>,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// The folder owner.
    pub owner_id: UserId,
}
