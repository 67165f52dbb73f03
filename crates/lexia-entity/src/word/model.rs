//! Word entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lexia_core::types::{FolderId, WordId};

/// A word/definition pair stored in a word collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Word {
    /// Unique word identifier.
    pub id: WordId,
    /// The word or phrase itself.
    pub text: String,
    /// Free-form definition; may be empty.
    pub definition: String,
    /// The word collection holding this word.
    pub folder_id: FolderId,
    /// When the word was created.
    pub created_at: DateTime<Utc>,
    /// When the word was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWord {
    /// Word text.
    pub text: String,
    /// Definition.
    pub definition: String,
    /// Target folder.
    pub folder_id: FolderId,
}

/// Partial update of a word. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWord {
    /// New text.
    pub text: Option<String>,
    /// New definition.
    pub definition: Option<String>,
}
