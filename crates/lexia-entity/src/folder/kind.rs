//! Folder kind enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a folder is allowed to hold.
///
/// A folder collection nests other folders and never holds words; a word
/// collection holds words and never has subfolders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "folder_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderKind {
    /// Holds sub-folders.
    FolderCollection,
    /// Holds vocabulary words.
    #[default]
    WordCollection,
}

impl FolderKind {
    /// Whether folders of this kind may contain words.
    pub fn can_hold_words(&self) -> bool {
        matches!(self, Self::WordCollection)
    }

    /// Whether folders of this kind may contain sub-folders.
    pub fn can_hold_subfolders(&self) -> bool {
        matches!(self, Self::FolderCollection)
    }

    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FolderCollection => "FOLDER_COLLECTION",
            Self::WordCollection => "WORD_COLLECTION",
        }
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FolderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FOLDER_COLLECTION" => Ok(Self::FolderCollection),
            "WORD_COLLECTION" => Ok(Self::WordCollection),
            other => Err(format!("Unknown folder kind: {other}")),
        }
    }
}
