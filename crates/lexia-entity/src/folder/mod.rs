//! Folder domain entities.

pub mod kind;
pub mod language;
pub mod model;
pub mod tree;

pub use kind::FolderKind;
pub use language::Language;
pub use model::{CreateFolder, Folder};
pub use tree::FolderNode;
