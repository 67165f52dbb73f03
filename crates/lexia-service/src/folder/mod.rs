//! Folder tree manager, tree loading and descendant traversal.

pub mod service;
pub mod traversal;
pub mod tree;


pub use service::{CreateFolderRequest, FolderDetail, FolderService, UpdateFolderRequest};
