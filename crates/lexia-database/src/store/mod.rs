//! Persistence traits consumed by the service layer.
//!
//! Services hold these as `Arc<dyn ...Store>` so the same business rules run
//! against PostgreSQL in production and [`crate::memory::MemoryStore`] in
//! tests and local tooling.

use std::sync::Arc;

use async_trait::async_trait;

use lexia_core::result::AppResult;
use lexia_core::types::{FolderId, UserId, WordId};
use lexia_entity::folder::{CreateFolder, Folder};
use lexia_entity::user::{CreateUser, User};
use lexia_entity::word::{CreateWord, UpdateWord, Word};

/// Read access to folders plus the entry point for mutating transactions.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// All folders owned by a user, oldest first.
    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<Folder>>;

    /// Folders owned by a user that have no parent, oldest first.
    async fn find_roots(&self, owner_id: UserId) -> AppResult<Vec<Folder>>;

    /// Direct children of every folder in `parent_ids`, oldest first.
    async fn find_children(&self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>>;

    /// The chain from the root down to `id` (inclusive). Empty if `id` is unknown.
    async fn find_ancestors(&self, id: FolderId) -> AppResult<Vec<Folder>>;

    /// Insert a root folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Number of direct child folders.
    async fn count_children(&self, id: FolderId) -> AppResult<i64>;

    /// Number of words stored directly in the folder.
    async fn count_words(&self, id: FolderId) -> AppResult<i64>;

    /// Open a transaction for a read-validate-write sequence.
    async fn begin(&self) -> AppResult<Box<dyn FolderTransaction>>;
}

/// A unit of work over the folder table.
///
/// Dropping the transaction without calling [`FolderTransaction::commit`]
/// discards every write made through it.
#[async_trait]
pub trait FolderTransaction: Send {
    /// Serialize against every other transaction that reparents folders of
    /// `owner_id`. Held until the transaction ends.
    async fn lock_owner(&mut self, owner_id: UserId) -> AppResult<()>;

    /// Fetch a folder and hold a row lock on it until the transaction ends.
    async fn lock(&mut self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of every folder in `parent_ids`.
    async fn find_children(&mut self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>>;

    /// Insert a folder.
    async fn create(&mut self, data: &CreateFolder) -> AppResult<Folder>;

    /// Reattach a folder (`None` promotes it to a root).
    async fn set_parent(&mut self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder>;

    /// Change a folder's name.
    async fn rename(&mut self, id: FolderId, name: &str) -> AppResult<Folder>;

    /// Number of direct child folders.
    async fn count_children(&mut self, id: FolderId) -> AppResult<i64>;

    /// Number of words stored directly in the folder.
    async fn count_words(&mut self, id: FolderId) -> AppResult<i64>;

    /// Remove a folder row.
    async fn delete(&mut self, id: FolderId) -> AppResult<()>;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// Word persistence. Implementations keep `folders.word_count` in step.
#[async_trait]
pub trait WordStore: Send + Sync + std::fmt::Debug {
    /// Find a word by ID.
    async fn find_by_id(&self, id: WordId) -> AppResult<Option<Word>>;

    /// Words stored in a folder, newest first.
    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<Word>>;

    /// The oldest word owned by `owner_id` whose text equals `text` ignoring case.
    async fn find_by_text_for_owner(&self, owner_id: UserId, text: &str)
    -> AppResult<Option<Word>>;

    /// Insert a word and increment the folder's word count atomically.
    async fn create(&self, data: &CreateWord) -> AppResult<Word>;

    /// Apply a partial update.
    async fn update(&self, id: WordId, data: &UpdateWord) -> AppResult<Word>;

    /// Remove a word and decrement its folder's word count atomically.
    async fn delete(&self, id: WordId) -> AppResult<()>;
}

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. A taken email fails with `Conflict` / `EMAIL_ALREADY_EXISTS`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Change a user's display name.
    async fn rename(&self, id: UserId, username: &str) -> AppResult<User>;

    /// All users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// One backend's folder, word and user stores, typed the way services take them.
#[derive(Debug, Clone)]
pub struct Stores {
    pub folders: Arc<dyn FolderStore>,
    pub words: Arc<dyn WordStore>,
    pub users: Arc<dyn UserStore>,
}
