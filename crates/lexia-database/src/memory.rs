//! In-memory stores backed by a Tokio mutex.
//!
//! One [`MemoryStore`] implements every store trait over a shared state so
//! that cross-table rules (word counts, owner joins) behave like the SQL
//! implementation. Intended for tests and single-process tooling.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_core::types::{FolderId, UserId, WordId};
use lexia_entity::folder::{CreateFolder, Folder};
use lexia_entity::user::{CreateUser, User};
use lexia_entity::word::{CreateWord, UpdateWord, Word};

use crate::store::{FolderStore, FolderTransaction, Stores, UserStore, WordStore};

/// Rows kept in insertion order, which is also `created_at` order.
#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Vec<User>,
    folders: Vec<Folder>,
    words: Vec<Word>,
}

impl MemoryState {
    fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn folder_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    fn children(&self, parent_ids: &[FolderId]) -> Vec<Folder> {
        self.folders
            .iter()
            .filter(|f| f.parent_id.is_some_and(|p| parent_ids.contains(&p)))
            .cloned()
            .collect()
    }

    fn insert_folder(&mut self, data: &CreateFolder) -> Folder {
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            kind: data.kind,
            word_count: 0,
            language_from: data.language_from,
            language_to: data.language_to,
            parent_id: data.parent_id,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.folders.push(folder.clone());
        folder
    }

    fn count_children(&self, id: FolderId) -> i64 {
        self.folders
            .iter()
            .filter(|f| f.parent_id == Some(id))
            .count() as i64
    }

    fn count_words(&self, id: FolderId) -> i64 {
        self.words.iter().filter(|w| w.folder_id == id).count() as i64
    }
}

/// Shared in-memory backend for folders, words and users.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// This store behind all three store traits.
    pub fn stores(&self) -> Stores {
        Stores {
            folders: Arc::new(self.clone()),
            words: Arc::new(self.clone()),
            users: Arc::new(self.clone()),
        }
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.state.lock().await.folder(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().await;
        Ok(state
            .folders
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_roots(&self, owner_id: UserId) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().await;
        Ok(state
            .folders
            .iter()
            .filter(|f| f.owner_id == owner_id && f.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn find_children(&self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        Ok(self.state.lock().await.children(parent_ids))
    }

    async fn find_ancestors(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().await;
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = state.folder(id);
        while let Some(folder) = cursor {
            if !seen.insert(folder.id) {
                break;
            }
            chain.push(folder.clone());
            cursor = folder.parent_id.and_then(|p| state.folder(p));
        }
        chain.reverse();
        Ok(chain)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        Ok(self.state.lock().await.insert_folder(data))
    }

    async fn count_children(&self, id: FolderId) -> AppResult<i64> {
        Ok(self.state.lock().await.count_children(id))
    }

    async fn count_words(&self, id: FolderId) -> AppResult<i64> {
        Ok(self.state.lock().await.count_words(id))
    }

    async fn begin(&self) -> AppResult<Box<dyn FolderTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryFolderTransaction { guard, working }))
    }
}

/// Holds the store lock for its lifetime and edits a private copy of the state.
///
/// Every other call on the owning [`MemoryStore`] waits until the
/// transaction is committed or dropped.
#[derive(Debug)]
pub struct MemoryFolderTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl FolderTransaction for MemoryFolderTransaction {
    async fn lock_owner(&mut self, _owner_id: UserId) -> AppResult<()> {
        // The store-wide guard already excludes every other writer.
        Ok(())
    }

    async fn lock(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.working.folder(id).cloned())
    }

    async fn find_children(&mut self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        Ok(self.working.children(parent_ids))
    }

    async fn create(&mut self, data: &CreateFolder) -> AppResult<Folder> {
        Ok(self.working.insert_folder(data))
    }

    async fn set_parent(&mut self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let folder = self
            .working
            .folder_mut(id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        folder.parent_id = parent_id;
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn rename(&mut self, id: FolderId, name: &str) -> AppResult<Folder> {
        let folder = self
            .working
            .folder_mut(id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        folder.name = name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn count_children(&mut self, id: FolderId) -> AppResult<i64> {
        Ok(self.working.count_children(id))
    }

    async fn count_words(&mut self, id: FolderId) -> AppResult<i64> {
        Ok(self.working.count_words(id))
    }

    async fn delete(&mut self, id: FolderId) -> AppResult<()> {
        let before = self.working.folders.len();
        self.working.folders.retain(|f| f.id != id);
        if self.working.folders.len() == before {
            return Err(AppError::not_found("Folder not found"));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryFolderTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn find_by_id(&self, id: WordId) -> AppResult<Option<Word>> {
        let state = self.state.lock().await;
        Ok(state.words.iter().find(|w| w.id == id).cloned())
    }

    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<Word>> {
        let state = self.state.lock().await;
        Ok(state
            .words
            .iter()
            .rev()
            .filter(|w| w.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn find_by_text_for_owner(
        &self,
        owner_id: UserId,
        text: &str,
    ) -> AppResult<Option<Word>> {
        let state = self.state.lock().await;
        let needle = text.to_lowercase();
        Ok(state
            .words
            .iter()
            .find(|w| {
                w.text.to_lowercase() == needle
                    && state.folder(w.folder_id).is_some_and(|f| f.owner_id == owner_id)
            })
            .cloned())
    }

    async fn create(&self, data: &CreateWord) -> AppResult<Word> {
        let mut state = self.state.lock().await;
        let folder = state
            .folder_mut(data.folder_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        folder.word_count += 1;

        let now = Utc::now();
        let word = Word {
            id: WordId::new(),
            text: data.text.clone(),
            definition: data.definition.clone(),
            folder_id: data.folder_id,
            created_at: now,
            updated_at: now,
        };
        state.words.push(word.clone());
        Ok(word)
    }

    async fn update(&self, id: WordId, data: &UpdateWord) -> AppResult<Word> {
        let mut state = self.state.lock().await;
        let word = state
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::not_found("Word not found"))?;
        if let Some(text) = &data.text {
            word.text = text.clone();
        }
        if let Some(definition) = &data.definition {
            word.definition = definition.clone();
        }
        word.updated_at = Utc::now();
        Ok(word.clone())
    }

    async fn delete(&self, id: WordId) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let index = state
            .words
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| AppError::not_found("Word not found"))?;
        let word = state.words.remove(index);
        if let Some(folder) = state.folder_mut(word.folder_id) {
            folder.word_count = (folder.word_count - 1).max(0);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict("Email already exists").with_code("EMAIL_ALREADY_EXISTS"));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn rename(&self, id: UserId, username: &str) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))?;
        user.username = username.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.state.lock().await.users.clone())
    }
}
