//! The folder tree manager.
//!
//! Enforces the typed-forest rules over every folder operation:
//!
//! - a word collection holds words and never subfolders, a folder
//!   collection holds subfolders and never words;
//! - following parents from any folder never revisits it;
//! - a folder and its parent always share an owner;
//! - only empty folders can be deleted.
//!
//! Mutations that depend on the current shape of the tree run inside one
//! [`FolderTransaction`] with the affected rows locked, so validation and
//! write see the same state. Reparenting also takes the owner lock first:
//! two moves with disjoint row locks could otherwise each pass the cycle
//! check against the other's stale tree. Any error drops the transaction
//! before commit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use lexia_core::config::FolderConfig;
use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_core::types::FolderId;
use lexia_database::store::{FolderStore, FolderTransaction, WordStore};
use lexia_entity::folder::{CreateFolder, Folder, FolderKind, FolderNode, Language};
use lexia_entity::word::Word;

use super::traversal::{TraversalLimits, collect_descendants};
use super::tree::load_subtrees;
use crate::context::RequestContext;

/// Longest accepted folder name, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// Levels of subfolders loaded below each root by [`FolderService::get_root_folders`].
const ROOT_TREE_DEPTH: usize = 2;

/// Manages the per-user folder forest.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Word store (read-only here).
    words: Arc<dyn WordStore>,
    /// Traversal limits.
    config: FolderConfig,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Folder kind.
    pub kind: FolderKind,
    /// Source language (word collections only, required there).
    pub language_from: Option<Language>,
    /// Target language (word collections only).
    pub language_to: Option<Language>,
    /// Parent folder (None for a root).
    pub parent_id: Option<FolderId>,
}

/// Partial folder update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    /// New name.
    pub name: Option<String>,
    /// New parent.
    pub parent_id: Option<FolderId>,
}

/// A folder with its immediate relations.
#[derive(Debug, Clone)]
pub struct FolderDetail {
    /// The folder itself.
    pub folder: Folder,
    /// Its parent, if any.
    pub parent: Option<Folder>,
    /// Direct child folders.
    pub subfolders: Vec<Folder>,
    /// Words stored directly in the folder, newest first.
    pub words: Vec<Word>,
}

fn folder_not_found() -> AppError {
    AppError::not_found("Folder not found")
}

fn parent_not_found() -> AppError {
    AppError::not_found("Parent folder not found")
}

fn ensure_owned(folder: &Folder, ctx: &RequestContext) -> AppResult<()> {
    if folder.is_owned_by(ctx.user_id) {
        Ok(())
    } else {
        Err(AppError::ownership("Folder does not belong to user"))
    }
}

fn ensure_holds_subfolders(folder: &Folder) -> AppResult<()> {
    if folder.kind.can_hold_subfolders() {
        Ok(())
    } else {
        Err(AppError::invalid_operation(
            "Cannot add subfolders to a word collection",
        ))
    }
}

fn ensure_holds_words(folder: &Folder) -> AppResult<()> {
    if folder.kind.can_hold_words() {
        Ok(())
    } else {
        Err(AppError::invalid_operation(
            "Cannot add words to a folder collection",
        ))
    }
}

/// Trims and checks a folder name.
pub fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name is required"));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name must be at most {MAX_FOLDER_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Checks the language tags against the folder kind.
pub fn validate_languages(
    kind: FolderKind,
    language_from: Option<Language>,
    language_to: Option<Language>,
) -> AppResult<()> {
    match kind {
        FolderKind::WordCollection if language_from.is_none() => Err(AppError::validation(
            "Word collections require a source language",
        )),
        FolderKind::FolderCollection if language_from.is_some() || language_to.is_some() => Err(
            AppError::validation("Folder collections cannot have languages"),
        ),
        _ => Ok(()),
    }
}

/// Locks two folders in ID order so concurrent moves cannot deadlock.
async fn lock_pair(
    tx: &mut dyn FolderTransaction,
    a: FolderId,
    b: FolderId,
) -> AppResult<(Option<Folder>, Option<Folder>)> {
    if a == b {
        let folder = tx.lock(a).await?;
        return Ok((folder.clone(), folder));
    }
    if a.as_uuid() < b.as_uuid() {
        let first = tx.lock(a).await?;
        let second = tx.lock(b).await?;
        Ok((first, second))
    } else {
        let second = tx.lock(b).await?;
        let first = tx.lock(a).await?;
        Ok((first, second))
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        words: Arc<dyn WordStore>,
        config: FolderConfig,
    ) -> Self {
        Self {
            folders,
            words,
            config,
        }
    }

    /// Fetches a folder the caller owns.
    pub async fn owned_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(folder_not_found)?;
        ensure_owned(&folder, ctx)?;
        Ok(folder)
    }

    /// Creates a folder, optionally under a parent folder collection.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = validate_name(&req.name)?;
        validate_languages(req.kind, req.language_from, req.language_to)?;

        let data = CreateFolder {
            name,
            kind: req.kind,
            language_from: req.language_from,
            language_to: req.language_to,
            parent_id: req.parent_id,
            owner_id: ctx.user_id,
        };

        let folder = match req.parent_id {
            None => self.folders.create(&data).await?,
            Some(parent_id) => {
                let mut tx = self.folders.begin().await?;
                let parent = tx.lock(parent_id).await?.ok_or_else(parent_not_found)?;
                ensure_owned(&parent, ctx)?;
                if let Err(e) = ensure_holds_subfolders(&parent) {
                    warn!(
                        user_id = %ctx.user_id,
                        parent_id = %parent_id,
                        "Rejected subfolder under word collection"
                    );
                    return Err(e);
                }
                let folder = tx.create(&data).await?;
                tx.commit().await?;
                folder
            }
        };

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            kind = %folder.kind,
            parent_id = ?folder.parent_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Gets an owned folder with its parent, direct subfolders and words.
    pub async fn get_folder_by_id(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<FolderDetail> {
        let folder = self.owned_folder(ctx, folder_id).await?;

        let parent = match folder.parent_id {
            Some(parent_id) => self.folders.find_by_id(parent_id).await?,
            None => None,
        };
        let subfolders = self.folders.find_children(&[folder.id]).await?;
        let words = if folder.kind.can_hold_words() {
            self.words.find_by_folder(folder.id).await?
        } else {
            Vec::new()
        };

        Ok(FolderDetail {
            folder,
            parent,
            subfolders,
            words,
        })
    }

    /// Every folder the user owns, each with its direct subfolders.
    pub async fn get_user_folders(&self, ctx: &RequestContext) -> AppResult<Vec<FolderNode>> {
        let folders = self.folders.find_by_owner(ctx.user_id).await?;
        load_subtrees(self.folders.as_ref(), folders, 1).await
    }

    /// The user's root folders with two levels of subfolders loaded.
    pub async fn get_root_folders(&self, ctx: &RequestContext) -> AppResult<Vec<FolderNode>> {
        let roots = self.folders.find_roots(ctx.user_id).await?;
        load_subtrees(self.folders.as_ref(), roots, ROOT_TREE_DEPTH).await
    }

    /// Direct children of an owned folder.
    pub async fn get_subfolders(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let folder = self.owned_folder(ctx, folder_id).await?;
        self.folders.find_children(&[folder.id]).await
    }

    /// The chain from the root down to an owned folder (inclusive).
    pub async fn get_folder_path(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let chain = self.folders.find_ancestors(folder_id).await?;
        let leaf = chain.last().ok_or_else(folder_not_found)?;
        ensure_owned(leaf, ctx)?;
        Ok(chain)
    }

    /// Renames and/or reparents an owned folder.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        req: UpdateFolderRequest,
    ) -> AppResult<Folder> {
        let name = req.name.as_deref().map(validate_name).transpose()?;

        let mut tx = self.folders.begin().await?;
        let (folder, parent) = match req.parent_id {
            Some(parent_id) => {
                tx.lock_owner(ctx.user_id).await?;
                lock_pair(tx.as_mut(), folder_id, parent_id).await?
            }
            None => (tx.lock(folder_id).await?, None),
        };
        let mut folder = folder.ok_or_else(folder_not_found)?;
        ensure_owned(&folder, ctx)?;

        if let Some(parent_id) = req.parent_id {
            self.check_new_parent(tx.as_mut(), ctx, &folder, parent, parent_id)
                .await?;
            folder = tx.set_parent(folder.id, Some(parent_id)).await?;
        }
        if let Some(name) = name {
            folder = tx.rename(folder.id, &name).await?;
        }
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder updated"
        );

        Ok(folder)
    }

    /// Moves an owned folder under `new_parent_id`, or to the root when `None`.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let mut tx = self.folders.begin().await?;
        let (folder, parent) = match new_parent_id {
            Some(parent_id) => {
                tx.lock_owner(ctx.user_id).await?;
                lock_pair(tx.as_mut(), folder_id, parent_id).await?
            }
            None => (tx.lock(folder_id).await?, None),
        };
        let folder = folder.ok_or_else(folder_not_found)?;
        ensure_owned(&folder, ctx)?;

        if let Some(parent_id) = new_parent_id {
            self.check_new_parent(tx.as_mut(), ctx, &folder, parent, parent_id)
                .await?;
        }
        let moved = tx.set_parent(folder.id, new_parent_id).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %moved.id,
            from = ?folder.parent_id,
            to = ?moved.parent_id,
            "Folder moved"
        );

        Ok(moved)
    }

    /// Validates that `parent` can adopt `folder` without breaking the forest.
    async fn check_new_parent(
        &self,
        tx: &mut dyn FolderTransaction,
        ctx: &RequestContext,
        folder: &Folder,
        parent: Option<Folder>,
        parent_id: FolderId,
    ) -> AppResult<()> {
        let parent = parent.ok_or_else(parent_not_found)?;
        ensure_owned(&parent, ctx)?;

        let rejection = if folder.id == parent_id {
            Some("Cannot move folder into itself")
        } else if !parent.kind.can_hold_subfolders() {
            Some("Cannot add subfolders to a word collection")
        } else {
            let limits = TraversalLimits::from_config(&self.config);
            let descendants =
                collect_descendants(tx, folder.id, &limits, &ctx.cancellation).await?;
            descendants
                .contains(&parent_id)
                .then_some("Cannot move folder: circular reference detected")
        };

        match rejection {
            Some(message) => {
                warn!(
                    user_id = %ctx.user_id,
                    folder_id = %folder.id,
                    parent_id = %parent_id,
                    reason = message,
                    "Rejected folder reparent"
                );
                Err(AppError::invalid_operation(message))
            }
            None => Ok(()),
        }
    }

    /// Deletes an owned folder that has no subfolders and no words.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<()> {
        let mut tx = self.folders.begin().await?;
        let folder = tx.lock(folder_id).await?.ok_or_else(folder_not_found)?;
        ensure_owned(&folder, ctx)?;

        if tx.count_children(folder.id).await? > 0 {
            warn!(user_id = %ctx.user_id, folder_id = %folder.id, "Rejected delete of non-empty folder");
            return Err(AppError::invalid_operation(
                "Cannot delete folder that contains subfolders",
            ));
        }
        if tx.count_words(folder.id).await? > 0 {
            warn!(user_id = %ctx.user_id, folder_id = %folder.id, "Rejected delete of non-empty folder");
            return Err(AppError::invalid_operation(
                "Cannot delete folder that contains words",
            ));
        }

        tx.delete(folder.id).await?;
        tx.commit().await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder deleted"
        );

        Ok(())
    }

    /// Checks that words may be stored in the folder, returning it.
    pub async fn validate_can_add_words(&self, folder_id: FolderId) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(folder_not_found)?;
        ensure_holds_words(&folder)?;
        Ok(folder)
    }

    /// Checks that subfolders may be created under the folder, returning it.
    pub async fn validate_can_add_subfolder(&self, parent_id: FolderId) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(parent_id)
            .await?
            .ok_or_else(parent_not_found)?;
        ensure_holds_subfolders(&folder)?;
        Ok(folder)
    }
}
