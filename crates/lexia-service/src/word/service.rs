//! Word CRUD and duplicate detection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use lexia_core::error::{AppError, ErrorKind};
use lexia_core::result::AppResult;
use lexia_core::types::{FolderId, WordId};
use lexia_database::store::WordStore;
use lexia_entity::folder::Folder;
use lexia_entity::word::{CreateWord, UpdateWord, Word};

use crate::context::RequestContext;
use crate::folder::FolderService;

/// Longest accepted word text, in characters.
pub const MAX_TEXT_LEN: usize = 500;
/// Longest accepted definition, in characters.
pub const MAX_DEFINITION_LEN: usize = 2000;

/// Manages words on behalf of their folder's owner.
#[derive(Debug, Clone)]
pub struct WordService {
    /// Word store.
    words: Arc<dyn WordStore>,
    /// Folder rules (ownership, kind, ancestry).
    folders: FolderService,
}

/// Request to create a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWordRequest {
    /// Word text.
    pub text: String,
    /// Definition (may be empty).
    pub definition: String,
    /// Target word collection.
    pub folder_id: FolderId,
}

/// Partial word update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWordRequest {
    /// New text.
    pub text: Option<String>,
    /// New definition.
    pub definition: Option<String>,
}

/// A word together with the folders leading to it, root first.
#[derive(Debug, Clone)]
pub struct WordWithPath {
    /// The matching word.
    pub word: Word,
    /// Root → containing folder.
    pub folder_path: Vec<Folder>,
}

/// Outcome of a duplicate check.
#[derive(Debug, Clone)]
pub struct DuplicateCheck {
    /// The existing word, if the text is already stored.
    pub existing: Option<WordWithPath>,
}

impl DuplicateCheck {
    /// Whether a matching word exists.
    pub fn is_duplicate(&self) -> bool {
        self.existing.is_some()
    }
}

fn validate_text(text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("Word text is required"));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::validation(format!(
            "Word text must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(text.to_string())
}

fn validate_definition(definition: &str) -> AppResult<()> {
    if definition.chars().count() > MAX_DEFINITION_LEN {
        return Err(AppError::validation(format!(
            "Definition must be at most {MAX_DEFINITION_LEN} characters"
        )));
    }
    Ok(())
}

impl WordService {
    /// Creates a new word service.
    pub fn new(words: Arc<dyn WordStore>, folders: FolderService) -> Self {
        Self { words, folders }
    }

    /// Fetches a word whose folder the caller owns.
    pub async fn get_word(&self, ctx: &RequestContext, word_id: WordId) -> AppResult<Word> {
        let word = self
            .words
            .find_by_id(word_id)
            .await?
            .ok_or_else(|| AppError::not_found("Word not found"))?;
        self.folders
            .owned_folder(ctx, word.folder_id)
            .await
            .map_err(|e| {
                if e.is(ErrorKind::Ownership) {
                    AppError::ownership("Word does not belong to user")
                } else {
                    e
                }
            })?;
        Ok(word)
    }

    /// Adds a word to an owned word collection.
    pub async fn create_word(
        &self,
        ctx: &RequestContext,
        req: CreateWordRequest,
    ) -> AppResult<Word> {
        let text = validate_text(&req.text)?;
        validate_definition(&req.definition)?;

        self.folders.owned_folder(ctx, req.folder_id).await?;
        self.folders.validate_can_add_words(req.folder_id).await?;

        let word = self
            .words
            .create(&CreateWord {
                text,
                definition: req.definition,
                folder_id: req.folder_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            word_id = %word.id,
            folder_id = %word.folder_id,
            "Word created"
        );

        Ok(word)
    }

    /// Words of an owned folder, newest first.
    pub async fn get_folder_words(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Word>> {
        let folder = self.folders.owned_folder(ctx, folder_id).await?;
        self.words.find_by_folder(folder.id).await
    }

    /// Applies a partial update to an owned word.
    pub async fn update_word(
        &self,
        ctx: &RequestContext,
        word_id: WordId,
        req: UpdateWordRequest,
    ) -> AppResult<Word> {
        let text = req.text.as_deref().map(validate_text).transpose()?;
        if let Some(definition) = &req.definition {
            validate_definition(definition)?;
        }

        self.get_word(ctx, word_id).await?;
        let word = self
            .words
            .update(
                word_id,
                &UpdateWord {
                    text,
                    definition: req.definition,
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, word_id = %word.id, "Word updated");
        Ok(word)
    }

    /// Removes an owned word.
    pub async fn delete_word(&self, ctx: &RequestContext, word_id: WordId) -> AppResult<()> {
        let word = self.get_word(ctx, word_id).await?;
        self.words.delete(word.id).await?;

        info!(
            user_id = %ctx.user_id,
            word_id = %word.id,
            folder_id = %word.folder_id,
            "Word deleted"
        );
        Ok(())
    }

    /// Looks for a word with the same text (ignoring case) among the caller's words.
    pub async fn check_duplicate(
        &self,
        ctx: &RequestContext,
        text: &str,
    ) -> AppResult<DuplicateCheck> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Text parameter is required"));
        }

        let existing = match self.words.find_by_text_for_owner(ctx.user_id, text).await? {
            Some(word) => {
                let folder_path = self.folders.get_folder_path(ctx, word.folder_id).await?;
                Some(WordWithPath { word, folder_path })
            }
            None => None,
        };

        Ok(DuplicateCheck { existing })
    }
}
