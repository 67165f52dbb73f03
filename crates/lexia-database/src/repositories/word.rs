//! Word repository implementation.
//!
//! Inserts and deletes run in a transaction that also adjusts the parent
//! folder's `word_count`, so the counter never drifts from the row count.

use async_trait::async_trait;
use sqlx::PgPool;

use lexia_core::error::{AppError, ErrorKind};
use lexia_core::result::AppResult;
use lexia_core::types::{FolderId, UserId, WordId};
use lexia_entity::word::{CreateWord, UpdateWord, Word};

use crate::store::WordStore;

/// PostgreSQL-backed word store.
#[derive(Debug, Clone)]
pub struct WordRepository {
    pool: PgPool,
}

impl WordRepository {
    /// Create a new word repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl WordStore for WordRepository {
    async fn find_by_id(&self, id: WordId) -> AppResult<Option<Word>> {
        sqlx::query_as::<_, Word>("SELECT * FROM words WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find word"))
    }

    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<Word>> {
        sqlx::query_as::<_, Word>(
            "SELECT * FROM words WHERE folder_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list folder words"))
    }

    async fn find_by_text_for_owner(
        &self,
        owner_id: UserId,
        text: &str,
    ) -> AppResult<Option<Word>> {
        sqlx::query_as::<_, Word>(
            "SELECT w.* FROM words w \
             INNER JOIN folders f ON f.id = w.folder_id \
             WHERE f.owner_id = $1 AND LOWER(w.text) = LOWER($2) \
             ORDER BY w.created_at ASC, w.id ASC LIMIT 1",
        )
        .bind(owner_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to check duplicate word"))
    }

    async fn create(&self, data: &CreateWord) -> AppResult<Word> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let locked: Option<FolderId> =
            sqlx::query_scalar("SELECT id FROM folders WHERE id = $1 FOR UPDATE")
                .bind(data.folder_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err("Failed to lock folder"))?;
        if locked.is_none() {
            return Err(AppError::not_found("Folder not found"));
        }

        let word = sqlx::query_as::<_, Word>(
            "INSERT INTO words (id, text, definition, folder_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(WordId::new())
        .bind(&data.text)
        .bind(&data.definition)
        .bind(data.folder_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to create word"))?;

        sqlx::query(
            "UPDATE folders SET word_count = word_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(data.folder_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to update word count"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit transaction"))?;
        Ok(word)
    }

    async fn update(&self, id: WordId, data: &UpdateWord) -> AppResult<Word> {
        sqlx::query_as::<_, Word>(
            "UPDATE words SET text = COALESCE($2, text), definition = COALESCE($3, definition), \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.text.as_deref())
        .bind(data.definition.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update word"))?
        .ok_or_else(|| AppError::not_found("Word not found"))
    }

    async fn delete(&self, id: WordId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let folder_id: Option<FolderId> =
            sqlx::query_scalar("DELETE FROM words WHERE id = $1 RETURNING folder_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err("Failed to delete word"))?;
        let Some(folder_id) = folder_id else {
            return Err(AppError::not_found("Word not found"));
        };

        sqlx::query(
            "UPDATE folders SET word_count = GREATEST(word_count - 1, 0), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(folder_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to update word count"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit transaction"))
    }
}
