//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use lexia_core::error::{AppError, ErrorKind};
use lexia_core::result::AppResult;
use lexia_core::types::FolderId;
use lexia_core::types::UserId;
use lexia_entity::folder::{CreateFolder, Folder};

use crate::store::{FolderStore, FolderTransaction};

/// PostgreSQL-backed folder store.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_uuids(ids: &[FolderId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

async fn select_children<'e, E: PgExecutor<'e>>(
    executor: E,
    parent_ids: &[FolderId],
) -> AppResult<Vec<Folder>> {
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, Folder>(
        "SELECT * FROM folders WHERE parent_id = ANY($1) ORDER BY created_at ASC, id ASC",
    )
    .bind(to_uuids(parent_ids))
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
}

async fn insert_folder<'e, E: PgExecutor<'e>>(
    executor: E,
    data: &CreateFolder,
) -> AppResult<Folder> {
    sqlx::query_as::<_, Folder>(
        "INSERT INTO folders (id, name, kind, word_count, language_from, language_to, parent_id, owner_id) \
         VALUES ($1, $2, $3, 0, $4, $5, $6, $7) RETURNING *",
    )
    .bind(FolderId::new())
    .bind(&data.name)
    .bind(data.kind)
    .bind(data.language_from)
    .bind(data.language_to)
    .bind(data.parent_id)
    .bind(data.owner_id)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
}

async fn count_child_rows<'e, E: PgExecutor<'e>>(executor: E, id: FolderId) -> AppResult<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE parent_id = $1")
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count subfolders", e))
}

async fn count_word_rows<'e, E: PgExecutor<'e>>(executor: E, id: FolderId) -> AppResult<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE folder_id = $1")
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count words", e))
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user folders", e))
    }

    async fn find_roots(&self, owner_id: UserId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root folders", e))
    }

    async fn find_children(&self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        select_children(&self.pool, parent_ids).await
    }

    async fn find_ancestors(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        // `hops` caps the walk.
        sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE chain AS ( \
                SELECT f.*, 0 AS hops FROM folders f WHERE f.id = $1 \
                UNION ALL \
                SELECT p.*, c.hops + 1 FROM folders p \
                INNER JOIN chain c ON p.id = c.parent_id \
                WHERE c.hops < 10000 \
             ) SELECT * FROM chain ORDER BY hops DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        insert_folder(&self.pool, data).await
    }

    async fn count_children(&self, id: FolderId) -> AppResult<i64> {
        count_child_rows(&self.pool, id).await
    }

    async fn count_words(&self, id: FolderId) -> AppResult<i64> {
        count_word_rows(&self.pool, id).await
    }

    async fn begin(&self) -> AppResult<Box<dyn FolderTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgFolderTransaction { tx }))
    }
}

/// A folder transaction over a pooled PostgreSQL connection.
///
/// sqlx rolls the transaction back when this value is dropped uncommitted.
pub struct PgFolderTransaction {
    tx: Transaction<'static, Postgres>,
}

impl std::fmt::Debug for PgFolderTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgFolderTransaction").finish_non_exhaustive()
    }
}

#[async_trait]
impl FolderTransaction for PgFolderTransaction {
    async fn lock_owner(&mut self, owner_id: UserId) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(owner_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock folder owner", e)
            })?;
        Ok(())
    }

    async fn lock(&mut self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))
    }

    async fn find_children(&mut self, parent_ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        select_children(&mut *self.tx, parent_ids).await
    }

    async fn create(&mut self, data: &CreateFolder) -> AppResult<Folder> {
        insert_folder(&mut *self.tx, data).await
    }

    async fn set_parent(&mut self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?
        .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn rename(&mut self, id: FolderId, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn count_children(&mut self, id: FolderId) -> AppResult<i64> {
        count_child_rows(&mut *self.tx, id).await
    }

    async fn count_words(&mut self, id: FolderId) -> AppResult<i64> {
        count_word_rows(&mut *self.tx, id).await
    }

    async fn delete(&mut self, id: FolderId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Folder not found"));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
