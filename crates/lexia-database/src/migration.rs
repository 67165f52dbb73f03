//! Schema migrations for the `users`, `folders` and `words` tables.
//!
//! The SQL under `migrations/` at the workspace root is embedded at compile
//! time. It creates the `folder_kind` and `language` enum types, the folder
//! self-reference with its no-self-parent and languages-match-kind checks,
//! and the `word_count` column kept in step by the word store.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use lexia_core::error::{AppError, ErrorKind};
use lexia_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every embedded migration the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!(known = MIGRATOR.iter().count(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}
