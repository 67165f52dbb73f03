//! Word handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use lexia_core::types::WordId;
use lexia_service::word::{CreateWordRequest as NewWord, UpdateWordRequest as WordChanges};

use crate::dto::request::{CreateWordRequest, DuplicateQuery, UpdateWordRequest};
use crate::dto::response::{DuplicateCheckResponse, WordResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/words
pub async fn create_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWordRequest>,
) -> Result<(StatusCode, Json<WordResponse>), ApiError> {
    let word = state
        .word_service
        .create_word(
            &auth,
            NewWord {
                text: req.text,
                definition: req.definition,
                folder_id: req.folder_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(word.into())))
}

/// GET /api/v1/words/{id}
pub async fn get_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WordId>,
) -> Result<Json<WordResponse>, ApiError> {
    let word = state.word_service.get_word(&auth, id).await?;
    Ok(Json(word.into()))
}

/// PUT /api/v1/words/{id}
pub async fn update_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WordId>,
    Json(req): Json<UpdateWordRequest>,
) -> Result<Json<WordResponse>, ApiError> {
    let word = state
        .word_service
        .update_word(
            &auth,
            id,
            WordChanges {
                text: req.text,
                definition: req.definition,
            },
        )
        .await?;
    Ok(Json(word.into()))
}

/// DELETE /api/v1/words/{id}
pub async fn delete_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WordId>,
) -> Result<StatusCode, ApiError> {
    state.word_service.delete_word(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/words/check-duplicate?text=...
pub async fn check_duplicate(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DuplicateQuery>,
) -> Result<Json<DuplicateCheckResponse>, ApiError> {
    let check = state.word_service.check_duplicate(&auth, &query.text).await?;
    Ok(Json(check.into()))
}
