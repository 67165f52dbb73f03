//! Translation handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{DetectRequest, TranslateRequest};
use crate::dto::response::{DetectResponse, LanguagesResponse, TranslateResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/translate
pub async fn translate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let translation = state
        .translate_service
        .translate(&auth, &req.text, req.language_from, req.language_to)
        .await?;
    Ok(Json(translation.into()))
}

/// POST /api/v1/translate/detect
pub async fn detect(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, ApiError> {
    let detected = state.translate_service.detect(&auth, &req.text).await?;
    Ok(Json(detected.into()))
}

/// GET /api/v1/translate/languages
pub async fn languages(State(state): State<AppState>, _auth: AuthUser) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.translate_service.supported_languages(),
    })
}
