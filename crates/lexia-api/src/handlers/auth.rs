//! Auth handlers: sign-up, sign-in, token status.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use lexia_service::user::NewUser;

use crate::dto::request::{SignInRequest, SignUpRequest, validate};
use crate::dto::response::{AuthResponse, OkResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validate(&req)?;

    let payload = state
        .auth_service
        .sign_up(NewUser {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(payload.into())))
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate(&req)?;
    let payload = state.auth_service.sign_in(&req.email, &req.password).await?;
    Ok(Json(payload.into()))
}

/// GET /api/v1/auth/status
pub async fn status(_auth: AuthUser) -> Json<OkResponse> {
    Json(OkResponse::ok())
}
