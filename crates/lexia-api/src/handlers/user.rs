//! Current-user handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/user/auth
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_current(&auth).await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/user
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.rename(&auth, &req.name).await?;
    Ok(Json(user.into()))
}
