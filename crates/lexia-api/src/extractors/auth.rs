//! `AuthUser` extractor: validates the bearer token and builds the request context.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use tokio_util::sync::CancellationToken;

use lexia_core::error::AppError;
use lexia_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) {
                    AppError::authentication("Missing Authorization header")
                        .with_code("MISSING_TOKEN")
                } else {
                    AppError::authentication("Invalid Authorization header format")
                        .with_code("INVALID_TOKEN")
                }
            })?;

        let claims = state.jwt_decoder.decode_access_token(bearer.token())?;

        let cancellation = parts
            .extensions
            .get::<CancellationToken>()
            .cloned()
            .unwrap_or_default();

        Ok(AuthUser(
            RequestContext::new(claims.user_id(), claims.email).with_cancellation(cancellation),
        ))
    }
}
