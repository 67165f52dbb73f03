//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use lexia_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InvalidOperation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Ownership => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Cancelled => StatusCode::REQUEST_TIMEOUT,
        ErrorKind::Database
        | ErrorKind::ExternalService
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        let error = err
            .code
            .map(str::to_string)
            .unwrap_or_else(|| err.kind.to_string());

        let message = match err.kind {
            ErrorKind::Ownership => "Access denied".to_string(),
            kind if !kind.is_client_error() => {
                tracing::error!(
                    kind = %kind,
                    code = ?err.code,
                    error = %err.message,
                    source = ?err.source,
                    "Request failed"
                );
                match err.code {
                    // Coded provider failures keep their message.
                    Some(_) if kind == ErrorKind::ExternalService => err.message,
                    _ => "Internal server error".to_string(),
                }
            }
            _ => err.message,
        };

        (status, Json(ApiErrorResponse { error, message })).into_response()
    }
}
