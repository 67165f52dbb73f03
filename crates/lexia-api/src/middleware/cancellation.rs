//! Ties a [`CancellationToken`] to the lifetime of each request.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tokio_util::sync::CancellationToken;

/// Stores a fresh token in the request extensions and cancels it once the
/// request future finishes or is dropped (client gone, timeout layer fired).
pub async fn request_cancellation(mut request: Request, next: Next) -> Response {
    let token = CancellationToken::new();
    request.extensions_mut().insert(token.clone());
    let _cancel_on_drop = token.drop_guard();
    next.run(request).await
}
