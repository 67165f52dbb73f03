//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use lexia_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built from verified token claims and passed into every service method,
/// so each operation knows *who* is acting. The identity is trusted as-is.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's email (from token claims).
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
    /// Fires when the caller gives up on the request. The HTTP layer cancels
    /// it once the request future completes or is dropped.
    pub cancellation: CancellationToken,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            request_time: Utc::now(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}
