//! Axum middleware stack.

pub mod cancellation;
pub mod cors;
pub mod logging;
