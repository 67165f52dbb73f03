//! # lexia-api
//!
//! HTTP API layer for Lexia built on Axum.
//!
//! Provides the `/api/v1` REST endpoints, middleware (CORS, request
//! logging, tracing), the bearer-token extractor, DTOs, and the mapping
//! from [`lexia_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
