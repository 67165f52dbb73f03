//! Convenience result type alias for Lexia.

use crate::error::AppError;

/// A specialized `Result` type for Lexia operations.
pub type AppResult<T> = Result<T, AppError>;
