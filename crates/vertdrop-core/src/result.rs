//! Convenience result type alias for VertDrop.

use crate::error::AppError;

/// A specialized `Result` type for VertDrop operations.
pub type AppResult<T> = Result<T, AppError>;
