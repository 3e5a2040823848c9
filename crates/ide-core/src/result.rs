//! Convenience result type alias for the IDE crates.

use crate::error::AppError;

/// A specialized `Result` type for IDE operations.
pub type AppResult<T> = Result<T, AppError>;
