//! # Model Errors
//!
//! Error taxonomy surfaced by the repositories. Callers map these to
//! transport responses; nothing here is retried.

use thiserror::Error;

use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for repository operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Bad filter or update input, detected before any store call
    #[error("{0}")]
    Validation(String),

    /// Referenced identifier does not exist
    #[error("{0}")]
    NotFound(String),

    /// Unique identifier already taken
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl From<QueryError> for ModelError {
    fn from(err: QueryError) -> Self {
        Self::Validation(err.to_string())
    }
}
