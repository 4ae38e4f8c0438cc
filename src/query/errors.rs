//! # Query Errors
//!
//! Validation failures raised while compiling filters and partial updates.
//! Every variant is detected before the store is touched.

use thiserror::Error;

/// Result type for query compilation
pub type QueryResult<T> = Result<T, QueryError>;

/// Malformed or disallowed filter/update input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Partial update carried no fields
    #[error("no data supplied")]
    NoData,

    /// Filter key outside the allow-list
    #[error("search parameter not allowed: {0}")]
    NotAllowed(String),

    /// Filter value was blank
    #[error("search parameters can not be empty")]
    EmptyValue,

    /// Numeric bound did not parse as an integer
    #[error("integers are only allowed for {0}")]
    NotInteger(String),

    /// Lower bound exceeds upper bound
    #[error("{lower_key} ({lower}) can not be greater than {upper_key} ({upper})")]
    InvertedRange {
        lower_key: String,
        lower: i64,
        upper_key: String,
        upper: i64,
    },

    /// Lower bound below zero
    #[error("{0} can not be negative")]
    Negative(String),

    /// Flag value other than true/false
    #[error("{0} must be true or false")]
    NotBoolean(String),
}
