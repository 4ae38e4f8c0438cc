//! # Auth Errors
//!
//! Error types for token handling and write authorization.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // JWT Errors
    // ==================
    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    // ==================
    // Access Errors
    // ==================
    /// Write attempted without a token
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Token holder is not an administrator
    #[error("Admin privileges required")]
    AdminRequired,

    // ==================
    // Internal Errors
    // ==================
    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::AuthenticationRequired => 401,

            AuthError::AdminRequired => 403,

            AuthError::TokenGenerationFailed => 500,
        }
    }
}
