//! # Auth Module
//!
//! JWT issuing and validation plus the per-request context that gates
//! writes behind an admin token.

pub mod context;
pub mod errors;
pub mod jwt;

pub use context::AuthContext;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager, DEFAULT_SECRET};
