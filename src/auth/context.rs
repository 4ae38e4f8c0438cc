//! # Request Auth Context
//!
//! Who is calling. Reads are open to everyone; writes need an admin token.

use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtClaims, JwtManager};

/// Auth context carried with each request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Username from a valid token (None if anonymous)
    pub username: Option<String>,

    pub is_admin: bool,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_claims(claims: JwtClaims) -> Self {
        Self {
            username: Some(claims.username),
            is_admin: claims.is_admin,
        }
    }

    /// Resolve an `Authorization` header value.
    ///
    /// A missing or invalid token leaves the caller anonymous.
    pub fn from_authorization(jwt: &JwtManager, header: Option<&str>) -> Self {
        let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
            return Self::anonymous();
        };

        match jwt.validate_token(token.trim()) {
            Ok(claims) => Self::from_claims(claims),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid bearer token");
                Self::anonymous()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Gate for create, update and delete
    pub fn require_admin(&self) -> AuthResult<()> {
        if !self.is_authenticated() {
            return Err(AuthError::AuthenticationRequired);
        }
        if !self.is_admin {
            return Err(AuthError::AdminRequired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;

    #[test]
    fn test_anonymous_cannot_write() {
        assert_eq!(
            AuthContext::anonymous().require_admin(),
            Err(AuthError::AuthenticationRequired)
        );
    }

    #[test]
    fn test_bearer_resolution() {
        let jwt = JwtManager::new(JwtConfig::default());
        let admin = jwt.generate_token("root", true).unwrap();
        let user = jwt.generate_token("u1", false).unwrap();

        let ctx = AuthContext::from_authorization(&jwt, Some(&format!("Bearer {}", admin)));
        assert_eq!(ctx.username.as_deref(), Some("root"));
        assert!(ctx.require_admin().is_ok());

        let ctx = AuthContext::from_authorization(&jwt, Some(&format!("Bearer {}", user)));
        assert_eq!(ctx.require_admin(), Err(AuthError::AdminRequired));
    }

    #[test]
    fn test_bad_token_is_anonymous() {
        let jwt = JwtManager::new(JwtConfig::default());
        let ctx = AuthContext::from_authorization(&jwt, Some("Bearer garbage"));
        assert!(!ctx.is_authenticated());

        let ctx = AuthContext::from_authorization(&jwt, Some("Basic abc"));
        assert!(!ctx.is_authenticated());

        assert!(!AuthContext::from_authorization(&jwt, None).is_authenticated());
    }
}
