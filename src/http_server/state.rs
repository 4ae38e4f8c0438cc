//! Shared handler state and the admin extractor.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::{AuthContext, JwtManager};
use crate::store::Store;

use super::errors::ApiError;

/// State shared by every route
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt: JwtManager,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt: JwtManager) -> Self {
        Self { store, jwt }
    }
}

/// Shared state type
pub type SharedState = Arc<AppState>;

/// Extractor that admits only admin tokens.
///
/// Runs before body extraction, so unauthorized writes are rejected
/// without looking at the payload.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

#[async_trait]
impl FromRequestParts<SharedState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let ctx = AuthContext::from_authorization(&state.jwt, header);
        ctx.require_admin()?;
        Ok(Self(ctx))
    }
}
