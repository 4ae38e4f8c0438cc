//! # HTTP Server Module
//!
//! Axum routers over the repositories.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/companies`, `/companies/:handle` - Company search and CRUD
//! - `/jobs`, `/jobs/:id` - Job search and CRUD
//!
//! Reads are anonymous; writes require `Authorization: Bearer <admin token>`.

pub mod company_routes;
pub mod config;
pub mod errors;
pub mod job_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::{AppState, RequireAdmin, SharedState};
