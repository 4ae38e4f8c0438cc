//! jobly - companies and jobs over HTTP, backed by Postgres
//!
//! Layers, bottom-up:
//! - `query`: filter and partial-update SQL compilers
//! - `store`: async query execution (Postgres or a recording double)
//! - `models`: company and job repositories
//! - `auth`: JWT tokens and request identity
//! - `http_server`: axum routers
//! - `cli`, `config`: entry point and configuration file

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod models;
pub mod query;
pub mod store;
