//! # Relational Store
//!
//! The single I/O primitive the entity layer depends on: execute a
//! statement with positional placeholders and an ordered value list,
//! get rows back as JSON objects keyed by column alias.
//!
//! Statements are expected to `RETURNING` whatever the caller needs; a
//! statement that affects nothing returns no rows.

mod errors;
pub mod postgres;
pub mod recording;

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::query::SqlValue;

pub use errors::{StoreError, StoreResult};
pub use postgres::PgStore;
pub use recording::RecordingStore;

/// A result row, keyed by column name or alias
pub type Row = Map<String, Value>;

/// Boxed future returned by [`Store::query`]
pub type StoreFuture<'a> = Pin<Box<dyn Future<Output = StoreResult<Vec<Row>>> + Send + 'a>>;

/// Parameterized query execution
pub trait Store: Send + Sync {
    /// Execute `sql`, binding `params[i]` to placeholder `$(i+1)`
    fn query<'a>(&'a self, sql: &'a str, params: &'a [SqlValue]) -> StoreFuture<'a>;
}

/// Map one row into a typed record
pub fn decode_row<T: DeserializeOwned>(row: Row) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Map every row into a typed record
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Vec<T>> {
    rows.into_iter().map(decode_row).collect()
}
