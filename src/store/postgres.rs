//! # Postgres Store
//!
//! [`Store`] backed by a sqlx connection pool.

use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row as _, TypeInfo};

use super::errors::{StoreError, StoreResult};
use super::{Row, Store, StoreFuture};
use crate::query::{SqlType, SqlValue};

/// Pooled Postgres connection
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a pool and open the first connection now
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn run(&self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, value| bind_value(query, value));

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_json).collect()
    }
}

impl Store for PgStore {
    fn query<'a>(&'a self, sql: &'a str, params: &'a [SqlValue]) -> StoreFuture<'a> {
        Box::pin(self.run(sql, params))
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Integer(n) => query.bind(*n),
        SqlValue::Decimal(d) => query.bind(*d),
        SqlValue::Boolean(b) => query.bind(*b),
        SqlValue::Null(SqlType::Text) => query.bind(Option::<String>::None),
        SqlValue::Null(SqlType::Integer) => query.bind(Option::<i64>::None),
        SqlValue::Null(SqlType::Decimal) => query.bind(Option::<Decimal>::None),
        SqlValue::Null(SqlType::Boolean) => query.bind(Option::<bool>::None),
    }
}

/// Convert a row to a JSON object; NUMERIC becomes a decimal string
fn row_to_json(row: &PgRow) -> StoreResult<Row> {
    let mut map = Row::new();

    for column in row.columns() {
        let name = column.name();
        let value = match column.type_info().name() {
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(name)?
                .map(Value::String),
            "INT2" => row.try_get::<Option<i16>, _>(name)?.map(|n| json!(n)),
            "INT4" => row.try_get::<Option<i32>, _>(name)?.map(|n| json!(n)),
            "INT8" => row.try_get::<Option<i64>, _>(name)?.map(|n| json!(n)),
            "FLOAT4" | "FLOAT8" => row.try_get::<Option<f64>, _>(name)?.map(|f| json!(f)),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(name)?
                .map(|d| Value::String(d.to_string())),
            "BOOL" => row.try_get::<Option<bool>, _>(name)?.map(Value::Bool),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(name)?,
            other => {
                return Err(StoreError::Decode(format!(
                    "unsupported column type {} for {}",
                    other, name
                )))
            }
        };
        map.insert(name.to_string(), value.unwrap_or(Value::Null));
    }

    Ok(map)
}
