//! Positional values bound to query placeholders.

use rust_decimal::Decimal;

/// Column type of a value, kept for typed `NULL`s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Decimal,
    Boolean,
}

/// A value bound by ordinal position to `$n` in a statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    /// `NULL` of the given column type; Postgres rejects untyped nulls in
    /// assignments to non-text columns.
    Null(SqlType),
}

/// Rust types with a fixed SQL counterpart
pub trait ToSql: Into<SqlValue> {
    const SQL_TYPE: SqlType;
}

impl SqlValue {
    /// Wrap an optional value, mapping `None` to a typed `NULL`
    pub fn nullable<T: ToSql>(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null(T::SQL_TYPE),
        }
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Integer(n)
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Integer(n.into())
    }
}

impl From<Decimal> for SqlValue {
    fn from(d: Decimal) -> Self {
        SqlValue::Decimal(d)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Boolean(b)
    }
}

impl ToSql for String {
    const SQL_TYPE: SqlType = SqlType::Text;
}

impl ToSql for i64 {
    const SQL_TYPE: SqlType = SqlType::Integer;
}

impl ToSql for i32 {
    const SQL_TYPE: SqlType = SqlType::Integer;
}

impl ToSql for Decimal {
    const SQL_TYPE: SqlType = SqlType::Decimal;
}

impl ToSql for bool {
    const SQL_TYPE: SqlType = SqlType::Boolean;
}
