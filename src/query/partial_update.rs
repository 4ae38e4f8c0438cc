//! # Partial-Update Compiler
//!
//! Turns an ordered list of `field -> value` pairs into a `SET` clause
//! with positional placeholders and the matching value sequence.

use super::errors::{QueryError, QueryResult};
use super::value::SqlValue;

/// Translation from external field names to storage column names
pub type ColumnMap = [(&'static str, &'static str)];

/// Compiled `SET` clause
#[derive(Debug, Clone, PartialEq)]
pub struct Assignments {
    /// `"col_a"=$1, "col_b"=$2`
    pub clause: String,

    /// Values in placeholder order
    pub values: Vec<SqlValue>,
}

impl Assignments {
    /// Index of the next free placeholder after the assignments
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Look up the column for `field`, falling back to the field name itself
pub fn column_for<'a>(field: &'a str, columns: &'a ColumnMap) -> &'a str {
    columns
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .unwrap_or(field)
}

/// Compile a partial update.
///
/// Fields are emitted in the order given; no re-sorting happens.
pub fn compile_partial_update<K>(
    fields: Vec<(K, SqlValue)>,
    columns: &ColumnMap,
) -> QueryResult<Assignments>
where
    K: AsRef<str>,
{
    if fields.is_empty() {
        return Err(QueryError::NoData);
    }

    let mut parts = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (idx, (field, value)) in fields.into_iter().enumerate() {
        let column = column_for(field.as_ref(), columns);
        parts.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    Ok(Assignments {
        clause: parts.join(", "),
        values,
    })
}
