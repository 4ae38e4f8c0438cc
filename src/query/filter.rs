//! # Filter Compiler
//!
//! Validates raw search criteria against a declarative table of filterable
//! fields and compiles them into a `WHERE` condition with positional values.
//!
//! Each entity declares one [`FilterSpec`]. The table order fixes the order
//! in which predicates are emitted, so identical criteria always produce
//! identical clause text.
//!
//! ## Validation order
//! 1. every key is in the table
//! 2. every value is non-blank
//! 3. bounds parse as integers, flags as booleans
//! 4. a lower bound does not exceed the upper bound on the same column
//! 5. a lower bound is not negative

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::errors::{QueryError, QueryResult};
use super::value::SqlValue;

/// How a filter key turns into a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `column >= $n`, integer, non-negative
    LowerBound,

    /// `column <= $n`, integer
    UpperBound,

    /// `column ILIKE $n` with the value wrapped in `%`; wildcards in the
    /// value itself match literally
    Contains,

    /// Fixed predicate without a parameter, applied when the flag is true
    Flag(&'static str),
}

/// One row of a filter table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Key as supplied by callers
    pub key: &'static str,

    /// Storage column the predicate applies to
    pub column: &'static str,

    pub kind: FilterKind,
}

impl FilterField {
    pub const fn lower_bound(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FilterKind::LowerBound,
        }
    }

    pub const fn upper_bound(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FilterKind::UpperBound,
        }
    }

    pub const fn contains(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FilterKind::Contains,
        }
    }

    pub const fn flag(key: &'static str, column: &'static str, predicate: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FilterKind::Flag(predicate),
        }
    }
}

/// Raw search criteria, keyed by filter key.
///
/// Kept sorted so validation reports errors deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria(BTreeMap<String, String>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for FilterCriteria {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Outcome of a validation-only pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl FilterValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn failed(err: &QueryError) -> Self {
        Self {
            valid: false,
            error: Some(err.to_string()),
        }
    }
}

/// Compiled `WHERE` condition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    /// Predicates joined with `AND`; empty when nothing applies
    pub clause: String,

    /// Values in placeholder order
    pub values: Vec<SqlValue>,
}

impl Conditions {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// ` WHERE <clause>` or an empty string
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

/// Parsed criterion value, one variant per [`FilterKind`]
#[derive(Debug, Clone, PartialEq)]
enum Parsed {
    Lower(i64),
    Upper(i64),
    Text(String),
    Flag(&'static str, bool),
}

/// Declarative filter table for one entity
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    fields: &'static [FilterField],
}

impl FilterSpec {
    pub const fn new(fields: &'static [FilterField]) -> Self {
        Self { fields }
    }

    /// Whether `key` is in the allow-list
    pub fn allows(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    fn field(&self, key: &str) -> Option<&'static FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Run the validation steps only
    pub fn validate(&self, criteria: &FilterCriteria) -> FilterValidation {
        match self.check(criteria) {
            Ok(_) => FilterValidation::ok(),
            Err(err) => FilterValidation::failed(&err),
        }
    }

    /// Validate and compile into a condition clause
    pub fn compile(&self, criteria: &FilterCriteria) -> QueryResult<Conditions> {
        let parsed = self.check(criteria)?;

        let mut predicates = Vec::new();
        let mut values = Vec::new();

        for (field, value) in parsed {
            match value {
                Parsed::Lower(n) => {
                    values.push(SqlValue::Integer(n));
                    predicates.push(format!("{} >= ${}", field.column, values.len()));
                }
                Parsed::Upper(n) => {
                    values.push(SqlValue::Integer(n));
                    predicates.push(format!("{} <= ${}", field.column, values.len()));
                }
                Parsed::Text(s) => {
                    values.push(SqlValue::Text(format!("%{}%", escape_like(&s))));
                    predicates.push(format!("{} ILIKE ${}", field.column, values.len()));
                }
                Parsed::Flag(predicate, true) => predicates.push(predicate.to_string()),
                Parsed::Flag(_, false) => {}
            }
        }

        Ok(Conditions {
            clause: predicates.join(" AND "),
            values,
        })
    }

    /// Steps 1-5; returns present fields in table order with parsed values
    fn check(&self, criteria: &FilterCriteria) -> QueryResult<Vec<(FilterField, Parsed)>> {
        if let Some((key, _)) = criteria.iter().find(|(key, _)| !self.allows(key)) {
            return Err(QueryError::NotAllowed(key.to_string()));
        }

        if criteria.iter().any(|(_, value)| value.trim().is_empty()) {
            return Err(QueryError::EmptyValue);
        }

        let mut parsed = Vec::new();
        for field in self.fields {
            let Some(raw) = criteria.get(field.key) else {
                continue;
            };
            let value = match field.kind {
                FilterKind::LowerBound => Parsed::Lower(parse_integer(field, raw)?),
                FilterKind::UpperBound => Parsed::Upper(parse_integer(field, raw)?),
                FilterKind::Contains => Parsed::Text(raw.to_string()),
                FilterKind::Flag(predicate) => Parsed::Flag(
                    predicate,
                    parse_flag(raw).ok_or_else(|| QueryError::NotBoolean(field.key.to_string()))?,
                ),
            };
            parsed.push((*field, value));
        }

        for (lower, lower_value) in lower_bounds(&parsed) {
            let upper = upper_bounds(&parsed)
                .find(|(upper, _)| upper.column == lower.column);
            if let Some((upper, upper_value)) = upper {
                if lower_value > upper_value {
                    return Err(QueryError::InvertedRange {
                        lower_key: lower.key.to_string(),
                        lower: lower_value,
                        upper_key: upper.key.to_string(),
                        upper: upper_value,
                    });
                }
            }
        }

        if let Some((lower, _)) =
            lower_bounds(&parsed).find(|(_, value)| *value < 0)
        {
            return Err(QueryError::Negative(lower.key.to_string()));
        }

        Ok(parsed)
    }
}

fn lower_bounds(parsed: &[(FilterField, Parsed)]) -> impl Iterator<Item = (&FilterField, i64)> {
    parsed.iter().filter_map(|(field, value)| match value {
        Parsed::Lower(n) => Some((field, *n)),
        _ => None,
    })
}

fn upper_bounds(parsed: &[(FilterField, Parsed)]) -> impl Iterator<Item = (&FilterField, i64)> {
    parsed.iter().filter_map(|(field, value)| match value {
        Parsed::Upper(n) => Some((field, *n)),
        _ => None,
    })
}

fn parse_integer(field: &FilterField, raw: &str) -> QueryResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueryError::NotInteger(field.key.to_string()))
}

/// Escape `\`, `%` and `_` so a substring matches literally.
///
/// Backslash is the default `LIKE` escape character in Postgres.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
