//! # Query Compilation
//!
//! Pure transformations from loosely-typed caller input into SQL fragments
//! with positional placeholders (`$1`, `$2`, ...) and their value sequences.
//!
//! - [`compile_partial_update`]: `SET` clause for partial updates
//! - [`FilterSpec`]: allow-listed search criteria to a `WHERE` condition

pub mod errors;
pub mod filter;
pub mod partial_update;
pub mod value;

pub use errors::{QueryError, QueryResult};
pub use filter::{Conditions, FilterCriteria, FilterField, FilterKind, FilterSpec, FilterValidation};
pub use partial_update::{compile_partial_update, Assignments, ColumnMap};
pub use value::{SqlType, SqlValue, ToSql};
