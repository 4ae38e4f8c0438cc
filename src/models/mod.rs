//! # Entity Access Layer
//!
//! Repositories for companies and jobs. Each operation composes one or two
//! statements from the query compilers and runs them through a [`Store`].
//!
//! [`Store`]: crate::store::Store

pub mod checks;
pub mod company;
pub mod errors;
pub mod job;

use serde::{Deserialize, Deserializer};

use crate::store::{decode_row, Row, StoreError};

pub use company::{Company, CompanyDetail, CompanyRepository, CompanyUpdate, NewCompany};
pub use errors::{ModelError, ModelResult};
pub use job::{Job, JobDetail, JobListing, JobRepository, JobSummary, JobUpdate, NewJob};

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`)
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Decode the first row, or report `missing` as not found
fn single<T>(rows: Vec<Row>, missing: impl FnOnce() -> String) -> ModelResult<T>
where
    T: serde::de::DeserializeOwned,
{
    match rows.into_iter().next() {
        Some(row) => Ok(decode_row(row)?),
        None => Err(ModelError::NotFound(missing())),
    }
}

/// Decode the row a `RETURNING` insert must produce
fn inserted<T>(rows: Vec<Row>) -> ModelResult<T>
where
    T: serde::de::DeserializeOwned,
{
    match rows.into_iter().next() {
        Some(row) => Ok(decode_row(row)?),
        None => Err(StoreError::Decode("insert returned no row".to_string()).into()),
    }
}
