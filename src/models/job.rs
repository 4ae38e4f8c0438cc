//! # Jobs
//!
//! Job postings belong to one company. Ids are assigned by the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::checks;
use super::company::Company;
use super::errors::{ModelError, ModelResult};
use super::{inserted, single};
use crate::query::{
    compile_partial_update, ColumnMap, Conditions, FilterCriteria, FilterField, FilterSpec,
    SqlValue,
};
use crate::store::{decode_rows, Store, StoreError};

/// Searchable job fields, in predicate order
pub const JOB_FILTERS: FilterSpec = FilterSpec::new(&[
    FilterField::contains("title", "j.title"),
    FilterField::lower_bound("minSalary", "j.salary"),
    FilterField::flag("hasEquity", "j.equity", "j.equity > 0"),
]);

/// Every updatable job field maps to a column of the same name
pub const JOB_COLUMNS: &ColumnMap = &[];

const JOB_FIELDS: &str = r#"id, title, salary, equity, company_handle AS "companyHandle""#;

/// A job as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A search result row, denormalized with the owning company's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// A job with a snapshot of its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Payload for creating a job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> ModelResult<()> {
        checks::non_blank("title", &self.title)?;
        checks::non_negative("salary", self.salary)?;
        checks::fraction("equity", self.equity)?;
        checks::handle(&self.company_handle)
    }
}

/// Partial update payload; id and owning company are not updatable
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(title) = &self.title {
            checks::non_blank("title", title)?;
        }
        checks::non_negative("salary", self.salary.flatten())?;
        checks::fraction("equity", self.equity.flatten())
    }

    /// Present fields in declaration order
    pub fn into_fields(self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(title) = self.title {
            fields.push(("title", SqlValue::from(title)));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", SqlValue::nullable(salary)));
        }
        if let Some(equity) = self.equity {
            fields.push(("equity", SqlValue::nullable(equity)));
        }
        fields
    }
}

/// Job persistence
pub struct JobRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> JobRepository<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Insert a job; the store enforces that the company exists
    pub async fn create(&self, job: NewJob) -> ModelResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            JOB_FIELDS
        );
        let params = vec![
            SqlValue::from(job.title),
            SqlValue::nullable(job.salary),
            SqlValue::nullable(job.equity),
            SqlValue::from(job.company_handle.as_str()),
        ];

        let rows = self.store.query(&sql, &params).await.map_err(|err| match err {
            StoreError::ForeignKeyViolation(_) => {
                ModelError::not_found(format!("No company: {}", job.company_handle))
            }
            other => other.into(),
        })?;

        let created: Job = inserted(rows)?;
        info!(id = created.id, company = %created.company_handle, "job created");
        Ok(created)
    }

    /// All jobs ordered by title, optionally narrowed by search criteria
    pub async fn find_all(
        &self,
        criteria: Option<&FilterCriteria>,
    ) -> ModelResult<Vec<JobListing>> {
        let conditions = match criteria {
            Some(criteria) if !criteria.is_empty() => JOB_FILTERS.compile(criteria)?,
            _ => Conditions::default(),
        };

        let sql = format!(
            "SELECT j.id, j.title, j.salary, j.equity, \
             j.company_handle AS \"companyHandle\", c.name AS \"companyName\" \
             FROM jobs j LEFT JOIN companies AS c ON c.handle = j.company_handle{} \
             ORDER BY title",
            conditions.where_clause()
        );
        debug!(%sql, values = conditions.values.len(), "job search");

        let rows = self.store.query(&sql, &conditions.values).await?;
        Ok(decode_rows(rows)?)
    }

    /// One job with its company embedded
    pub async fn get(&self, id: i32) -> ModelResult<JobDetail> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_FIELDS);
        let rows = self.store.query(&sql, &[SqlValue::from(id)]).await?;
        let job: Job = single(rows, || no_job(id))?;

        let rows = self
            .store
            .query(
                "SELECT handle, name, description, num_employees AS \"numEmployees\", \
                 logo_url AS \"logoUrl\" FROM companies WHERE handle = $1",
                &[SqlValue::from(job.company_handle.as_str())],
            )
            .await?;
        let company: Company = single(rows, || format!("No company: {}", job.company_handle))?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update; fails on an empty payload before touching the store
    pub async fn update(&self, id: i32, data: JobUpdate) -> ModelResult<Job> {
        let set = compile_partial_update(data.into_fields(), JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            set.clause,
            set.next_placeholder(),
            JOB_FIELDS
        );
        let mut values = set.values;
        values.push(SqlValue::from(id));
        debug!(%sql, values = values.len(), "job update");

        let rows = self.store.query(&sql, &values).await?;
        let updated = single(rows, || no_job(id))?;
        info!(id, "job updated");
        Ok(updated)
    }

    pub async fn remove(&self, id: i32) -> ModelResult<()> {
        let rows = self
            .store
            .query(
                "DELETE FROM jobs WHERE id = $1 RETURNING id",
                &[SqlValue::from(id)],
            )
            .await?;
        if rows.is_empty() {
            return Err(ModelError::NotFound(no_job(id)));
        }
        info!(id, "job removed");
        Ok(())
    }
}

fn no_job(id: i32) -> String {
    format!("No job: {}", id)
}
