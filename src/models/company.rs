//! # Companies
//!
//! Company records are keyed by a caller-chosen handle that never changes
//! after creation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checks;
use super::errors::{ModelError, ModelResult};
use super::job::JobSummary;
use super::{inserted, single};
use crate::query::{
    compile_partial_update, ColumnMap, Conditions, FilterCriteria, FilterField, FilterSpec,
    SqlValue,
};
use crate::store::{decode_rows, Store, StoreError};

/// Searchable company fields, in predicate order
pub const COMPANY_FILTERS: FilterSpec = FilterSpec::new(&[
    FilterField::lower_bound("minEmployees", "num_employees"),
    FilterField::upper_bound("maxEmployees", "num_employees"),
    FilterField::contains("name", "name"),
]);

/// External field name to column name
pub const COMPANY_COLUMNS: &ColumnMap = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

const COMPANY_FIELDS: &str =
    r#"handle, name, description, num_employees AS "numEmployees", logo_url AS "logoUrl""#;

/// A company as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company with its job postings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Payload for creating a company
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> ModelResult<()> {
        checks::handle(&self.handle)?;
        checks::non_blank("name", &self.name)?;
        checks::non_negative("numEmployees", self.num_employees)?;
        checks::http_url("logoUrl", self.logo_url.as_deref())
    }
}

/// Partial update payload; handle is not updatable.
///
/// `numEmployees` and `logoUrl` accept an explicit `null` to clear them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(name) = &self.name {
            checks::non_blank("name", name)?;
        }
        checks::non_negative("numEmployees", self.num_employees.flatten())?;
        checks::http_url("logoUrl", self.logo_url.as_ref().and_then(|u| u.as_deref()))
    }

    /// Present fields in declaration order
    pub fn into_fields(self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            fields.push(("name", SqlValue::from(name)));
        }
        if let Some(description) = self.description {
            fields.push(("description", SqlValue::from(description)));
        }
        if let Some(num_employees) = self.num_employees {
            fields.push(("numEmployees", SqlValue::nullable(num_employees)));
        }
        if let Some(logo_url) = self.logo_url {
            fields.push(("logoUrl", SqlValue::nullable(logo_url)));
        }
        fields
    }
}

/// Company persistence
pub struct CompanyRepository<'a> {
    store: &'a dyn Store,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Create a company.
    ///
    /// The handle pre-check gives a clear error; the primary-key constraint
    /// catches the race between check and insert and reports the same
    /// conflict.
    pub async fn create(&self, company: NewCompany) -> ModelResult<Company> {
        let duplicate = self
            .store
            .query(
                "SELECT handle FROM companies WHERE handle = $1",
                &[SqlValue::from(company.handle.as_str())],
            )
            .await?;
        if !duplicate.is_empty() {
            warn!(handle = %company.handle, "duplicate company handle");
            return Err(duplicate_company(&company.handle));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPANY_FIELDS
        );
        let params = vec![
            SqlValue::from(company.handle.as_str()),
            SqlValue::from(company.name),
            SqlValue::from(company.description),
            SqlValue::nullable(company.num_employees),
            SqlValue::nullable(company.logo_url),
        ];

        let rows = self.store.query(&sql, &params).await.map_err(|err| match err {
            StoreError::UniqueViolation(constraint) => {
                warn!(handle = %company.handle, %constraint, "company insert hit unique constraint");
                duplicate_company(&company.handle)
            }
            other => other.into(),
        })?;

        let created: Company = inserted(rows)?;
        info!(handle = %created.handle, "company created");
        Ok(created)
    }

    /// All companies ordered by name, optionally narrowed by search criteria
    pub async fn find_all(&self, criteria: Option<&FilterCriteria>) -> ModelResult<Vec<Company>> {
        let conditions = match criteria {
            Some(criteria) if !criteria.is_empty() => COMPANY_FILTERS.compile(criteria)?,
            _ => Conditions::default(),
        };

        let sql = format!(
            "SELECT {} FROM companies{} ORDER BY name",
            COMPANY_FIELDS,
            conditions.where_clause()
        );
        debug!(%sql, values = conditions.values.len(), "company search");

        let rows = self.store.query(&sql, &conditions.values).await?;
        Ok(decode_rows(rows)?)
    }

    /// One company with its jobs
    pub async fn get(&self, handle: &str) -> ModelResult<CompanyDetail> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_FIELDS);
        let rows = self.store.query(&sql, &[SqlValue::from(handle)]).await?;
        let company: Company = single(rows, || no_company(handle))?;

        let rows = self
            .store
            .query(
                "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
                &[SqlValue::from(handle)],
            )
            .await?;
        let jobs = decode_rows(rows)?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update; fails on an empty payload before touching the store
    pub async fn update(&self, handle: &str, data: CompanyUpdate) -> ModelResult<Company> {
        let set = compile_partial_update(data.into_fields(), COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            set.clause,
            set.next_placeholder(),
            COMPANY_FIELDS
        );
        let mut values = set.values;
        values.push(SqlValue::from(handle));
        debug!(%sql, values = values.len(), "company update");

        let rows = self.store.query(&sql, &values).await.map_err(|err| match err {
            StoreError::UniqueViolation(_) => {
                ModelError::conflict(format!("Duplicate company name for: {}", handle))
            }
            other => other.into(),
        })?;

        let updated = single(rows, || no_company(handle))?;
        info!(%handle, "company updated");
        Ok(updated)
    }

    pub async fn remove(&self, handle: &str) -> ModelResult<()> {
        let rows = self
            .store
            .query(
                "DELETE FROM companies WHERE handle = $1 RETURNING handle",
                &[SqlValue::from(handle)],
            )
            .await?;
        if rows.is_empty() {
            return Err(ModelError::NotFound(no_company(handle)));
        }
        info!(%handle, "company removed");
        Ok(())
    }
}

fn no_company(handle: &str) -> String {
    format!("No company: {}", handle)
}

fn duplicate_company(handle: &str) -> ModelError {
    ModelError::conflict(format!("Duplicate company: {}", handle))
}
