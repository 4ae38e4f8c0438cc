//! Repository Composition Tests
//!
//! Drives the repositories against a recording store and checks the
//! statements they compose and how store failures are reported.

use jobly::models::{
    CompanyRepository, CompanyUpdate, JobRepository, JobUpdate, ModelError, NewCompany, NewJob,
};
use jobly::query::{FilterCriteria, SqlType, SqlValue};
use jobly::store::{RecordingStore, StoreError};
use rust_decimal::Decimal;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn company_row(handle: &str, name: &str) -> serde_json::Value {
    json!({
        "handle": handle,
        "name": name,
        "description": format!("Desc {}", handle),
        "numEmployees": 3,
        "logoUrl": "http://c1.img"
    })
}

fn job_row(id: i32, title: &str, equity: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "salary": 100,
        "equity": equity,
        "companyHandle": "c1"
    })
}

fn new_company(handle: &str) -> NewCompany {
    NewCompany {
        handle: handle.to_string(),
        name: format!("Company {}", handle),
        description: "Desc".to_string(),
        num_employees: Some(1),
        logo_url: None,
    }
}

// =============================================================================
// Companies
// =============================================================================

/// Getting a company issues the company lookup, then its jobs ordered by id.
#[tokio::test]
async fn test_company_get_embeds_jobs() {
    let store = RecordingStore::new();
    store
        .push_rows(vec![company_row("c1", "C1")])
        .push_rows(vec![
            json!({"id": 1, "title": "J1", "salary": 100, "equity": "0.1"}),
            json!({"id": 2, "title": "J2", "salary": 200, "equity": null}),
        ]);

    let detail = CompanyRepository::new(&store).get("c1").await.unwrap();

    assert_eq!(detail.company.handle, "c1");
    assert_eq!(detail.jobs.len(), 2);
    assert_eq!(detail.jobs[0].equity, Some(Decimal::new(1, 1)));
    assert_eq!(detail.jobs[1].equity, None);

    let executed = store.executed();
    assert_eq!(executed.len(), 2);
    assert!(executed[1].sql.contains("WHERE company_handle = $1 ORDER BY id"));
    assert_eq!(executed[1].params, vec![SqlValue::from("c1")]);
}

/// A missing company stops after the first statement.
#[tokio::test]
async fn test_company_get_missing() {
    let store = RecordingStore::new();

    let err = CompanyRepository::new(&store).get("nope").await.unwrap_err();

    assert_eq!(err, ModelError::not_found("No company: nope"));
    assert_eq!(store.executed().len(), 1);
}

/// A unique violation that slips past the pre-check is still a conflict.
#[tokio::test]
async fn test_company_create_race_is_conflict() {
    let store = RecordingStore::new();
    store
        .push_empty()
        .push_error(StoreError::UniqueViolation("companies_pkey".to_string()));

    let err = CompanyRepository::new(&store)
        .create(new_company("c9"))
        .await
        .unwrap_err();

    assert_eq!(err, ModelError::conflict("Duplicate company: c9"));
}

/// Renaming onto an existing name is a conflict, not a server error.
#[tokio::test]
async fn test_company_update_duplicate_name() {
    let store = RecordingStore::new();
    store.push_error(StoreError::UniqueViolation("companies_name_key".to_string()));

    let update = CompanyUpdate {
        name: Some("C2".to_string()),
        ..Default::default()
    };
    let err = CompanyRepository::new(&store)
        .update("c1", update)
        .await
        .unwrap_err();

    assert!(matches!(err, ModelError::Conflict(_)));
}

/// An empty update fails before any statement is issued.
#[tokio::test]
async fn test_company_update_empty() {
    let store = RecordingStore::new();

    let err = CompanyRepository::new(&store)
        .update("c1", CompanyUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err, ModelError::validation("no data supplied"));
    assert!(store.executed().is_empty());
}

/// Connection-level failures surface unchanged.
#[tokio::test]
async fn test_database_error_passes_through() {
    let store = RecordingStore::new();
    store.push_error(StoreError::Database("connection refused".to_string()));

    let err = CompanyRepository::new(&store).find_all(None).await.unwrap_err();

    assert!(matches!(err, ModelError::Store(StoreError::Database(_))));
}

// =============================================================================
// Jobs
// =============================================================================

/// Job search joins the company name and combines every predicate.
#[tokio::test]
async fn test_job_search_combined_filters() {
    let store = RecordingStore::new();
    store.push_rows(vec![json!({
        "id": 1,
        "title": "J1",
        "salary": 100,
        "equity": "0.1",
        "companyHandle": "c1",
        "companyName": "C1"
    })]);

    let criteria = FilterCriteria::new()
        .with("title", "j")
        .with("minSalary", "50")
        .with("hasEquity", "true");
    let jobs = JobRepository::new(&store)
        .find_all(Some(&criteria))
        .await
        .unwrap();

    assert_eq!(jobs[0].company_name.as_deref(), Some("C1"));

    let executed = store.last().unwrap();
    assert!(executed.sql.contains("LEFT JOIN companies AS c ON c.handle = j.company_handle"));
    assert!(executed
        .sql
        .contains("WHERE j.title ILIKE $1 AND j.salary >= $2 AND j.equity > 0"));
    assert!(executed.sql.ends_with("ORDER BY title"));
    assert_eq!(
        executed.params,
        vec![SqlValue::from("%j%"), SqlValue::Integer(50)]
    );
}

/// A job for an unknown company is reported as a missing company.
#[tokio::test]
async fn test_job_create_unknown_company() {
    let store = RecordingStore::new();
    store.push_error(StoreError::ForeignKeyViolation(
        "jobs_company_handle_fkey".to_string(),
    ));

    let err = JobRepository::new(&store)
        .create(NewJob {
            title: "J".to_string(),
            salary: None,
            equity: None,
            company_handle: "ghost".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, ModelError::not_found("No company: ghost"));
}

/// Nullable job fields bind typed nulls.
#[tokio::test]
async fn test_job_create_typed_nulls() {
    let store = RecordingStore::new();
    store.push_rows(vec![job_row(7, "J", None)]);

    let job = JobRepository::new(&store)
        .create(NewJob {
            title: "J".to_string(),
            salary: None,
            equity: None,
            company_handle: "c1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(job.id, 7);
    let insert = store.last().unwrap();
    assert_eq!(insert.params[1], SqlValue::Null(SqlType::Integer));
    assert_eq!(insert.params[2], SqlValue::Null(SqlType::Decimal));
}

/// Getting a job embeds its company.
#[tokio::test]
async fn test_job_get_embeds_company() {
    let store = RecordingStore::new();
    store
        .push_rows(vec![job_row(1, "J1", Some("0.5"))])
        .push_rows(vec![company_row("c1", "C1")]);

    let detail = JobRepository::new(&store).get(1).await.unwrap();

    assert_eq!(detail.company.name, "C1");
    assert_eq!(detail.equity, Some(Decimal::new(5, 1)));
    assert_eq!(store.executed()[1].params, vec![SqlValue::from("c1")]);
}

/// Clearing equity puts the id after the assignments.
#[tokio::test]
async fn test_job_update_clears_equity() {
    let store = RecordingStore::new();
    store.push_rows(vec![job_row(3, "J3", None)]);

    let update = JobUpdate {
        equity: Some(None),
        ..Default::default()
    };
    let job = JobRepository::new(&store).update(3, update).await.unwrap();

    assert_eq!(job.equity, None);
    let executed = store.last().unwrap();
    assert!(executed
        .sql
        .starts_with("UPDATE jobs SET \"equity\"=$1 WHERE id = $2"));
    assert_eq!(
        executed.params,
        vec![SqlValue::Null(SqlType::Decimal), SqlValue::from(3)]
    );
}

#[tokio::test]
async fn test_job_remove_missing() {
    let store = RecordingStore::new();

    let err = JobRepository::new(&store).remove(0).await.unwrap_err();

    assert_eq!(err, ModelError::not_found("No job: 0"));
}
