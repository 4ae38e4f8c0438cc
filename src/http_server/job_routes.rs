//! Job HTTP Routes

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::models::job::JOB_FILTERS;
use crate::models::{Job, JobDetail, JobListing, JobRepository, JobUpdate, NewJob};
use crate::query::FilterCriteria;

use super::errors::{ApiError, ApiResult};
use super::state::{RequireAdmin, SharedState};

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobDetail,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Job routes, mounted under `/jobs`
pub fn job_routes(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

/// Path ids that do not fit an `i32` are rejected as bad requests
fn job_id(path: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    let Path(id) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(id)
}

/// `GET /jobs?title=&minSalary=&hasEquity=`
async fn list_handler(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<JobListResponse>> {
    let criteria = FilterCriteria::from(query);
    let report = JOB_FILTERS.validate(&criteria);
    if let Some(error) = report.error {
        return Err(ApiError::BadRequest(error));
    }

    let jobs = JobRepository::new(state.store.as_ref())
        .find_all(Some(&criteria))
        .await?;
    Ok(Json(JobListResponse { jobs }))
}

async fn get_handler(
    State(state): State<SharedState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<JobDetailResponse>> {
    let id = job_id(id)?;
    let job = JobRepository::new(state.store.as_ref()).get(id).await?;
    Ok(Json(JobDetailResponse { job }))
}

async fn create_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    input.validate()?;

    let job = JobRepository::new(state.store.as_ref())
        .create(input)
        .await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

async fn update_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let id = job_id(id)?;
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    input.validate()?;

    let job = JobRepository::new(state.store.as_ref())
        .update(id, input)
        .await?;
    Ok(Json(JobResponse { job }))
}

async fn delete_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = job_id(id)?;
    JobRepository::new(state.store.as_ref()).remove(id).await?;
    Ok(Json(DeletedResponse { deleted: id }))
}
