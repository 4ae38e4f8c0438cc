//! Company HTTP Routes
//!
//! Reads are public; create, update and delete require an admin token.

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

use crate::models::company::COMPANY_FILTERS;
use crate::models::{Company, CompanyDetail, CompanyRepository, CompanyUpdate, NewCompany};
use crate::query::FilterCriteria;

use super::errors::{ApiError, ApiResult};
use super::state::{RequireAdmin, SharedState};

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

/// Company routes, mounted under `/companies`
pub fn company_routes(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:handle",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

fn company_handle(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    let Path(handle) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(handle)
}

/// `GET /companies?name=&minEmployees=&maxEmployees=`
async fn list_handler(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<CompanyListResponse>> {
    let criteria = FilterCriteria::from(query);
    let report = COMPANY_FILTERS.validate(&criteria);
    if let Some(error) = report.error {
        return Err(ApiError::BadRequest(error));
    }

    let companies = CompanyRepository::new(state.store.as_ref())
        .find_all(Some(&criteria))
        .await?;
    Ok(Json(CompanyListResponse { companies }))
}

async fn get_handler(
    State(state): State<SharedState>,
    handle: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<CompanyDetailResponse>> {
    let handle = company_handle(handle)?;
    let company = CompanyRepository::new(state.store.as_ref())
        .get(&handle)
        .await?;
    Ok(Json(CompanyDetailResponse { company }))
}

async fn create_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    input.validate()?;

    let company = CompanyRepository::new(state.store.as_ref())
        .create(input)
        .await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

async fn update_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    handle: Result<Path<String>, PathRejection>,
    payload: Result<Json<CompanyUpdate>, JsonRejection>,
) -> ApiResult<Json<CompanyResponse>> {
    let handle = company_handle(handle)?;
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    input.validate()?;

    let company = CompanyRepository::new(state.store.as_ref())
        .update(&handle, input)
        .await?;
    Ok(Json(CompanyResponse { company }))
}

async fn delete_handler(
    State(state): State<SharedState>,
    RequireAdmin(_admin): RequireAdmin,
    handle: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let handle = company_handle(handle)?;
    CompanyRepository::new(state.store.as_ref())
        .remove(&handle)
        .await?;
    Ok(Json(DeletedResponse { deleted: handle }))
}
