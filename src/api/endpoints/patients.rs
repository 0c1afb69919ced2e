//! Patient registration, lookup and listing.
//!
//! - `GET /api/patients`: paginated, newest first
//! - `POST /api/patients`: register one patient
//! - `POST /api/patients/bulk`: register many in one transaction
//! - `GET /api/patients/search?q=`: name / UHID / Aadhaar substring match
//! - `GET /api/patients/:id`

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::db;
use crate::models::{NewPatient, Page, Patient};

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Patient>>, ApiError> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(db::DEFAULT_PAGE_SIZE);
    let page = ctx
        .with_db(move |conn| db::list_patients(conn, page, limit))
        .await?;
    Ok(Json(page))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    Json(new): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = ctx.with_db(move |conn| db::create_patient(conn, new)).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn bulk_create(
    State(ctx): State<ApiContext>,
    Json(batch): Json<Vec<NewPatient>>,
) -> Result<(StatusCode, Json<Vec<Patient>>), ApiError> {
    if batch.is_empty() {
        return Err(ApiError::BadRequest("No patients supplied".into()));
    }
    let created = ctx
        .with_db(move |conn| db::bulk_create_patients(conn, batch))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn search(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let term = query.q.trim().to_string();
    if term.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let found = ctx
        .with_db(move |conn| db::search_patients(conn, &term))
        .await?;
    Ok(Json(found))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id)?;
    let patient = ctx.with_db(move |conn| db::require_patient(conn, &id)).await?;
    Ok(Json(patient))
}
