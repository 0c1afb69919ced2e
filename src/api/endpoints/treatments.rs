//! Treatment plans and status changes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::db;
use crate::models::{NewTreatment, Treatment, TreatmentStatus};

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: TreatmentStatus,
}

/// `GET /api/patients/:id/treatments`: newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Treatment>>, ApiError> {
    let patient_id = parse_id(&id)?;
    let treatments = ctx
        .with_db(move |conn| {
            db::ensure_patient_exists(conn, &patient_id)?;
            db::list_treatments(conn, &patient_id)
        })
        .await?;
    Ok(Json(treatments))
}

/// `POST /api/patients/:id/treatments`
pub async fn create(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(new): Json<NewTreatment>,
) -> Result<(StatusCode, Json<Treatment>), ApiError> {
    let patient_id = parse_id(&id)?;
    let treatment = ctx
        .with_db(move |conn| db::create_treatment(conn, &patient_id, new))
        .await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}

/// `PUT /api/treatments/:id/status`
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Treatment>, ApiError> {
    let treatment_id = parse_id(&id)?;
    let treatment = ctx
        .with_db(move |conn| db::update_treatment_status(conn, &treatment_id, update.status))
        .await?;
    Ok(Json(treatment))
}
