//! Dosha assessments and prakriti/vikriti analysis.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::db;
use crate::models::{Assessment, DoshaAnalysis, NewAssessment};

/// `GET /api/patients/:id/assessments`: newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Assessment>>, ApiError> {
    let patient_id = parse_id(&id)?;
    let assessments = ctx
        .with_db(move |conn| {
            db::ensure_patient_exists(conn, &patient_id)?;
            db::list_assessments(conn, &patient_id)
        })
        .await?;
    Ok(Json(assessments))
}

/// `POST /api/patients/:id/assessments`
pub async fn create(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(new): Json<NewAssessment>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    let patient_id = parse_id(&id)?;
    let assessment = ctx
        .with_db(move |conn| db::create_assessment(conn, &patient_id, new))
        .await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// One element of a bulk import: the assessment fields plus its patient.
#[derive(Deserialize)]
pub struct BulkAssessment {
    pub patient_id: Uuid,
    #[serde(flatten)]
    pub assessment: NewAssessment,
}

/// `POST /api/assessments/bulk`: all stored in one transaction, or none.
pub async fn bulk_create(
    State(ctx): State<ApiContext>,
    Json(batch): Json<Vec<BulkAssessment>>,
) -> Result<(StatusCode, Json<Vec<Assessment>>), ApiError> {
    if batch.is_empty() {
        return Err(ApiError::BadRequest("No assessments supplied".into()));
    }
    let batch = batch
        .into_iter()
        .map(|item| (item.patient_id, item.assessment))
        .collect();
    let created = ctx
        .with_db(move |conn| db::bulk_create_assessments(conn, batch))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/patients/:id/dosha-analysis`: from the latest assessment.
pub async fn dosha_analysis(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DoshaAnalysis>, ApiError> {
    let patient_id = parse_id(&id)?;
    ctx.with_db(move |conn| db::get_patient_dosha_analysis(conn, &patient_id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No assessments recorded for patient {patient_id}")))
}
