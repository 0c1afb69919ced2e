//! Dashboard counters and dosha statistics.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Local;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::db;
use crate::models::{DashboardStats, DoshaAnalysis, PatientStats};

/// `GET /api/dashboard`
pub async fn dashboard(State(ctx): State<ApiContext>) -> Result<Json<DashboardStats>, ApiError> {
    let today = Local::now().date_naive();
    let stats = ctx
        .with_db(move |conn| db::get_dashboard_stats(conn, today))
        .await?;
    Ok(Json(stats))
}

/// `GET /api/patients/:id/stats`
pub async fn patient_stats(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<PatientStats>, ApiError> {
    let patient_id = parse_id(&id)?;
    let stats = ctx
        .with_db(move |conn| db::get_patient_stats(conn, &patient_id))
        .await?;
    Ok(Json(stats))
}

/// `GET /api/dosha-imbalances`: latest assessment per patient.
pub async fn dosha_imbalances(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<DoshaAnalysis>>, ApiError> {
    let rows = ctx.with_db(db::list_dosha_imbalances).await?;
    Ok(Json(rows))
}
