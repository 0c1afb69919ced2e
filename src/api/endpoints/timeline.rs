//! Patient timeline endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::db;
use crate::models::{NewTimelineEntry, TimelineEntry};

/// `GET /api/patients/:id/timeline`: newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TimelineEntry>>, ApiError> {
    let patient_id = parse_id(&id)?;
    let entries = ctx
        .with_db(move |conn| {
            db::ensure_patient_exists(conn, &patient_id)?;
            db::list_timeline(conn, &patient_id)
        })
        .await?;
    Ok(Json(entries))
}

/// `POST /api/patients/:id/timeline`
pub async fn create(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(new): Json<NewTimelineEntry>,
) -> Result<(StatusCode, Json<TimelineEntry>), ApiError> {
    let patient_id = parse_id(&id)?;
    let entry = ctx
        .with_db(move |conn| db::create_timeline_entry(conn, &patient_id, new))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
