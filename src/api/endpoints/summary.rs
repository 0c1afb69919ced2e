//! Patient summary as text, as a PDF download or saved export, and the
//! one-line patient card.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::core_state::CoreError;
use crate::{db, export, summary};

#[derive(Serialize)]
pub struct SummaryResponse {
    pub patient_id: Uuid,
    pub summary: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryScope {
    /// Demographics plus every clinical section.
    #[default]
    Full,
    /// Demographics only; clinical sections carry placeholders.
    Profile,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub scope: SummaryScope,
}

#[derive(Serialize)]
pub struct ExportResponse {
    pub patient_id: Uuid,
    pub path: String,
    pub bytes: usize,
}

#[derive(Serialize)]
pub struct CardResponse {
    pub patient_id: Uuid,
    pub card: String,
}

/// `GET /api/patients/:id/summary?scope=full|profile`
pub async fn text(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let patient_id = parse_id(&id)?;
    let summary = match query.scope {
        SummaryScope::Full => {
            let bundle = ctx
                .with_db(move |conn| db::load_patient_bundle(conn, &patient_id))
                .await?;
            summary::compose_summary_today(&bundle)
        }
        SummaryScope::Profile => {
            let patient = ctx
                .with_db(move |conn| db::require_patient(conn, &patient_id))
                .await?;
            summary::compose_patient_summary(&patient, Local::now().date_naive())
        }
    };
    Ok(Json(SummaryResponse { patient_id, summary }))
}

/// `GET /api/patients/:id/summary/pdf`
pub async fn pdf(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let patient_id = parse_id(&id)?;
    let (filename, bytes) = render_pdf(&ctx, patient_id, Local::now().date_naive()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `POST /api/patients/:id/summary/export`: save the PDF in the exports directory.
pub async fn save_pdf(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ExportResponse>), ApiError> {
    let patient_id = parse_id(&id)?;
    let (filename, bytes) = render_pdf(&ctx, patient_id, Local::now().date_naive()).await?;

    let dir = ctx.core.config.exports_dir.clone();
    let size = bytes.len();
    let path = tokio::task::spawn_blocking(move || export::write_pdf(&bytes, &dir, &filename))
        .await
        .map_err(|e| ApiError::from(CoreError::Task(e.to_string())))??;

    Ok((
        StatusCode::CREATED,
        Json(ExportResponse {
            patient_id,
            path: path.display().to_string(),
            bytes: size,
        }),
    ))
}

/// `GET /api/patients/:id/card`
pub async fn card(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<CardResponse>, ApiError> {
    let patient_id = parse_id(&id)?;
    let patient = ctx
        .with_db(move |conn| db::require_patient(conn, &patient_id))
        .await?;
    Ok(Json(CardResponse {
        patient_id,
        card: summary::patient_card_line(&patient, Local::now().date_naive()),
    }))
}

/// Compose the full summary and render it; returns the download filename too.
async fn render_pdf(
    ctx: &ApiContext,
    patient_id: Uuid,
    today: NaiveDate,
) -> Result<(String, Vec<u8>), ApiError> {
    let bundle = ctx
        .with_db(move |conn| db::load_patient_bundle(conn, &patient_id))
        .await?;

    let filename = export::summary_pdf_filename(&bundle.patient.name, today);
    let bytes = tokio::task::spawn_blocking(move || {
        let text = summary::compose_summary(&bundle, today);
        export::summary_pdf(&format!("Patient Summary - {}", bundle.patient.name), &text)
    })
    .await
    .map_err(|e| ApiError::from(CoreError::Task(e.to_string())))??;

    Ok((filename, bytes))
}
