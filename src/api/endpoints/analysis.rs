//! AI analysis endpoints.
//!
//! Provider calls are blocking and run on the blocking pool. Failures come
//! back as 200 with `{analysis: "", error}`; only a malformed id, an unknown
//! patient or a second concurrent request for the same patient are errors.

use axum::extract::{Path, State};
use axum::Json;

use crate::analysis::{AnalysisRequest, AnalysisResponse};
use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext};
use crate::core_state::CoreError;
use crate::{db, summary};

/// `POST /api/patients/:id/analysis`: compose the summary and analyze it.
pub async fn analyze_patient(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let patient_id = parse_id(&id)?;
    let _guard = ctx.core.try_begin_analysis(patient_id)?.ok_or_else(|| {
        ApiError::Conflict(format!("Analysis already in progress for patient {patient_id}"))
    })?;

    let bundle = ctx
        .with_db(move |conn| db::load_patient_bundle(conn, &patient_id))
        .await?;
    let dispatcher = ctx.core.dispatcher();

    let response = tokio::task::spawn_blocking(move || {
        let request = AnalysisRequest::new(
            summary::compose_summary_today(&bundle),
            bundle.patient.name.clone(),
        );
        dispatcher.analyze(&request)
    })
    .await
    .map_err(|e| ApiError::from(CoreError::Task(e.to_string())))?;

    Ok(Json(response))
}

/// `POST /api/analysis`: analyze a caller-supplied summary.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let dispatcher = ctx.core.dispatcher();
    let response = tokio::task::spawn_blocking(move || dispatcher.analyze(&request))
        .await
        .map_err(|e| ApiError::from(CoreError::Task(e.to_string())))?;
    Ok(Json(response))
}
