//! Reference catalogs.
//!
//! - `GET|POST /api/diseases`, `GET /api/diseases/search?q=`,
//!   `GET /api/diseases/full-text?q=`, `GET /api/diseases/icd11/:code`
//! - `GET|POST /api/herbs`, `GET /api/herbs/search?q=`,
//!   `GET /api/herbs/full-text?q=`, `GET /api/herbs/indication?q=`,
//!   `GET /api/herbs/dosha/:effect`

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::endpoints::patients::SearchQuery;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{
    AyurvedicHerb, DiseaseMapping, HerbDoshaEffect, HerbSearchResult, NewAyurvedicHerb,
    NewDiseaseMapping,
};

// ═══════════════════════════════════════════════════════════
// Disease mappings
// ═══════════════════════════════════════════════════════════

pub async fn list_diseases(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<DiseaseMapping>>, ApiError> {
    let diseases = ctx.with_db(db::list_disease_mappings).await?;
    Ok(Json(diseases))
}

pub async fn create_disease(
    State(ctx): State<ApiContext>,
    Json(new): Json<NewDiseaseMapping>,
) -> Result<(StatusCode, Json<DiseaseMapping>), ApiError> {
    let disease = ctx
        .with_db(move |conn| db::create_disease_mapping(conn, new))
        .await?;
    Ok((StatusCode::CREATED, Json(disease)))
}

pub async fn search_diseases(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DiseaseMapping>>, ApiError> {
    let found = ctx
        .with_db(move |conn| db::search_disease_mappings(conn, &query.q))
        .await?;
    Ok(Json(found))
}

pub async fn full_text_diseases(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DiseaseMapping>>, ApiError> {
    let found = ctx
        .with_db(move |conn| db::full_text_search_diseases(conn, &query.q))
        .await?;
    Ok(Json(found))
}

pub async fn disease_by_icd11(
    State(ctx): State<ApiContext>,
    Path(code): Path<String>,
) -> Result<Json<DiseaseMapping>, ApiError> {
    let lookup = code.clone();
    ctx.with_db(move |conn| db::get_disease_by_icd11(conn, &lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No disease mapping for ICD-11 code {code}")))
}

// ═══════════════════════════════════════════════════════════
// Herbs
// ═══════════════════════════════════════════════════════════

pub async fn list_herbs(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<AyurvedicHerb>>, ApiError> {
    let herbs = ctx.with_db(db::list_herbs).await?;
    Ok(Json(herbs))
}

pub async fn create_herb(
    State(ctx): State<ApiContext>,
    Json(new): Json<NewAyurvedicHerb>,
) -> Result<(StatusCode, Json<AyurvedicHerb>), ApiError> {
    let herb = ctx.with_db(move |conn| db::create_herb(conn, new)).await?;
    Ok((StatusCode::CREATED, Json(herb)))
}

pub async fn search_herbs(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AyurvedicHerb>>, ApiError> {
    let found = ctx
        .with_db(move |conn| db::search_herbs(conn, &query.q))
        .await?;
    Ok(Json(found))
}

pub async fn full_text_herbs(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AyurvedicHerb>>, ApiError> {
    let found = ctx
        .with_db(move |conn| db::full_text_search_herbs(conn, &query.q))
        .await?;
    Ok(Json(found))
}

pub async fn herbs_by_indication(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<HerbSearchResult>>, ApiError> {
    let found = ctx
        .with_db(move |conn| db::search_herbs_by_indication(conn, &query.q))
        .await?;
    Ok(Json(found))
}

/// `:effect` is a wire name such as `vata` or `pitta-kapha`; anything else is 400.
pub async fn herbs_by_dosha(
    State(ctx): State<ApiContext>,
    Path(effect): Path<String>,
) -> Result<Json<Vec<AyurvedicHerb>>, ApiError> {
    let effect = HerbDoshaEffect::from_str(&effect)?;
    let herbs = ctx
        .with_db(move |conn| db::get_herbs_by_dosha(conn, effect))
        .await?;
    Ok(Json(herbs))
}
