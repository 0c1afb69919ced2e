//! API router.
//!
//! Returns a composable `Router` with every route nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the clinic API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route("/patients/bulk", post(endpoints::patients::bulk_create))
        .route("/patients/search", get(endpoints::patients::search))
        .route("/patients/:id", get(endpoints::patients::detail))
        .route(
            "/patients/:id/assessments",
            get(endpoints::assessments::list).post(endpoints::assessments::create),
        )
        .route(
            "/patients/:id/dosha-analysis",
            get(endpoints::assessments::dosha_analysis),
        )
        .route("/assessments/bulk", post(endpoints::assessments::bulk_create))
        .route(
            "/patients/:id/treatments",
            get(endpoints::treatments::list).post(endpoints::treatments::create),
        )
        .route(
            "/treatments/:id/status",
            put(endpoints::treatments::update_status),
        )
        .route(
            "/patients/:id/timeline",
            get(endpoints::timeline::list).post(endpoints::timeline::create),
        )
        .route("/patients/:id/stats", get(endpoints::analytics::patient_stats))
        .route("/patients/:id/summary", get(endpoints::summary::text))
        .route("/patients/:id/summary/pdf", get(endpoints::summary::pdf))
        .route(
            "/patients/:id/summary/export",
            post(endpoints::summary::save_pdf),
        )
        .route("/patients/:id/card", get(endpoints::summary::card))
        .route(
            "/patients/:id/analysis",
            post(endpoints::analysis::analyze_patient),
        )
        .route("/analysis", post(endpoints::analysis::analyze))
        .route("/dashboard", get(endpoints::analytics::dashboard))
        .route(
            "/dosha-imbalances",
            get(endpoints::analytics::dosha_imbalances),
        )
        .route(
            "/diseases",
            get(endpoints::catalog::list_diseases).post(endpoints::catalog::create_disease),
        )
        .route("/diseases/search", get(endpoints::catalog::search_diseases))
        .route("/diseases/full-text", get(endpoints::catalog::full_text_diseases))
        .route("/diseases/icd11/:code", get(endpoints::catalog::disease_by_icd11))
        .route(
            "/herbs",
            get(endpoints::catalog::list_herbs).post(endpoints::catalog::create_herb),
        )
        .route("/herbs/search", get(endpoints::catalog::search_herbs))
        .route("/herbs/full-text", get(endpoints::catalog::full_text_herbs))
        .route("/herbs/indication", get(endpoints::catalog::herbs_by_indication))
        .route("/herbs/dosha/:effect", get(endpoints::catalog::herbs_by_dosha))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", routes).layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::{AnalysisDispatcher, MockBackend};
    use crate::config::AppConfig;

    /// CoreState backed by a temp database and an instant mock backend.
    fn test_core() -> (Arc<CoreState>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("clinic.db"),
            exports_dir: dir.path().join("exports"),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            analysis: Default::default(),
        };
        let dispatcher =
            AnalysisDispatcher::with_backend(Box::new(MockBackend::new(Duration::ZERO)));
        (Arc::new(CoreState::with_dispatcher(config, dispatcher)), dir)
    }

    async fn send(core: &Arc<CoreState>, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = api_router(core.clone()).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn get_json(core: &Arc<CoreState>, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(core, req).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn send_json(
        core: &Arc<CoreState>,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(core, req).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn register(core: &Arc<CoreState>, name: &str) -> String {
        let (status, patient) =
            send_json(core, "POST", "/api/patients", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        patient["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let (core, _dir) = test_core();
        let (status, json) = get_json(&core, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["analysis_backend"], "mock");
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (core, _dir) = test_core();
        let (status, _) = get_json(&core, "/api/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn register_fetch_and_list_patient() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, patient) = get_json(&core, &format!("/api/patients/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patient["name"], "Asha Rao");

        let (status, page) = get_json(&core, "/api/patients?page=1&limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
        assert_eq!(page["data"][0]["id"], id.as_str());
        assert_eq!(page["has_more"], false);
    }

    #[tokio::test]
    async fn blank_name_is_bad_request() {
        let (core, _dir) = test_core();
        let (status, json) =
            send_json(&core, "POST", "/api/patients", json!({ "name": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn malformed_and_unknown_ids() {
        let (core, _dir) = test_core();
        let (status, _) = get_json(&core, "/api/patients/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::new_v4();
        let (status, json) = get_json(&core, &format!("/api/patients/{unknown}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");

        let (status, _) = get_json(&core, &format!("/api/patients/{unknown}/summary")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bulk_and_search() {
        let (core, _dir) = test_core();
        let (status, created) = send_json(
            &core,
            "POST",
            "/api/patients/bulk",
            json!([{ "name": "Asha Rao" }, { "name": "Ravi Kumar", "uhid": "UH-77" }]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.as_array().unwrap().len(), 2);

        let (_, found) = get_json(&core, "/api/patients/search?q=uh-7").await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["name"], "Ravi Kumar");

        let (_, none) = get_json(&core, "/api/patients/search?q=").await;
        assert!(none.as_array().unwrap().is_empty());

        let (status, _) = send_json(&core, "POST", "/api/patients/bulk", json!([])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assessments_and_dosha_analysis() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, _) = get_json(&core, &format!("/api/patients/{id}/dosha-analysis")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(
            &core,
            "POST",
            &format!("/api/patients/{id}/assessments"),
            json!({
                "prakriti": { "vata": 2, "pitta": 2, "kapha": 2 },
                "vikriti": { "vata": 2, "pitta": 5, "kapha": 2 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, list) = get_json(&core, &format!("/api/patients/{id}/assessments")).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, analysis) =
            get_json(&core, &format!("/api/patients/{id}/dosha-analysis")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analysis["primary_imbalance"], "pitta");
        assert_eq!(analysis["pitta_imbalance"], 3);

        let (_, rows) = get_json(&core, "/api/dosha-imbalances").await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bulk_assessments_across_patients() {
        let (core, _dir) = test_core();
        let asha = register(&core, "Asha Rao").await;
        let ravi = register(&core, "Ravi Kumar").await;

        let (status, created) = send_json(
            &core,
            "POST",
            "/api/assessments/bulk",
            json!([
                { "patient_id": asha, "vikriti": { "vata": 4, "pitta": 1, "kapha": 1 } },
                { "patient_id": ravi, "notes": "Baseline" }
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.as_array().unwrap().len(), 2);
        assert_eq!(created[0]["patient_id"], asha.as_str());
        assert_eq!(created[0]["vikriti"]["vata"], 4);

        let (_, list) = get_json(&core, &format!("/api/patients/{ravi}/assessments")).await;
        assert_eq!(list[0]["notes"], "Baseline");

        let (status, _) = send_json(&core, "POST", "/api/assessments/bulk", json!([])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // One unknown patient rolls back the whole batch
        let (status, _) = send_json(
            &core,
            "POST",
            "/api/assessments/bulk",
            json!([
                { "patient_id": asha },
                { "patient_id": uuid::Uuid::new_v4() }
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, list) = get_json(&core, &format!("/api/patients/{asha}/assessments")).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn treatment_status_update() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, treatment) = send_json(
            &core,
            "POST",
            &format!("/api/patients/{id}/treatments"),
            json!({ "primary_ayurvedic_diagnosis": "Amavata", "status": "active" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let treatment_id = treatment["id"].as_str().unwrap();

        let (_, dashboard) = get_json(&core, "/api/dashboard").await;
        assert_eq!(dashboard["active_treatments"], 1);
        assert_eq!(dashboard["total_patients"], 1);

        let (status, updated) = send_json(
            &core,
            "PUT",
            &format!("/api/treatments/{treatment_id}/status"),
            json!({ "status": "completed" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "completed");

        let (_, stats) = get_json(&core, &format!("/api/patients/{id}/stats")).await;
        assert_eq!(stats["treatments"], 1);
        assert_eq!(stats["active_treatments"], 0);
    }

    #[tokio::test]
    async fn timeline_round_trip() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;
        let (status, _) = send_json(
            &core,
            "POST",
            &format!("/api/patients/{id}/timeline"),
            json!({ "entry_type": "observation", "title": "Pulse steadier" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, entries) = get_json(&core, &format!("/api/patients/{id}/timeline")).await;
        assert_eq!(entries[0]["entry_type"], "observation");
        assert_eq!(entries[0]["title"], "Pulse steadier");
    }

    #[tokio::test]
    async fn summary_text_and_pdf() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, json) = get_json(&core, &format!("/api/patients/{id}/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["patient_id"], id.as_str());
        assert!(json["summary"].as_str().unwrap().contains("Asha Rao"));

        let req = Request::get(format!("/api/patients/{id}/summary/pdf"))
            .body(Body::empty())
            .unwrap();
        let response = api_router(core.clone()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn profile_summary_and_card() {
        let (core, _dir) = test_core();
        let (status, patient) = send_json(
            &core,
            "POST",
            "/api/patients",
            json!({ "name": "Asha Rao", "gender": "female", "address": "Pune" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = patient["id"].as_str().unwrap();

        let (status, json) =
            get_json(&core, &format!("/api/patients/{id}/summary?scope=profile")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["summary"].as_str().unwrap().contains("Asha Rao"));

        let (status, _) =
            get_json(&core, &format!("/api/patients/{id}/summary?scope=everything")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = get_json(&core, &format!("/api/patients/{id}/card")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["card"], "Asha Rao | Female, N/A yrs | Pune");
    }

    #[tokio::test]
    async fn summary_export_writes_pdf_to_exports_dir() {
        let (core, dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, json) = send_json(
            &core,
            "POST",
            &format!("/api/patients/{id}/summary/export"),
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let path = std::path::PathBuf::from(json["path"].as_str().unwrap());
        assert!(path.starts_with(dir.path().join("exports")));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(json["bytes"], bytes.len());

        let unknown = uuid::Uuid::new_v4();
        let (status, _) = send_json(
            &core,
            "POST",
            &format!("/api/patients/{unknown}/summary/export"),
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn disease_catalog_routes() {
        let (core, _dir) = test_core();
        let (status, _) = send_json(
            &core,
            "POST",
            "/api/diseases",
            json!({
                "icd11_code": "FA20",
                "icd11_name": "Rheumatoid arthritis",
                "ayurvedic_name": "Amavata",
                "primary_dosha": "vata",
                "samprapti": "Ama lodges in the joints"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, all) = get_json(&core, "/api/diseases").await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (_, found) = get_json(&core, "/api/diseases/search?q=amav").await;
        assert_eq!(found[0]["icd11_code"], "FA20");

        let (_, found) = get_json(&core, "/api/diseases/full-text?q=joints").await;
        assert_eq!(found[0]["ayurvedic_name"], "Amavata");

        let (status, disease) = get_json(&core, "/api/diseases/icd11/FA20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(disease["primary_dosha"], "vata");

        let (status, _) = get_json(&core, "/api/diseases/icd11/XX99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn herb_catalog_routes() {
        let (core, _dir) = test_core();
        for herb in [
            json!({
                "sanskrit_name": "Ashwagandha",
                "common_name": "Winter cherry",
                "primary_dosha_effect": "vata-kapha",
                "indications": ["Insomnia", "Joint pain"]
            }),
            json!({
                "sanskrit_name": "Guduchi",
                "primary_dosha_effect": "tridoshic",
                "indications": ["Fever"]
            }),
        ] {
            let (status, _) = send_json(&core, "POST", "/api/herbs", herb).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, all) = get_json(&core, "/api/herbs").await;
        assert_eq!(all[0]["sanskrit_name"], "Ashwagandha");

        let (_, found) = get_json(&core, "/api/herbs/search?q=cherry").await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (_, found) = get_json(&core, "/api/herbs/full-text?q=guduchi").await;
        assert_eq!(found[0]["sanskrit_name"], "Guduchi");

        let (_, found) = get_json(&core, "/api/herbs/indication?q=joint").await;
        assert_eq!(found[0]["sanskrit_name"], "Ashwagandha");
        assert!(found[0].get("id").is_none());

        let (_, found) = get_json(&core, "/api/herbs/dosha/tridoshic").await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, json) = get_json(&core, "/api/herbs/dosha/sweet").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (_, none) = get_json(&core, "/api/herbs/search?q=").await;
        assert!(none.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn patient_analysis_uses_composed_summary() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;

        let (status, json) =
            send_json(&core, "POST", &format!("/api/patients/{id}/analysis"), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["analysis"].as_str().unwrap().contains("Asha Rao"));
        assert!(json.get("error").is_none());
        assert!(!core.is_analyzing(&id.parse().unwrap()));
    }

    #[tokio::test]
    async fn concurrent_analysis_for_same_patient_conflicts() {
        let (core, _dir) = test_core();
        let id = register(&core, "Asha Rao").await;
        let _running = core.try_begin_analysis(id.parse().unwrap()).unwrap().unwrap();

        let (status, json) =
            send_json(&core, "POST", &format!("/api/patients/{id}/analysis"), json!({})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn free_form_analysis_reports_failures_in_body() {
        let (core, _dir) = test_core();
        let (status, json) = send_json(
            &core,
            "POST",
            "/api/analysis",
            json!({ "patient_summary": "   ", "patient_name": "Asha" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["analysis"], "");
        assert_eq!(json["error"], "Patient summary is empty");

        let (status, json) = send_json(
            &core,
            "POST",
            "/api/analysis",
            json!({ "patient_summary": "Name: Asha", "patient_name": "Asha" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["analysis"].as_str().unwrap().contains("Asha"));
    }
}
