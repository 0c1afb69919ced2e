use std::sync::Arc;

use super::backend::{AnalysisBackend, BackendKind};
use super::claude::ClaudeBackend;
use super::mock::MockBackend;
use super::openai::OpenAiBackend;
use super::transport::{HttpTransport, ReqwestTransport};
use super::{AnalysisError, AnalysisRequest, AnalysisResponse};
use crate::config::AnalysisConfig;

/// Routes analysis requests to the backend chosen at startup.
///
/// Holds no per-call state: concurrent `analyze` calls are independent and
/// are not deduplicated here.
pub struct AnalysisDispatcher {
    backend: Box<dyn AnalysisBackend>,
}

impl AnalysisDispatcher {
    /// Dispatcher using the real HTTP transport.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Dispatcher over an injected transport (tests, proxies).
    pub fn with_transport(config: &AnalysisConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let backend: Box<dyn AnalysisBackend> = match config.service {
            BackendKind::OpenAi => Box::new(OpenAiBackend::new(
                config.openai_api_key.clone(),
                &config.openai_model,
                &config.openai_base_url,
                transport,
            )),
            BackendKind::Claude => Box::new(ClaudeBackend::new(
                config.anthropic_api_key.clone(),
                &config.claude_model,
                &config.anthropic_base_url,
                transport,
            )),
            BackendKind::Mock => Box::new(MockBackend::new(config.mock_delay)),
        };
        Self { backend }
    }

    pub fn with_backend(backend: Box<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Run one analysis. Never fails: errors come back in `error`.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let kind = self.backend.kind();
        if request.patient_summary.trim().is_empty() {
            tracing::warn!(backend = %kind, "Analysis requested with an empty summary");
            return AnalysisResponse::failure(AnalysisError::EmptySummary.to_string());
        }

        tracing::debug!(
            backend = %kind,
            summary_len = request.patient_summary.len(),
            "Dispatching analysis"
        );
        let started = std::time::Instant::now();
        let result = self.backend.analyze(request);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => {
                tracing::info!(backend = %kind, elapsed_ms, len = text.len(), "Analysis complete")
            }
            Err(e) => tracing::warn!(backend = %kind, elapsed_ms, error = %e, "Analysis failed"),
        }
        AnalysisResponse::from(result)
    }
}
