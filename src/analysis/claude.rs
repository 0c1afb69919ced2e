use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::backend::{
    check_status, completion_or_placeholder, require_key, trim_base_url, AnalysisBackend,
    BackendKind,
};
use super::prompt::build_analysis_prompt;
use super::transport::HttpTransport;
use super::{AnalysisError, AnalysisRequest};

const PROVIDER: &str = "Claude";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;

/// Anthropic messages backend.
pub struct ClaudeBackend {
    api_key: Option<String>,
    model: String,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ClaudeBackend {
    pub fn new(
        api_key: Option<String>,
        model: &str,
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            base_url: trim_base_url(base_url),
            transport,
        }
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnalysisBackend for ClaudeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Claude
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let api_key = require_key(self.api_key.as_deref(), PROVIDER, API_KEY_VAR)?;

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": build_analysis_prompt(&request.patient_summary) },
            ],
        });
        let headers = [
            ("Content-Type", "application/json".to_string()),
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ];

        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .transport
            .post_json(&url, &headers, &body)
            .map_err(|e| AnalysisError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;
        let raw = check_status(PROVIDER, response)?;

        let parsed: MessagesResponse =
            serde_json::from_str(&raw).map_err(|e| AnalysisError::MalformedResponse {
                provider: PROVIDER,
                detail: e.to_string(),
            })?;
        let text = parsed.content.into_iter().next().and_then(|block| block.text);

        Ok(completion_or_placeholder(PROVIDER, text))
    }
}
