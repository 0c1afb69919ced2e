use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::backend::{
    check_status, completion_or_placeholder, require_key, trim_base_url, AnalysisBackend,
    BackendKind,
};
use super::prompt::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::transport::HttpTransport;
use super::{AnalysisError, AnalysisRequest};

const PROVIDER: &str = "OpenAI";
const API_KEY_VAR: &str = "OPENAI_API_KEY";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 0.7;

/// OpenAI chat-completions backend.
pub struct OpenAiBackend {
    api_key: Option<String>,
    model: String,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl OpenAiBackend {
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

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AnalysisBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenAi
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let api_key = require_key(self.api_key.as_deref(), PROVIDER, API_KEY_VAR)?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": ANALYSIS_SYSTEM_PROMPT },
                { "role": "user", "content": build_analysis_prompt(&request.patient_summary) },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });
        let headers = [
            ("Content-Type", "application/json".to_string()),
            ("Authorization", format!("Bearer {api_key}")),
        ];

        let response = self
            .transport
            .post_json(&self.endpoint(), &headers, &body)
            .map_err(|e| AnalysisError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;
        let raw = check_status(PROVIDER, response)?;

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&raw).map_err(|e| AnalysisError::MalformedResponse {
                provider: PROVIDER,
                detail: e.to_string(),
            })?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        Ok(completion_or_placeholder(PROVIDER, text))
    }
}
