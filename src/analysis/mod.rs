//! AI-generated Ayurvedic analysis.
//!
//! `AnalysisDispatcher` sends a composed patient summary to one configured
//! text-generation backend (OpenAI chat completions, Anthropic messages, or
//! a local stub) and normalizes every outcome into an `AnalysisResponse`.

pub mod backend;
pub mod claude;
pub mod dispatcher;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod transport;

pub use backend::{AnalysisBackend, BackendKind};
pub use claude::ClaudeBackend;
pub use dispatcher::AnalysisDispatcher;
pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use transport::{HttpResponse, HttpTransport, MockTransport, ReqwestTransport, TransportError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned as a successful analysis when a provider answers 200 with no text.
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis generated";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{provider} API key not found. Set {env_var} in the environment")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("{provider} API error: {status} {reason}")]
    Status {
        provider: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("Patient summary is empty")]
    EmptySummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub patient_summary: String,
    pub patient_name: String,
}

impl AnalysisRequest {
    pub fn new(patient_summary: impl Into<String>, patient_name: impl Into<String>) -> Self {
        Self {
            patient_summary: patient_summary.into(),
            patient_name: patient_name.into(),
        }
    }
}

/// Normalized result: either `analysis` is non-empty and `error` is absent,
/// or `analysis` is empty and `error` carries the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn success(analysis: impl Into<String>) -> Self {
        let analysis = analysis.into();
        if analysis.trim().is_empty() {
            return Self {
                analysis: NO_ANALYSIS_PLACEHOLDER.to_string(),
                error: None,
            };
        }
        Self {
            analysis,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            analysis: String::new(),
            error: Some(if message.trim().is_empty() {
                "Failed to analyze with AI".to_string()
            } else {
                message
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<String, AnalysisError>> for AnalysisResponse {
    fn from(result: Result<String, AnalysisError>) -> Self {
        match result {
            Ok(text) => Self::success(text),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
