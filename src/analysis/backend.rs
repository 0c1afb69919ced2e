use serde::{Deserialize, Serialize};

use super::transport::HttpResponse;
use super::{AnalysisError, AnalysisRequest, NO_ANALYSIS_PLACEHOLDER};

/// Which backend the dispatcher routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    OpenAi,
    Claude,
    #[default]
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
            Self::Mock => "mock",
        }
    }

    /// Case-insensitive lookup of a configured service name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "claude" | "anthropic" => Some(Self::Claude),
            "mock" | "stub" | "" => Some(Self::Mock),
            _ => None,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text-generation backend. Implementations block for the whole call.
pub trait AnalysisBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError>;
}

/// Credential check shared by the HTTP backends; blank keys count as missing.
pub(crate) fn require_key<'a>(
    key: Option<&'a str>,
    provider: &'static str,
    env_var: &'static str,
) -> Result<&'a str, AnalysisError> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(AnalysisError::MissingCredential { provider, env_var })
}

/// Reject non-2xx answers, carrying status code and reason phrase.
pub(crate) fn check_status(
    provider: &'static str,
    response: HttpResponse,
) -> Result<String, AnalysisError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(AnalysisError::Status {
            provider,
            status: response.status,
            reason: response.reason,
        })
    }
}

/// A parsed completion that carried no text still counts as a success.
pub(crate) fn completion_or_placeholder(provider: &'static str, text: Option<String>) -> String {
    match text.filter(|t| !t.trim().is_empty()) {
        Some(text) => text,
        None => {
            tracing::warn!(provider, "Provider returned an empty completion");
            NO_ANALYSIS_PLACEHOLDER.to_string()
        }
    }
}

pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
