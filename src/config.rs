use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::analysis::BackendKind;

/// Application-level constants
pub const APP_NAME: &str = "Vaidya";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "vaidya=info,tower_http=warn"
}

/// Get the application data directory
/// ~/Vaidya/ on all platforms, falling back to the working directory.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default clinic database file.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("clinic.db")
}

/// Default directory for exported summary PDFs.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Analysis backend selection and provider credentials.
#[derive(Clone)]
pub struct AnalysisConfig {
    pub service: BackendKind,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_model: String,
    pub claude_model: String,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub mock_delay: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            service: BackendKind::Mock,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            claude_model: DEFAULT_CLAUDE_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

// Credentials are reported as present/absent only.
impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("service", &self.service)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<set>"))
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "<set>"))
            .field("openai_model", &self.openai_model)
            .field("claude_model", &self.claude_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("mock_delay", &self.mock_delay)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Where `POST /api/patients/:id/summary/export` saves PDFs.
    pub exports_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let service = match get("VAIDYA_AI_SERVICE") {
            None => BackendKind::Mock,
            Some(name) => BackendKind::parse(&name).unwrap_or_else(|| {
                tracing::warn!(service = %name, "Unknown analysis service, using mock");
                BackendKind::Mock
            }),
        };

        let mock_delay = match get("VAIDYA_MOCK_DELAY_MS") {
            None => Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: "VAIDYA_MOCK_DELAY_MS",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
        };

        let bind_raw = get("VAIDYA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "VAIDYA_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let analysis = AnalysisConfig {
            service,
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            openai_model: get("VAIDYA_OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            claude_model: get("VAIDYA_CLAUDE_MODEL")
                .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string()),
            openai_base_url: get("VAIDYA_OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            anthropic_base_url: get("VAIDYA_ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            mock_delay,
        };

        Ok(Self {
            db_path: get("VAIDYA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            exports_dir: get("VAIDYA_EXPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(exports_dir),
            bind_addr,
            analysis,
        })
    }
}
