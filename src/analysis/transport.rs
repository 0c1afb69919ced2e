use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Provider calls can run long; generous ceiling on the blocking client.
const REQUEST_TIMEOUT_SECS: u64 = 180;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Raw HTTP answer handed back to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One outbound JSON POST. Backends never touch the network directly.
pub trait HttpTransport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<HttpResponse, TransportError>;
}

/// Blocking reqwest transport. Must be called off the async executor.
pub struct ReqwestTransport {
    client: OnceLock<reqwest::blocking::Client>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: OnceLock::new(),
        }
    }

    /// Built on first use so construction happens on the calling (blocking) thread.
    fn client(&self) -> Result<&reqwest::blocking::Client, TransportError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError(format!("Failed to create HTTP client: {e}")))?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client()?.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                TransportError(format!("Request timed out after {REQUEST_TIMEOUT_SECS}s"))
            } else if e.is_connect() {
                TransportError(format!("Could not connect to {url}"))
            } else {
                TransportError(e.to_string())
            }
        })?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .text()
            .map_err(|e| TransportError(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// Canned transport for tests: replays one response and records each call.
pub struct MockTransport {
    outcome: Result<HttpResponse, TransportError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

/// What the last `post_json` call sent.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl MockTransport {
    pub fn ok(body: Value) -> Self {
        Self::respond(200, "OK", body.to_string())
    }

    pub fn respond(status: u16, reason: &str, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                reason: reason.to_string(),
                body: body.into(),
            }),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(TransportError(message.to_string())),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

impl HttpTransport for MockTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                body: body.clone(),
            });
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mock_transport_counts_calls_and_records_request() {
        let transport = MockTransport::ok(json!({"ok": true}));
        assert_eq!(transport.call_count(), 0);

        let resp = transport
            .post_json(
                "http://provider.test/v1/x",
                &[("x-api-key", "k".to_string())],
                &json!({"a": 1}),
            )
            .unwrap();
        assert!(resp.is_success());
        assert_eq!(transport.call_count(), 1);

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.url, "http://provider.test/v1/x");
        assert_eq!(recorded.headers[0], ("x-api-key".to_string(), "k".to_string()));
        assert_eq!(recorded.body["a"], 1);
    }

    #[test]
    fn mock_transport_replays_failures() {
        let transport = MockTransport::failing("connection reset");
        let err = transport.post_json("http://x", &[], &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn non_2xx_is_not_success() {
        let resp = HttpResponse {
            status: 500,
            reason: "Internal Server Error".into(),
            body: String::new(),
        };
        assert!(!resp.is_success());
    }

    #[test]
    fn reqwest_transport_defers_client_construction() {
        let transport = ReqwestTransport::new();
        assert!(transport.client.get().is_none());
    }
}
