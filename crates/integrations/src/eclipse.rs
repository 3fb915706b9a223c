//! Eclipse analytics endpoint: typed request/response client.
//!
//! The client is only constructed from complete credentials; a missing URL
//! or token never reaches the network.

use dashboard_core::config::{EclipseConfig, EclipseCredentials};
use dashboard_core::{DashboardResult, FetchError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EclipseRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

impl EclipseRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EclipseResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

pub struct EclipseClient {
    http: reqwest::Client,
    credentials: EclipseCredentials,
}

impl EclipseClient {
    /// Fails with `NotConfigured` when either setting is absent or blank.
    pub fn new(config: &EclipseConfig, timeout: Duration) -> DashboardResult<Self> {
        let credentials = config.credentials()?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, credentials })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/request", self.credentials.base_url)
    }

    /// POST the request and decode the answer. Every failure is returned as a
    /// [`FetchError`]; nothing is retried.
    pub async fn request(&self, request: &EclipseRequest) -> Result<EclipseResponse, FetchError> {
        let url = self.endpoint();
        debug!(url = %url, query = %request.query, "Sending Eclipse request");

        let result = self.send(&url, request).await;
        let outcome = match &result {
            Ok(_) => "ok".to_string(),
            Err(e) => e.kind.to_string(),
        };
        metrics::counter!("eclipse.requests", "outcome" => outcome).increment(1);
        if let Err(e) = &result {
            warn!(url = %url, kind = %e.kind, detail = %e.detail, "Eclipse request failed");
        }
        result
    }

    async fn send(&self, url: &str, request: &EclipseRequest) -> Result<EclipseResponse, FetchError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.credentials.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::network(format!("request to {} timed out", url))
                } else {
                    FetchError::network(format!("request to {} failed: {}", url, e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(format!("failed to read response body: {}", e)))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::auth(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        if !status.is_success() {
            return Err(FetchError::status(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::schema(format!("unexpected response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::FetchErrorKind;

    #[test]
    fn test_missing_settings_refuse_to_build() {
        let err = EclipseClient::new(&EclipseConfig::default(), Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_endpoint_path() {
        let config = EclipseConfig::new("https://eclipse.example/", "key");
        let client = EclipseClient::new(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "https://eclipse.example/api/request");
    }

    #[test]
    fn test_request_serialization() {
        let bare = serde_json::to_value(EclipseRequest::new("revenue last week")).unwrap();
        assert_eq!(bare, serde_json::json!({ "query": "revenue last week" }));

        let req = EclipseRequest::new("q").with_context("windowDays", serde_json::json!(30));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["context"]["windowDays"], 30);
    }

    #[test]
    fn test_response_optional_fields() {
        let resp: EclipseResponse = serde_json::from_str(r#"{"answer":"42"}"#).unwrap();
        assert_eq!(resp.answer, "42");
        assert!(resp.sources.is_none());
        assert!(resp.confidence.is_none());

        let resp: EclipseResponse =
            serde_json::from_str(r#"{"answer":"x","sources":["ga4"],"confidence":0.8}"#).unwrap();
        assert_eq!(resp.sources, Some(vec!["ga4".to_string()]));
        assert_eq!(resp.confidence, Some(0.8));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 1 on loopback is not listening in any sane test environment.
        let config = EclipseConfig::new("http://127.0.0.1:1", "key");
        let client = EclipseClient::new(&config, Duration::from_secs(2)).unwrap();
        let err = client.request(&EclipseRequest::new("q")).await.unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Network);
    }
}
