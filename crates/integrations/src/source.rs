//! Snapshot sources and the capability check that picks between them.

use crate::eclipse::{EclipseClient, EclipseRequest};
use async_trait::async_trait;
use dashboard_core::types::{DashboardSnapshot, WINDOW_DAYS};
use dashboard_core::{AppConfig, DashboardError, FetchError};
use dashboard_reporting::DatasetGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Query the external endpoint answers with a serialized snapshot.
pub const SNAPSHOT_QUERY: &str = "dashboard_snapshot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Generated,
    External,
}

impl DataOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::External => "external",
        }
    }
}

/// Anything that can produce a complete dashboard snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    fn origin(&self) -> DataOrigin;

    async fn fetch(&self) -> Result<DashboardSnapshot, FetchError>;
}

/// In-memory synthetic data. Never fails.
#[derive(Debug, Clone, Default)]
pub struct GeneratedSource {
    generator: DatasetGenerator,
}

impl GeneratedSource {
    pub fn new(generator: DatasetGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl SnapshotSource for GeneratedSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Generated
    }

    async fn fetch(&self) -> Result<DashboardSnapshot, FetchError> {
        Ok(self.generator.generate_now())
    }
}

/// Live snapshot from the Eclipse endpoint. The answer must decode to a
/// snapshot that passes validation; anything else is a schema error.
pub struct EclipseSource {
    client: EclipseClient,
}

impl EclipseSource {
    pub fn new(client: EclipseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotSource for EclipseSource {
    fn origin(&self) -> DataOrigin {
        DataOrigin::External
    }

    async fn fetch(&self) -> Result<DashboardSnapshot, FetchError> {
        let request = EclipseRequest::new(SNAPSHOT_QUERY)
            .with_context("windowDays", serde_json::json!(WINDOW_DAYS));
        let response = self.client.request(&request).await?;
        parse_snapshot(&response.answer)
    }
}

/// Decode and validate a snapshot carried in an endpoint answer.
pub fn parse_snapshot(answer: &str) -> Result<DashboardSnapshot, FetchError> {
    let snapshot: DashboardSnapshot = serde_json::from_str(answer)
        .map_err(|e| FetchError::schema(format!("answer is not a dashboard snapshot: {}", e)))?;
    snapshot
        .validate()
        .map_err(|v| FetchError::schema(format!("snapshot rejected: {}", v)))?;
    Ok(snapshot)
}

/// The source chosen for a session, with an operator-facing notice when the
/// choice was a fallback.
pub struct SourceSelection {
    pub source: Arc<dyn SnapshotSource>,
    pub notice: Option<String>,
}

/// Use the external endpoint when it is configured, otherwise fall back to
/// generated data.
pub fn select_source(config: &AppConfig) -> Result<SourceSelection, FetchError> {
    let timeout = Duration::from_millis(config.loader.request_timeout_ms);
    match EclipseClient::new(&config.eclipse, timeout) {
        Ok(client) => {
            info!(endpoint = %client.endpoint(), "Using external analytics endpoint");
            Ok(SourceSelection {
                source: Arc::new(EclipseSource::new(client)),
                notice: None,
            })
        }
        Err(DashboardError::NotConfigured(reason)) => {
            info!(reason = %reason, "External analytics endpoint not configured, using generated data");
            Ok(SourceSelection {
                source: Arc::new(GeneratedSource::default()),
                notice: Some(format!("{}. Using generated data.", reason)),
            })
        }
        Err(DashboardError::Fetch(e)) => Err(e),
        Err(other) => Err(FetchError::network(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{EclipseConfig, FetchErrorKind};

    #[test]
    fn test_unconfigured_falls_back_to_generated() {
        let selection = select_source(&AppConfig::default()).unwrap();
        assert_eq!(selection.source.origin(), DataOrigin::Generated);
        let notice = selection.notice.unwrap();
        assert!(notice.contains("ECLIPSE_API_URL"), "{}", notice);
    }

    #[test]
    fn test_configured_selects_external() {
        let config = AppConfig {
            eclipse: EclipseConfig::new("https://eclipse.example", "key"),
            ..AppConfig::default()
        };
        let selection = select_source(&config).unwrap();
        assert_eq!(selection.source.origin(), DataOrigin::External);
        assert!(selection.notice.is_none());
    }

    #[tokio::test]
    async fn test_generated_source_is_valid() {
        let snapshot = GeneratedSource::default().fetch().await.unwrap();
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_parse_snapshot_round_trip() {
        let snapshot = DatasetGenerator::new().generate_now();
        let answer = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(parse_snapshot(&answer).unwrap(), snapshot);
    }

    #[test]
    fn test_parse_snapshot_rejects_broken_invariants() {
        let mut snapshot = DatasetGenerator::new().generate_now();
        snapshot.funnel_steps[2].visitors = 999_999;
        let answer = serde_json::to_string(&snapshot).unwrap();
        let err = parse_snapshot(&answer).unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Schema);
        assert!(err.detail.contains("Screening Complete"), "{}", err.detail);

        let err = parse_snapshot("the answer is 42").unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Schema);
    }

    #[test]
    fn test_parse_snapshot_rejects_shifted_window() {
        let mut snapshot = DatasetGenerator::new().generate_now();
        snapshot.window.end = snapshot.window.end - chrono::Duration::days(400);
        let err = parse_snapshot(&serde_json::to_string(&snapshot).unwrap()).unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Schema);
        assert!(err.detail.contains("reporting window"), "{}", err.detail);
    }

    #[test]
    fn test_parse_snapshot_rejects_negative_open_rate() {
        let mut snapshot = DatasetGenerator::new().generate_now();
        snapshot.email_campaigns[0].open_rate = -50.0;
        let err = parse_snapshot(&serde_json::to_string(&snapshot).unwrap()).unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Schema);
        assert!(err.detail.contains("email-001"), "{}", err.detail);
    }

    #[test]
    fn test_parse_snapshot_accepts_cent_amounts() {
        let mut snapshot = DatasetGenerator::new().generate_now();
        for point in &mut snapshot.revenue_data {
            point.esa_letter += 0.1;
            point.psd_letter += 0.2;
            point.total = (point.total * 100.0 + 30.0).round() / 100.0;
        }
        assert!(parse_snapshot(&serde_json::to_string(&snapshot).unwrap()).is_ok());
    }
}
