//! Dashboard session: one snapshot load per session with a simulated fetch
//! latency, observable as loading/ready/failed state.
//!
//! A snapshot is published whole or not at all: cancelling (or dropping the
//! session) aborts the load task before anything reaches the state channel.

use crate::source::{select_source, DataOrigin, SnapshotSource};
use dashboard_core::types::DashboardSnapshot;
use dashboard_core::{AppConfig, DashboardError, DashboardResult, FetchError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<DashboardSnapshot>),
    Failed(FetchError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn snapshot(&self) -> Option<&Arc<DashboardSnapshot>> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

pub struct DashboardSession {
    state: watch::Receiver<LoadState>,
    task: Option<JoinHandle<()>>,
    origin: Option<DataOrigin>,
    notice: Option<String>,
}

impl DashboardSession {
    /// Pick a source from `config` and start loading. Must be called inside a
    /// Tokio runtime.
    pub fn start(config: &AppConfig) -> Self {
        let latency = Duration::from_millis(config.loader.latency_ms);
        match select_source(config) {
            Ok(selection) => Self::with_source(selection.source, latency, selection.notice),
            Err(e) => {
                warn!(kind = %e.kind, detail = %e.detail, "Failed to prepare snapshot source");
                metrics::counter!("dashboard.snapshot.failed").increment(1);
                let (_, state) = watch::channel(LoadState::Failed(e));
                Self {
                    state,
                    task: None,
                    origin: None,
                    notice: None,
                }
            }
        }
    }

    pub fn with_source(source: Arc<dyn SnapshotSource>, latency: Duration, notice: Option<String>) -> Self {
        let origin = source.origin();
        let (tx, state) = watch::channel(LoadState::Loading);
        info!(origin = origin.as_str(), latency_ms = latency.as_millis() as u64, "Loading dashboard snapshot");

        let task = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let next = match source.fetch().await {
                Ok(snapshot) => {
                    metrics::counter!("dashboard.snapshot.loaded", "origin" => origin.as_str()).increment(1);
                    info!(snapshot_id = %snapshot.id, origin = origin.as_str(), "Dashboard snapshot ready");
                    LoadState::Ready(Arc::new(snapshot))
                }
                Err(e) => {
                    metrics::counter!("dashboard.snapshot.failed").increment(1);
                    warn!(kind = %e.kind, detail = %e.detail, "Dashboard snapshot load failed");
                    LoadState::Failed(e)
                }
            };
            // Receivers may all be gone; nothing to do then.
            let _ = tx.send(next);
        });

        Self {
            state,
            task: Some(task),
            origin: Some(origin),
            notice,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// Where the snapshot comes from; `None` when no source could be set up.
    pub fn origin(&self) -> Option<DataOrigin> {
        self.origin
    }

    /// Informational message when the session fell back to generated data.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Resolve once the load leaves the loading state.
    pub async fn wait(&self) -> DashboardResult<Arc<DashboardSnapshot>> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .map_err(|_| DashboardError::Cancelled)?
            .clone();
        match state {
            LoadState::Ready(snapshot) => Ok(snapshot),
            LoadState::Failed(e) => Err(e.into()),
            LoadState::Loading => Err(DashboardError::Cancelled),
        }
    }

    /// Abort a pending load. Has no effect once the load has finished.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            if !task.is_finished() {
                task.abort();
                metrics::counter!("dashboard.snapshot.cancelled").increment(1);
                info!("Dashboard snapshot load cancelled");
            }
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Start a session for `config` and wait for its snapshot.
pub async fn load_snapshot(config: &AppConfig) -> DashboardResult<Arc<DashboardSnapshot>> {
    DashboardSession::start(config).wait().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dashboard_core::FetchErrorKind;
    use dashboard_reporting::DatasetGenerator;
    use tokio::time::Instant;

    struct FailingSource;

    #[async_trait]
    impl SnapshotSource for FailingSource {
        fn origin(&self) -> DataOrigin {
            DataOrigin::External
        }

        async fn fetch(&self) -> Result<DashboardSnapshot, FetchError> {
            Err(FetchError::auth("HTTP 401: bad token"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfigured_session_loads_generated_snapshot() {
        let started = Instant::now();
        let session = DashboardSession::start(&AppConfig::default());
        assert!(session.state().is_loading());
        assert_eq!(session.origin(), Some(DataOrigin::Generated));
        assert!(session.notice().is_some());

        let snapshot = session.wait().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(600));
        assert!(snapshot.validate().is_ok());
        assert_eq!(session.state().snapshot().map(|s| s.id), Some(snapshot.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_published_before_latency() {
        let session = DashboardSession::start(&AppConfig::default());
        tokio::time::sleep(Duration::from_millis(599)).await;
        assert!(session.state().is_loading());
        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(session.wait().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_publishes_nothing() {
        let session = DashboardSession::start(&AppConfig::default());
        let mut rx = session.subscribe();
        tokio::time::sleep(Duration::from_millis(300)).await;
        session.cancel();

        let err = session.wait().await.unwrap_err();
        assert!(matches!(err, DashboardError::Cancelled));
        assert!(session.state().is_loading());
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_source_surfaces_structured_error() {
        let session = DashboardSession::with_source(Arc::new(FailingSource), Duration::from_millis(600), None);
        let err = session.wait().await.unwrap_err();
        match err {
            DashboardError::Fetch(e) => {
                assert_eq!(e.kind, FetchErrorKind::Auth);
                assert!(e.detail.contains("401"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(session.state(), LoadState::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_ready_keeps_snapshot() {
        let source = Arc::new(crate::source::GeneratedSource::new(DatasetGenerator::new()));
        let session = DashboardSession::with_source(source, Duration::from_millis(10), None);
        let snapshot = session.wait().await.unwrap();
        session.cancel();
        assert_eq!(session.state().snapshot().map(|s| s.id), Some(snapshot.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_snapshot_helper() {
        let snapshot = load_snapshot(&AppConfig::default()).await.unwrap();
        assert_eq!(snapshot.revenue_data.len(), 30);
    }
}
