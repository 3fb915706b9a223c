//! End-to-end exchange with a stub Eclipse endpoint on a loopback socket.

use chrono::{TimeZone, Utc};
use dashboard_core::{AppConfig, DashboardError, EclipseConfig, FetchErrorKind, LoaderConfig};
use dashboard_integrations::{
    DashboardSession, DataOrigin, EclipseClient, EclipseRequest, EclipseResponse,
};
use dashboard_reporting::DatasetGenerator;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one HTTP response and hand back the raw request that was received.
async fn stub_endpoint(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client_for(base_url: &str) -> EclipseClient {
    let config = EclipseConfig::new(base_url, "secret-token");
    EclipseClient::new(&config, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_successful_exchange() {
    let body = r#"{"answer":"Organic search grew 14.3%","sources":["ga4"],"confidence":0.92}"#;
    let (url, server) = stub_endpoint("200 OK", body.to_string()).await;

    let request = EclipseRequest::new("How did organic search do?")
        .with_context("channel", serde_json::json!("Organic Search"));
    let response = client_for(&url).request(&request).await.unwrap();
    assert_eq!(
        response,
        EclipseResponse {
            answer: "Organic search grew 14.3%".into(),
            sources: Some(vec!["ga4".into()]),
            confidence: Some(0.92),
        }
    );

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /api/request "), "{}", raw);
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer secret-token"));
    assert!(raw.contains(r#""query":"How did organic search do?""#));
    assert!(raw.contains(r#""channel":"Organic Search""#));
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let (url, _server) = stub_endpoint("401 Unauthorized", r#"{"error":"bad token"}"#.into()).await;
    let err = client_for(&url).request(&EclipseRequest::new("q")).await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Auth);
    assert!(err.detail.contains("401"));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let (url, _server) = stub_endpoint("500 Internal Server Error", r#"{"error":"boom"}"#.into()).await;
    let err = client_for(&url).request(&EclipseRequest::new("q")).await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Status);
    assert!(err.detail.contains("boom"));
}

#[tokio::test]
async fn test_unexpected_body_is_schema_error() {
    let (url, _server) = stub_endpoint("200 OK", r#"{"result":"no answer field"}"#.into()).await;
    let err = client_for(&url).request(&EclipseRequest::new("q")).await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Schema);
}

fn configured(url: &str) -> AppConfig {
    AppConfig {
        eclipse: EclipseConfig::new(url, "secret-token"),
        loader: LoaderConfig {
            latency_ms: 0,
            ..LoaderConfig::default()
        },
    }
}

#[tokio::test]
async fn test_session_loads_external_snapshot() {
    let now = Utc.with_ymd_and_hms(2026, 2, 18, 12, 0, 0).unwrap();
    let snapshot = DatasetGenerator::new().generate_seeded(42, now);
    let answer = serde_json::to_string(&snapshot).unwrap();
    let body = serde_json::json!({ "answer": answer }).to_string();
    let (url, server) = stub_endpoint("200 OK", body).await;

    let session = DashboardSession::start(&configured(&url));
    assert_eq!(session.origin(), Some(DataOrigin::External));
    let loaded = session.wait().await.unwrap();
    assert_eq!(*loaded, snapshot);

    let raw = server.await.unwrap();
    assert!(raw.contains(r#""query":"dashboard_snapshot""#));
    assert!(raw.contains(r#""windowDays":30"#));
}

#[tokio::test]
async fn test_session_rejects_inconsistent_external_snapshot() {
    let mut snapshot = DatasetGenerator::new().generate_now();
    snapshot.campaigns[0].roi = 1;
    let answer = serde_json::to_string(&snapshot).unwrap();
    let body = serde_json::json!({ "answer": answer }).to_string();
    let (url, _server) = stub_endpoint("200 OK", body).await;

    let session = DashboardSession::start(&configured(&url));
    match session.wait().await.unwrap_err() {
        DashboardError::Fetch(e) => {
            assert_eq!(e.kind, FetchErrorKind::Schema);
            assert!(e.detail.contains("camp-001"), "{}", e.detail);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
