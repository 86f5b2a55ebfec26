//! API client tests against an in-process mock backend.
//!
//! Each test spins up a one-shot `tiny_http` server on an ephemeral port,
//! points the client at it, and asserts on both the parsed result and the
//! request the backend actually saw.
use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use logscope::api::{ApiClient, ApiError};
use logscope::config::ApiConfig;
use logscope::model::AnalysisResult;

/// What the mock backend observed about the single request it served.
struct RecordedRequest {
    method: String,
    url: String,
    body: String,
}

/// Serve exactly one request with the given status and JSON body, recording
/// what arrived. Returns the base URL to point the client at.
fn spawn_backend(status: u16, body: &'static str) -> (String, mpsc::Receiver<RecordedRequest>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock backend");
    let port = server.server_addr().to_ip().expect("ip listener").port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut request = server.recv().expect("receive request");
        let mut observed_body = String::new();
        let _ = request.as_reader().read_to_string(&mut observed_body);
        let _ = tx.send(RecordedRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
            body: observed_body,
        });

        let response = tiny_http::Response::from_string(body).with_status_code(status);
        let _ = request.respond(response);
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
}

#[test]
fn load_data_parses_points_and_mapping() {
    let (base_url, rx) = spawn_backend(
        200,
        r#"{
            "points": [
                {"x": 1, "y": 0, "original_log": "a", "id": 0},
                {"x": 2, "y": 1, "original_log": "b", "id": 1}
            ],
            "process_mapping": {"0": "sshd", "1": "cron"}
        }"#,
    );

    let data = client_for(base_url).load_data().expect("load succeeds");

    assert_eq!(data.points.len(), 2);
    assert_eq!(data.points[0].x, 1.0);
    assert_eq!(data.points[0].y, 0.0);
    assert_eq!(data.points[1].original_log, "b");
    assert_eq!(data.process_mapping.get(&0).map(String::as_str), Some("sshd"));

    let recorded = rx.recv().expect("request recorded");
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.url, "/api/load_data");
}

#[test]
fn load_data_http_error_reports_status() {
    let (base_url, _rx) = spawn_backend(500, r#"{"error": "Failed to parse logs"}"#);

    let err = client_for(base_url).load_data().unwrap_err();
    assert!(matches!(err, ApiError::Status(500)), "got {:?}", err);
}

#[test]
fn load_data_malformed_body_reports_parse_error() {
    let (base_url, _rx) = spawn_backend(200, "not json at all");

    let err = client_for(base_url).load_data().unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {:?}", err);
}

#[test]
fn load_data_unreachable_backend_reports_network_error() {
    // Port 1 is never listening; the connection is refused immediately.
    let client = client_for("http://127.0.0.1:1".to_string());

    let err = client.load_data().unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
}

#[test]
fn analyze_posts_method_and_parses_anomaly_labels() {
    let (base_url, rx) = spawn_backend(200, r#"{"type": "anomaly", "labels": [0, 1]}"#);

    let result = client_for(base_url)
        .analyze("isolation_forest")
        .expect("analyze succeeds");
    assert_eq!(result, AnalysisResult::Anomaly { labels: vec![0, 1] });

    let recorded = rx.recv().expect("request recorded");
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.url, "/api/analyze");
    let sent: serde_json::Value = serde_json::from_str(&recorded.body).expect("json body");
    assert_eq!(sent["method"], "isolation_forest");
}

#[test]
fn analyze_unknown_result_type_is_accepted() {
    let (base_url, _rx) = spawn_backend(200, r#"{"type": "clustering", "clusters": []}"#);

    let result = client_for(base_url).analyze("kmeans").expect("analyze succeeds");
    assert_eq!(result, AnalysisResult::Unknown);
}

#[test]
fn analyze_rejected_method_reports_status() {
    let (base_url, _rx) = spawn_backend(400, r#"{"error": "Unknown method"}"#);

    let err = client_for(base_url).analyze("astrology").unwrap_err();
    assert!(matches!(err, ApiError::Status(400)), "got {:?}", err);
}
