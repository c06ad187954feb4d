//! End-to-end delivery against a local stand-in for the HipChat API.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
};
use hipchat_notify::{
    AlertContext, Configuration, DeliveryError, HipChatAlarmCallback, NotificationSender,
    http::install_rustls_provider,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct CapturedRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    state.requests.lock().push(CapturedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });
    state.status
}

/// Serve every request with `status`, returning the base URL and the log of
/// received requests.
async fn spawn_mock(status: StatusCode) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record).with_state(MockState {
        status,
        requests: requests.clone(),
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), requests)
}

fn client() -> reqwest::Client {
    install_rustls_provider();
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn configuration(base_url: &str, room: &str) -> Configuration {
    Configuration::from_pairs([
        ("api_token", json!("secret123")),
        ("room", json!(room)),
        ("color", json!("red")),
        ("notify", json!(false)),
        ("message_template", json!("Stream <name> alert: <description>")),
        ("api_base_url", json!(base_url)),
    ])
}

fn alert() -> AlertContext {
    AlertContext::new("Errors", "5 matches")
}

#[tokio::test]
async fn test_no_content_is_success() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;
    let callback = HipChatAlarmCallback::with_client(configuration(&base, "ops"), client());

    callback.check_configuration().unwrap();
    callback.send(&alert()).await.unwrap();

    let requests = requests.lock();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/v2/room/ops/notification");
    assert_eq!(request.headers[header::AUTHORIZATION], "Bearer secret123");
    assert_eq!(request.headers[header::CONTENT_TYPE], "application/json");

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        body,
        json!({
            "message": "Stream Errors alert: 5 matches",
            "notify": false,
            "message_format": "text",
            "color": "red"
        })
    );
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (base, requests) = spawn_mock(StatusCode::INTERNAL_SERVER_ERROR).await;
    let callback = HipChatAlarmCallback::with_client(configuration(&base, "ops"), client());

    let err = callback.send(&alert()).await.unwrap_err();

    assert!(matches!(err, DeliveryError::UnexpectedStatus { .. }));
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
    // No retry.
    assert_eq!(requests.lock().len(), 1);
}

#[tokio::test]
async fn test_ok_is_not_success() {
    let (base, _requests) = spawn_mock(StatusCode::OK).await;
    let sender = NotificationSender::with_client(&configuration(&base, "ops"), client()).unwrap();

    let err = sender.send(&alert()).await.unwrap_err();
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_connection_failure_wraps_cause() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sender =
        NotificationSender::with_client(&configuration(&format!("http://{addr}"), "ops"), client())
            .unwrap();
    let err = sender.send(&alert()).await.unwrap_err();

    assert!(matches!(err, DeliveryError::Request { .. }));
    assert!(err.is_connection_failure());
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_reserved_characters_in_room_are_encoded_once() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;
    let room = "ops/#alerts room";
    let sender = NotificationSender::with_client(&configuration(&base, room), client()).unwrap();

    sender.send(&alert()).await.unwrap();

    let path = requests.lock()[0].path.clone();
    assert_eq!(path, "/v2/room/ops%2F%23alerts%20room/notification");

    let segment = path
        .strip_prefix("/v2/room/")
        .and_then(|rest| rest.strip_suffix("/notification"))
        .unwrap();
    assert_eq!(urlencoding::decode(segment).unwrap(), room);
}

#[tokio::test]
async fn test_malformed_base_url_fails_before_request() {
    let sender =
        NotificationSender::with_client(&configuration("::not a url::", "ops"), client()).unwrap();
    let err = sender.send(&alert()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_dot_segment_rooms_never_reach_another_endpoint() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;

    for room in [".", ".."] {
        let sender =
            NotificationSender::with_client(&configuration(&base, room), client()).unwrap();
        let err = sender.send(&alert()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::UnusableUrl { .. }), "{room}");
    }

    assert!(requests.lock().is_empty());
}

#[tokio::test]
async fn test_base_url_query_fails_before_request() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;
    let base_url = format!("{base}/?x=1");
    let sender =
        NotificationSender::with_client(&configuration(&base_url, "ops"), client()).unwrap();

    let err = sender.send(&alert()).await.unwrap_err();

    assert!(matches!(err, DeliveryError::UnusableUrl { .. }));
    assert!(requests.lock().is_empty());
}

#[tokio::test]
async fn test_base_url_path_prefix_reaches_server() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;
    let base_url = format!("{base}/hipchat/");
    let sender =
        NotificationSender::with_client(&configuration(&base_url, "ops"), client()).unwrap();

    sender.send(&alert()).await.unwrap();

    assert_eq!(requests.lock()[0].path, "/hipchat/v2/room/ops/notification");
}

#[tokio::test]
async fn test_sender_is_shared_across_concurrent_sends() {
    let (base, requests) = spawn_mock(StatusCode::NO_CONTENT).await;
    let sender = Arc::new(
        NotificationSender::with_client(&configuration(&base, "ops"), client()).unwrap(),
    );

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let sender = Arc::clone(&sender);
            tokio::spawn(async move {
                sender
                    .send(&AlertContext::new(format!("stream-{i}"), "fired"))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut messages: Vec<String> = requests
        .lock()
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["message"].as_str().unwrap().to_string()
        })
        .collect();
    messages.sort();
    assert_eq!(
        messages,
        vec![
            "Stream stream-0 alert: fired",
            "Stream stream-1 alert: fired",
            "Stream stream-2 alert: fired"
        ]
    );
}
