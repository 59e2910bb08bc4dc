//! Socket client integration tests
//!
//! Each test runs the client against a local WebSocket server on a loopback port.
//!
//! Run with: cargo test -p integration-tests --test socket_tests

use std::sync::Arc;
use std::time::Duration;

use integration_tests::{
    anonymous_identity, eventually, rotating_identity, test_config, test_identity, test_sign,
    RecordingHandler, ServerFrame, TestSocketServer, TEST_ACCOUNT, TEST_DEVICE, TEST_TOKEN,
};
use ndc_socket::{CloseOutcome, ConnectOutcome, SocketError, SocketHandler, HEARTBEAT_FRAME};
use serde_json::json;

async fn connected(
    server: &mut TestSocketServer,
) -> (SocketHandler, Arc<RecordingHandler>) {
    let recorder = RecordingHandler::new();
    let handler = SocketHandler::new(
        test_config(server.url()),
        Arc::new(test_identity()),
        recorder.clone(),
    );

    let outcome = handler.connect().await.expect("connect failed");
    assert!(matches!(outcome, ConnectOutcome::Connected { .. }));
    server.next_handshake().await.expect("handshake");
    (handler, recorder)
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[tokio::test]
async fn test_handshake_carries_signed_identity() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url()),
        Arc::new(test_identity()),
        RecordingHandler::new(),
    );

    let outcome = handler.connect().await.unwrap();
    let handshake = server.next_handshake().await.unwrap();

    let signbody = handshake.signbody().expect("signbody query parameter");
    let (device, time) = signbody.split_once("%7C").expect("encoded separator");
    assert_eq!(device, TEST_DEVICE);
    let time: i64 = time.parse().expect("unix time");
    assert!(time > 1_600_000_000);
    assert_eq!(handshake.uri, format!("/?signbody={TEST_DEVICE}%7C{time}"));

    assert_eq!(handshake.header("AUID"), Some(TEST_ACCOUNT));
    assert_eq!(
        handshake.header("NDCAUTH"),
        Some(format!("sid={TEST_TOKEN}").as_str())
    );
    assert_eq!(handshake.header("NDCLANG"), Some("en"));
    assert_eq!(handshake.header("NDCDEVICEID"), Some(TEST_DEVICE));
    assert_eq!(
        handshake.header("NDC-MSG-SIG"),
        Some(test_sign(&format!("{TEST_DEVICE}|{time}")).as_str())
    );

    let url = format!("{}/?signbody={TEST_DEVICE}%7C{time}", server.url());
    assert_eq!(outcome, ConnectOutcome::Connected { url: url.clone() });
    assert_eq!(handler.current_url().await, Some(url));
    assert_eq!(handler.base_url().await, Some(server.url()));
    assert!(handler.is_active().await);
    assert!(handler.is_connected().await);
}

#[tokio::test]
async fn test_connect_without_token_does_nothing() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url()),
        Arc::new(anonymous_identity()),
        RecordingHandler::new(),
    );

    assert_eq!(handler.connect().await.unwrap(), ConnectOutcome::NoSession);
    server
        .expect_no_handshake(Duration::from_millis(300))
        .await
        .unwrap();
    assert!(!handler.is_active().await);
    assert!(!handler.is_connected().await);
}

#[tokio::test]
async fn test_rotating_device_id_changes_per_connect() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url()),
        Arc::new(rotating_identity()),
        RecordingHandler::new(),
    );

    handler.connect().await.unwrap();
    let first = server.next_handshake().await.unwrap();
    handler.connect().await.unwrap();
    let second = server.next_handshake().await.unwrap();

    let first_device = first.header("NDCDEVICEID").unwrap().to_string();
    let second_device = second.header("NDCDEVICEID").unwrap().to_string();
    assert_ne!(first_device, second_device);
    assert!(first.signbody().unwrap().starts_with(&first_device));
    assert!(second.signbody().unwrap().starts_with(&second_device));
}

#[tokio::test]
async fn test_connect_replaces_existing_socket() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (handler, _recorder) = connected(&mut server).await;

    handler.connect().await.unwrap();
    server.next_handshake().await.unwrap();
    server.wait_closed().await.unwrap();

    // The replacement is live
    handler.send(r#"{"t":1}"#).await.unwrap();
    assert_eq!(server.next_text().await.unwrap(), r#"{"t":1}"#);
}

#[tokio::test]
async fn test_connect_failure_is_reported() {
    let handler = SocketHandler::new(
        test_config("ws://127.0.0.1:1"),
        Arc::new(test_identity()),
        RecordingHandler::new(),
    );

    let err = handler.connect().await.unwrap_err();
    assert!(matches!(err, SocketError::WebSocket(_)));
    assert!(!handler.is_active().await);
    assert!(!handler.is_connected().await);
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[tokio::test]
async fn test_strike_frame_reaches_strike_handler() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (_handler, recorder) = connected(&mut server).await;

    let frame = json!({"t": 1000, "o": {"chatMessage": {"type": 1, "mediaType": 0}}});
    server.push_text(frame.to_string()).unwrap();

    let (method, raw) = recorder.next_call().await.unwrap();
    assert_eq!(method, "on_strike_message");
    assert_eq!(raw, frame);
}

#[tokio::test]
async fn test_unknown_frames_reach_default_handler() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (_handler, recorder) = connected(&mut server).await;

    server
        .push_text(json!({"t": 1000, "o": {"chatMessage": {"type": 999}}}).to_string())
        .unwrap();
    server
        .push_text(json!({"t": 304, "o": {"actions": [{"type": "Recording"}]}}).to_string())
        .unwrap();
    server.push_text(json!({"t": 10, "o": {}}).to_string()).unwrap();

    for _ in 0..3 {
        assert_eq!(recorder.next_call().await.unwrap().0, "on_unhandled");
    }
}

#[tokio::test]
async fn test_typing_and_host_transfer_routes() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (_handler, recorder) = connected(&mut server).await;

    server
        .push_text(json!({"t": 304, "o": {"actions": [{"type": "Typing"}]}}).to_string())
        .unwrap();
    server
        .push_text(json!({"t": 306, "o": {"actions": [{"type": "Typing"}]}}).to_string())
        .unwrap();
    server
        .push_text(json!({"t": 1000, "o": {"chatMessage": {"type": 116}}}).to_string())
        .unwrap();

    assert_eq!(recorder.next_call().await.unwrap().0, "on_user_typing_start");
    assert_eq!(recorder.next_call().await.unwrap().0, "on_user_typing_end");
    assert_eq!(recorder.next_call().await.unwrap().0, "on_chat_host_transferred");
}

#[tokio::test]
async fn test_undecodable_frame_is_dropped() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (handler, recorder) = connected(&mut server).await;

    server.push_text("definitely not json").unwrap();
    let text_message = json!({"chatMessage": {"type": 0, "mediaType": 0}});
    server
        .push_text(json!({"t": 1000, "o": text_message}).to_string())
        .unwrap();

    // Frames are processed in order, so the first call belongs to the second frame
    assert_eq!(recorder.next_call().await.unwrap().0, "on_text_message");
    assert!(recorder.drain().await.is_empty());
    assert!(handler.is_connected().await);
}

#[tokio::test]
async fn test_binary_frames_are_dispatched() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (_handler, recorder) = connected(&mut server).await;

    let frame = json!({"t": 1000, "o": {"chatMessage": {"type": 1, "mediaType": 0}}});
    server.push_binary(frame.to_string().into_bytes()).unwrap();

    let (method, raw) = recorder.next_call().await.unwrap();
    assert_eq!(method, "on_strike_message");
    assert_eq!(raw, frame);
}

// ============================================================================
// Send / Close Tests
// ============================================================================

#[tokio::test]
async fn test_send_delivers_text_frame() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (handler, _recorder) = connected(&mut server).await;

    let frame = json!({"t": 1, "o": {"content": "hi"}}).to_string();
    handler.send(&frame).await.unwrap();
    assert_eq!(server.next_frame().await.unwrap(), ServerFrame::Text(frame));
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (handler, _recorder) = connected(&mut server).await;

    assert_eq!(handler.close().await.unwrap(), CloseOutcome::Closed);
    server.wait_closed().await.unwrap();

    assert_eq!(handler.close().await.unwrap(), CloseOutcome::AlreadyClosed);
    assert!(!handler.is_active().await);
    assert!(!handler.is_connected().await);
    assert!(matches!(
        handler.send("{}").await,
        Err(SocketError::NotConnected)
    ));
}

#[tokio::test]
async fn test_peer_close_leaves_session_active() {
    let mut server = TestSocketServer::start().await.unwrap();
    let (handler, _recorder) = connected(&mut server).await;

    server.disconnect().unwrap();
    server.wait_closed().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The supervisor, not the receive loop, decides when to reconnect
    assert!(handler.is_active().await);
}

// ============================================================================
// Supervisor Tests
// ============================================================================

#[tokio::test]
async fn test_heartbeat_reaches_server() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url())
            .with_socket_enabled(true)
            .with_heartbeat_interval(Duration::from_millis(100)),
        Arc::new(test_identity()),
        RecordingHandler::new(),
    );
    handler.connect().await.unwrap();
    server.next_handshake().await.unwrap();

    let frame = server.next_text().await.unwrap();
    assert_eq!(frame, HEARTBEAT_FRAME);
    let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(value["t"], 116);
    // Followed by a protocol-level ping with the same payload
    let ping = server.next_ping().await.unwrap();
    assert_eq!(ping, HEARTBEAT_FRAME.as_bytes());

    handler.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_forced_reconnect_renews_socket() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url())
            .with_socket_enabled(true)
            .with_reconnect_interval(Duration::from_millis(300)),
        Arc::new(test_identity()),
        RecordingHandler::new(),
    );
    handler.connect().await.unwrap();
    server.next_handshake().await.unwrap();

    // The old socket is closed before the new handshake
    server.wait_closed().await.unwrap();
    let renewed = server.next_handshake().await.unwrap();
    assert_eq!(renewed.header("NDCDEVICEID"), Some(TEST_DEVICE));
    // The handshake completes server side before the client installs the socket
    eventually(|| handler.is_connected()).await.unwrap();
    assert!(handler.is_active().await);

    handler.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_no_reconnect_after_close() {
    let mut server = TestSocketServer::start().await.unwrap();
    let handler = SocketHandler::new(
        test_config(server.url())
            .with_socket_enabled(true)
            .with_reconnect_interval(Duration::from_millis(200)),
        Arc::new(test_identity()),
        RecordingHandler::new(),
    );
    handler.connect().await.unwrap();
    server.next_handshake().await.unwrap();
    handler.close().await.unwrap();

    server
        .expect_no_handshake(Duration::from_millis(700))
        .await
        .unwrap();
    assert!(handler.supervisors_running());
}
