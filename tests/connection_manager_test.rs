//! Tests for the connection manager's lifecycle and send queue.

mod common;

use common::{ScriptedConnector, SharedConnector, WAIT};
use std::sync::Arc;
use strictly_relay::{ConnectionEvent, ConnectionManager, ConnectionState};

const URL: &str = "ws://relay.test/ws";

async fn next(manager: &mut ConnectionManager<SharedConnector>) -> Option<ConnectionEvent> {
    tokio::time::timeout(WAIT, manager.next_event())
        .await
        .expect("no connection event in time")
}

fn manager() -> (Arc<ScriptedConnector>, ConnectionManager<SharedConnector>) {
    let connector = Arc::new(ScriptedConnector::new());
    let manager = ConnectionManager::new(SharedConnector(Arc::clone(&connector)));
    (connector, manager)
}

#[tokio::test]
async fn test_frames_queued_before_open_are_sent_once_in_order() {
    let (connector, mut manager) = manager();
    let mut relay = connector.accept();

    manager.connect(URL).unwrap();
    assert_eq!(manager.state(), ConnectionState::Opening);

    manager.send("a".to_string());
    manager.send("b".to_string());
    manager.send("c".to_string());
    assert_eq!(manager.pending_len(), 3);

    assert_eq!(next(&mut manager).await, Some(ConnectionEvent::Open));
    assert_eq!(manager.state(), ConnectionState::Open);
    assert_eq!(manager.pending_len(), 0);

    manager.send("d".to_string());

    assert_eq!(relay.next_sent().await.as_deref(), Some("a"));
    assert_eq!(relay.next_sent().await.as_deref(), Some("b"));
    assert_eq!(relay.next_sent().await.as_deref(), Some("c"));
    assert_eq!(relay.next_sent().await.as_deref(), Some("d"));

    manager.close();
    assert_eq!(relay.next_sent().await, None);
    assert_eq!(connector.urls(), vec![URL.to_string()]);
}

#[tokio::test]
async fn test_connect_twice_is_rejected() {
    let (connector, mut manager) = manager();
    let _relay = connector.accept();

    manager.connect(URL).unwrap();
    let err = manager.connect("ws://other/ws").unwrap_err();
    assert_eq!(err.url, URL);
    assert_eq!(manager.state(), ConnectionState::Opening);
}

#[tokio::test]
async fn test_send_without_connection_is_dropped() {
    let (_connector, mut manager) = manager();

    manager.send("lost".to_string());
    assert_eq!(manager.state(), ConnectionState::Idle);
    assert_eq!(manager.pending_len(), 0);
    assert_eq!(manager.next_event().await, None);
}

#[tokio::test]
async fn test_close_discards_queue_and_is_idempotent() {
    let (connector, mut manager) = manager();
    let mut relay = connector.accept();

    manager.connect(URL).unwrap();
    manager.send("never".to_string());
    manager.close();
    manager.close();

    assert_eq!(manager.state(), ConnectionState::Closed);
    assert_eq!(manager.pending_len(), 0);
    assert!(!manager.is_active());

    // The link task connects, finds the manager gone, and closes without sending.
    assert_eq!(relay.next_sent().await, None);

    manager.send("after close".to_string());
    assert_eq!(manager.pending_len(), 0);
}

#[tokio::test]
async fn test_close_after_open_writes_nothing_in_flight() {
    let (connector, mut manager) = manager();
    let mut relay = connector.accept();

    manager.connect(URL).unwrap();
    manager.send("queued-before-open".to_string());
    assert_eq!(next(&mut manager).await, Some(ConnectionEvent::Open));
    manager.send("sent-while-open".to_string());
    manager.close();

    let mut written = Vec::new();
    while let Some(frame) = relay.next_sent().await {
        written.push(frame);
    }
    assert!(written.is_empty(), "written after close: {:?}", written);
    assert_eq!(manager.next_event().await, None);
}

#[tokio::test]
async fn test_messages_arrive_in_order() {
    let (connector, mut manager) = manager();
    let relay = connector.accept();

    manager.connect(URL).unwrap();
    assert_eq!(next(&mut manager).await, Some(ConnectionEvent::Open));

    relay.push("first");
    relay.push("second");
    assert_eq!(
        next(&mut manager).await,
        Some(ConnectionEvent::Message("first".to_string()))
    );
    assert_eq!(
        next(&mut manager).await,
        Some(ConnectionEvent::Message("second".to_string()))
    );
}

#[tokio::test]
async fn test_remote_close_allows_reconnect() {
    let (connector, mut manager) = manager();
    let mut first = connector.accept();
    let mut second = connector.accept();

    manager.connect(URL).unwrap();
    assert_eq!(next(&mut manager).await, Some(ConnectionEvent::Open));

    first.hang_up();
    assert_eq!(
        next(&mut manager).await,
        Some(ConnectionEvent::Closed { reason: None })
    );
    assert_eq!(manager.state(), ConnectionState::Closed);
    assert_eq!(manager.next_event().await, None);

    manager.connect(URL).unwrap();
    assert_eq!(next(&mut manager).await, Some(ConnectionEvent::Open));
    manager.send("hello again".to_string());
    assert_eq!(second.next_sent().await.as_deref(), Some("hello again"));
}

#[tokio::test]
async fn test_failed_connect_reports_closed_with_reason() {
    let (connector, mut manager) = manager();
    connector.refuse("connection refused");

    manager.connect(URL).unwrap();
    manager.send("queued".to_string());

    match next(&mut manager).await {
        Some(ConnectionEvent::Closed { reason: Some(reason) }) => {
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected closed with reason, got {:?}", other),
    }
    assert_eq!(manager.state(), ConnectionState::Closed);
    assert_eq!(manager.pending_len(), 0);
}
