//! Robot client against a local WebSocket server

use futures_util::{SinkExt, StreamExt};
use robot_panel::core::config::ServerConfig;
use robot_panel::{AppEvent, EventSender, RobotClient};
use robot_protocol::{Command, Direction, StatusMessage};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

async fn next_event(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

#[tokio::test]
async fn test_status_and_commands_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig {
        url: format!("ws://{}/ws", addr),
        reconnect_interval_ms: 50,
        max_backoff_ms: 200,
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = RobotClient::connect(&config, EventSender::new(tx)).unwrap();

    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

    assert_eq!(next_event(&mut rx).await, AppEvent::Connected);
    assert!(client.is_connected());

    ws.send(Message::Text(
        r#"{"event":"status","data":{"modo":"manual","velocidad":80,"activo":false}}"#.into(),
    ))
    .await
    .unwrap();
    assert_eq!(
        next_event(&mut rx).await,
        AppEvent::Status(StatusMessage {
            modo: Some("manual".into()),
            velocidad: Some(80),
            activo: Some(false),
        })
    );

    client.send_command(&Command::Drive(Direction::Left)).unwrap();
    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(
        frame.into_text().unwrap().as_str(),
        r#"{"event":"comando","data":{"cmd":"L"}}"#
    );

    // Server goes away: the panel hears about it
    drop(ws);
    assert_eq!(next_event(&mut rx).await, AppEvent::Disconnected);
    assert!(!client.is_connected());

    // And the client comes back on its own
    let (stream, _) = listener.accept().await.unwrap();
    let _ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    assert_eq!(next_event(&mut rx).await, AppEvent::Connected);
}

#[tokio::test]
async fn test_commands_before_connect_are_dropped() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig {
        url: format!("ws://{}/ws", addr),
        reconnect_interval_ms: 50,
        max_backoff_ms: 200,
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = RobotClient::connect(&config, EventSender::new(tx)).unwrap();

    // Not yet accepted, so not connected
    client.send_command(&Command::STOP).unwrap();

    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    assert_eq!(next_event(&mut rx).await, AppEvent::Connected);

    client.send_command(&Command::Drive(Direction::Forward)).unwrap();
    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(
        frame.into_text().unwrap().as_str(),
        r#"{"event":"comando","data":{"cmd":"F"}}"#
    );
}
