//! WebSocket client for talking to the robot.
//!
//! `RobotClient` owns a background thread with its own tokio runtime that
//! keeps a connection to the robot alive, reconnecting with backoff. Inbound
//! status frames and connection transitions are forwarded to the panel as
//! `AppEvent`s, in arrival order. Outbound commands are fire-and-forget and
//! are dropped, never queued, while the connection is down.

use anyhow::{anyhow, Context, Result};
use futures_util::{SinkExt, StreamExt};
use robot_protocol::{decode_server_frame, encode_command_frame, Command, ServerFrame};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::control::CommandSink;
use crate::core::config::ServerConfig;
use crate::core::events::{AppEvent, EventSender};

/// WebSocket client that talks to the robot.
pub struct RobotClient {
    /// Send text frames to the robot
    ws_tx: mpsc::UnboundedSender<String>,
    /// Whether the WS connection is alive
    connected: Arc<AtomicBool>,
}

impl RobotClient {
    /// Start connecting to the robot in the background.
    ///
    /// Returns immediately; `AppEvent::Connected` is sent once the socket is
    /// up.
    pub fn connect(config: &ServerConfig, event_tx: EventSender) -> Result<Self> {
        let url = config.url.clone();
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(anyhow!("Robot URL must start with ws:// or wss://: {}", url));
        }
        let backoff = Backoff::new(config.reconnect_interval_ms, config.max_backoff_ms);

        let (ws_tx, ws_rx) = mpsc::unbounded_channel::<String>();
        let connected = Arc::new(AtomicBool::new(false));
        let connected_clone = Arc::clone(&connected);

        // Spawn background thread with its own tokio runtime for the WS connection
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime for robot client")?;

        std::thread::Builder::new()
            .name("robot-ws-client".into())
            .spawn(move || {
                rt.block_on(run_ws_loop(url, ws_rx, connected_clone, event_tx, backoff));
            })
            .context("Failed to spawn robot client thread")?;

        Ok(Self { ws_tx, connected })
    }

    /// Whether the robot connection is alive.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Send a command. Dropped without error while disconnected.
    pub fn send_command(&self, command: &Command) -> Result<()> {
        if !self.is_connected() {
            debug!("Dropping command {} (not connected)", command);
            return Ok(());
        }
        let frame = encode_command_frame(command)?;
        debug!("Sending command {}", command);
        self.ws_tx
            .send(frame)
            .map_err(|_| anyhow!("Robot connection closed"))
    }
}

impl CommandSink for RobotClient {
    fn send(&mut self, command: Command) {
        if let Err(e) = self.send_command(&command) {
            warn!("Failed to send command {}: {}", command, e);
        }
    }
}

// ── Background WebSocket loop ────────────────────────────────────────

/// Capped exponential reconnect delay
#[derive(Debug, Clone, Copy)]
struct Backoff {
    initial_ms: u64,
    max_ms: u64,
    current_ms: u64,
}

impl Backoff {
    fn new(initial_ms: u64, max_ms: u64) -> Self {
        let initial_ms = initial_ms.max(1);
        Self {
            initial_ms,
            max_ms: max_ms.max(initial_ms),
            current_ms: initial_ms,
        }
    }

    fn reset(&mut self) {
        self.current_ms = self.initial_ms;
    }

    /// Delay to wait now; grows by half for the next attempt
    fn next_delay(&mut self) -> Duration {
        let delay = self.current_ms;
        self.current_ms = (self.current_ms * 3 / 2).min(self.max_ms);
        Duration::from_millis(delay)
    }
}

async fn run_ws_loop(
    url: String,
    mut outgoing_rx: mpsc::UnboundedReceiver<String>,
    connected: Arc<AtomicBool>,
    event_tx: EventSender,
    mut backoff: Backoff,
) {
    loop {
        info!("Connecting to robot at {}...", url);

        match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((ws_stream, _)) => {
                info!("Connected to robot");
                backoff.reset();

                // Frames that raced a disconnect are stale: no offline queue
                while outgoing_rx.try_recv().is_ok() {}

                connected.store(true, Ordering::Relaxed);
                if event_tx.send(AppEvent::Connected).is_err() {
                    info!("Panel gone, stopping robot client");
                    return;
                }

                let (mut ws_sink, mut ws_stream_rx) = ws_stream.split();
                let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

                // Forward outgoing frames to the WebSocket
                let writer = tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            _ = &mut stop_rx => break,
                            frame = outgoing_rx.recv() => match frame {
                                Some(text) => {
                                    if ws_sink.send(Message::Text(text.into())).await.is_err() {
                                        break;
                                    }
                                }
                                None => break,
                            },
                        }
                    }
                    // Return the receiver so we can reuse it after reconnect
                    outgoing_rx
                });

                // Read incoming frames from the robot
                let mut panel_alive = true;
                loop {
                    match ws_stream_rx.next().await {
                        Some(Ok(Message::Text(text))) => {
                            if !handle_robot_text(text.as_str(), &event_tx) {
                                panel_alive = false;
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            info!("Robot closed WS connection");
                            break;
                        }
                        Some(Ok(_)) => {} // Ignore binary/ping/pong
                        Some(Err(e)) => {
                            warn!("WS read error: {}", e);
                            break;
                        }
                        None => {
                            info!("WS stream ended");
                            break;
                        }
                    }
                }

                // Connection lost
                connected.store(false, Ordering::Relaxed);
                if !panel_alive || event_tx.send(AppEvent::Disconnected).is_err() {
                    return;
                }

                let _ = stop_tx.send(());
                match writer.await {
                    Ok(rx) => outgoing_rx = rx,
                    Err(e) => {
                        warn!("Robot client writer failed: {}", e);
                        return;
                    }
                }
            }
            Err(e) => {
                debug!("Failed to connect to robot: {}", e);
            }
        }

        let delay = backoff.next_delay();
        debug!("Reconnecting in {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

/// Decode one text frame from the robot and forward it to the panel.
///
/// Malformed frames are logged and skipped. Returns `false` once the panel's
/// event receiver is gone.
fn handle_robot_text(text: &str, event_tx: &EventSender) -> bool {
    match decode_server_frame(text) {
        Ok(ServerFrame::Status(status)) => event_tx.send(AppEvent::Status(status)).is_ok(),
        Err(e) => {
            warn!("Ignoring malformed robot frame ({}): {}", e, text);
            true
        }
    }
}
