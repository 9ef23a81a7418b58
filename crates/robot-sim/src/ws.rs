//! WebSocket server: command intake and status broadcast
//!
//! Any number of panels may connect. Each gets the current status on
//! connect, then every status broadcast that follows a command from any
//! panel.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, StreamExt};
use robot_protocol::{decode_client_frame, encode_status_frame, ClientFrame, StatusMessage};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::SimState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<SimState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

async fn handle_ws_connection(socket: WebSocket, state: Arc<SimState>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Subscribe before the initial snapshot so no broadcast is missed
    let mut status_rx = state.status_tx.subscribe();
    let initial = state.status();
    info!("Panel connected");

    // Spawn writer task
    let writer = tokio::spawn(async move {
        if send_status(&mut ws_tx, &initial).await.is_err() {
            return;
        }
        loop {
            match status_rx.recv().await {
                Ok(status) => {
                    if send_status(&mut ws_tx, &status).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Panel lagging, skipped {} status updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Read loop: process incoming commands
    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => handle_ws_text(text.as_str(), &state),
            Ok(Message::Close(_)) => break,
            Err(e) => {
                warn!("WS read error: {}", e);
                break;
            }
            _ => {} // Ignore binary/ping/pong
        }
    }

    writer.abort();
    info!("Panel disconnected");
}

async fn send_status<S>(ws_tx: &mut S, status: &StatusMessage) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    let text = encode_status_frame(status).map_err(|e| warn!("Failed to encode status: {}", e))?;
    ws_tx.send(Message::Text(text.into())).await.map_err(|_| ())
}

/// Process one text frame from a panel
fn handle_ws_text(text: &str, state: &SimState) {
    match decode_client_frame(text) {
        Ok(ClientFrame::Comando(message)) => {
            debug!("Command {:?}", message.cmd);
            state.handle_command(&message.cmd);
        }
        Err(e) => warn!("Ignoring malformed frame ({}): {}", e, text),
    }
}
