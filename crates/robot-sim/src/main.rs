//! Robot simulator - Stand-in for the robot's WebSocket server
//!
//! Accepts `comando` frames on `/ws`, applies them to a simulated robot and
//! broadcasts the resulting status to every connected panel.

mod rpc;
mod state;
mod ws;

use clap::Parser;
use parking_lot::Mutex;
use robot_protocol::{Speed, StatusMessage, DEFAULT_ROBOT_ADDR, DEFAULT_SPEED, WS_PATH};
use state::RobotState;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shared state across the simulator (must be Send + Sync for axum)
pub struct SimState {
    /// Simulated robot
    pub robot: Mutex<RobotState>,
    /// Status broadcast to all connected clients
    pub status_tx: broadcast::Sender<StatusMessage>,
}

impl SimState {
    pub fn new(speed: Speed) -> Self {
        let (status_tx, _) = broadcast::channel(64);
        Self {
            robot: Mutex::new(RobotState::new(speed)),
            status_tx,
        }
    }

    pub fn status(&self) -> StatusMessage {
        self.robot.lock().status()
    }

    /// Apply a command token and broadcast the resulting status
    pub fn handle_command(&self, token: &str) -> StatusMessage {
        let status = {
            let mut robot = self.robot.lock();
            robot.apply_token(token);
            robot.status()
        };
        // No receivers is fine: nobody is listening yet
        let _ = self.status_tx.send(status.clone());
        status
    }
}

#[derive(Parser)]
#[command(name = "robot-sim", about = "Simulated robot for the robot panel")]
struct Cli {
    /// Listen address
    #[arg(long, default_value = DEFAULT_ROBOT_ADDR)]
    listen: String,

    /// Initial speed (0-100)
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = clap::value_parser!(u8).range(0..=100))]
    speed: u8,
}

pub fn router(state: Arc<SimState>) -> axum::Router {
    axum::Router::new()
        .route(WS_PATH, axum::routing::get(ws::ws_handler))
        .route("/api/status", axum::routing::get(rpc::get_status))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let speed = Speed::clamped(cli.speed as i64);

    info!("Starting robot simulator on {}", cli.listen);

    let state = Arc::new(SimState::new(speed));
    let app = router(Arc::clone(&state));

    let listener = match tokio::net::TcpListener::bind(&cli.listen).await {
        Ok(l) => {
            info!("Listening on {}", cli.listen);
            l
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", cli.listen, e);
            return Err(e.into());
        }
    };

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    Ok(())
}
