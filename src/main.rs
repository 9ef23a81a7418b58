// Hide console window on Windows release builds
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

//! Robot Panel - Entry Point
//!
//! Loads configuration, starts the robot client and runs the panel window.

use anyhow::{anyhow, Result};
use clap::Parser;
use robot_panel::{
    core::{config::Config, events::EventSender},
    window::PanelApp,
    Controller, RobotClient,
};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "robot-panel", about = "Remote-control panel for the robot")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Robot WebSocket URL (overrides the config file)
    #[arg(long)]
    url: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("Starting robot panel");

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.url {
        config.server.url = url;
    }
    info!("Configuration loaded (robot at {})", config.server.url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Robot Panel")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Robot Panel",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if config.window.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });

            // Create event channel; every event wakes the window
            let (event_tx, event_rx) = mpsc::unbounded_channel();
            let event_sender = EventSender::new(event_tx).with_repaint(cc.egui_ctx.clone());

            let client = RobotClient::connect(&config.server, event_sender)?;
            let controller = Controller::new(config.control.initial_speed, config.labels, client);

            Ok(Box::new(PanelApp::new(controller, event_rx)))
        }),
    )
    .map_err(|e| anyhow!("Panel window failed: {}", e))?;

    Ok(())
}
