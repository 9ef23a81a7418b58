//! Robot Panel
//!
//! A desktop remote-control panel for a small mobile robot reached over a
//! WebSocket.
//!
//! # Features
//! - Mode selection (manual, line following, sumo)
//! - Directional pad and keyboard driving with hold-to-move semantics
//! - Speed slider with live preview and commit on release
//! - Live status reflected from the robot, with connection indicator

pub mod client;
pub mod control;
pub mod core;
pub mod window;

pub use client::RobotClient;
pub use control::{CommandSink, Controller, PanelEvents};
pub use core::config::Config;
pub use core::events::{AppEvent, EventSender};
pub use core::state::{PanelState, PanelView};
