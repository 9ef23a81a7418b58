//! Panel state management
//!
//! `PanelState` is the single owner of everything the panel knows: the
//! robot's last acknowledged session, the transport's connection state and the
//! derived view the window renders. It is only ever mutated through `&mut`
//! borrows handed out by the controller on the UI thread.

use super::config::Labels;
use robot_protocol::{Direction, Mode, ReportedMode};

/// Robot session as last reported by the robot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current mode (unknown ids are kept verbatim)
    pub mode: ReportedMode,
    /// Current speed, echoed as reported
    pub speed: i64,
}

impl SessionState {
    pub fn new(initial_speed: u8) -> Self {
        Self {
            mode: ReportedMode::Known(Mode::Manual),
            speed: initial_speed as i64,
        }
    }

    /// Directional input is only meaningful in manual mode
    pub fn is_manual(&self) -> bool {
        self.mode.is_manual()
    }
}

/// Transport connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Derived display fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Label of the current mode
    pub mode_label: String,
    /// Coarse activity label (stopped / autonomous)
    pub activity_label: String,
    /// Whether the directional pad is shown
    pub manual_controls_visible: bool,
    /// Speed slider position
    pub slider_value: u8,
    /// Numeric value next to the slider
    pub speed_value_text: String,
    /// Speed in the status block, with a percent sign
    pub robot_speed_text: String,
    pub connection_label: String,
    /// Indicator lit while connected
    pub connection_indicator: bool,
    /// Last selected mode button
    pub active_mode: Option<Mode>,
    /// Cosmetic pressed affordance, indexed by `Direction::index`
    pressed: [bool; 5],
}

impl PanelView {
    pub fn new(initial_speed: u8, labels: &Labels) -> Self {
        let mut view = Self {
            mode_label: labels.mode(Mode::Manual).to_string(),
            activity_label: labels.stopped.clone(),
            manual_controls_visible: true,
            slider_value: initial_speed,
            speed_value_text: String::new(),
            robot_speed_text: String::new(),
            connection_label: labels.connection(false).to_string(),
            connection_indicator: false,
            active_mode: Some(Mode::Manual),
            pressed: [false; 5],
        };
        view.set_speed_text(initial_speed);
        view
    }

    /// Update both numeric speed labels
    pub fn set_speed_text(&mut self, value: impl std::fmt::Display) {
        self.speed_value_text = value.to_string();
        self.robot_speed_text = format!("{}%", value);
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.pressed[direction.index()]
    }

    pub fn set_pressed(&mut self, direction: Direction, pressed: bool) {
        self.pressed[direction.index()] = pressed;
    }
}

/// Everything the panel owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub session: SessionState,
    pub connection: ConnectionState,
    pub view: PanelView,
}

impl PanelState {
    pub fn new(initial_speed: u8, labels: &Labels) -> Self {
        let initial_speed = initial_speed.min(robot_protocol::Speed::MAX);
        Self {
            session: SessionState::new(initial_speed),
            connection: ConnectionState::default(),
            view: PanelView::new(initial_speed, labels),
        }
    }
}
