//! Status reflection
//!
//! Applies robot status reports and connection transitions to the panel
//! state. This is the only writer of the session state.

use crate::core::config::Labels;
use crate::core::state::{ConnectionState, PanelState};
use robot_protocol::{ReportedMode, Speed, StatusMessage};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct StatusReflector {
    labels: Labels,
}

impl StatusReflector {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Apply a status report. Absent fields leave their part of the state
    /// untouched.
    pub fn apply_status(&self, state: &mut PanelState, status: &StatusMessage) {
        if let Some(mode) = status.mode() {
            self.apply_mode(state, mode);
        }

        if let Some(speed) = status.velocidad {
            state.session.speed = speed;
            state.view.slider_value = Speed::clamped(speed).percent();
            state.view.set_speed_text(speed);
        }

        if let Some(active) = status.activo {
            debug!("Robot reports autonomous routine active={}", active);
        }
    }

    fn apply_mode(&self, state: &mut PanelState, mode: ReportedMode) {
        let manual = mode.is_manual();

        state.view.mode_label = match &mode {
            ReportedMode::Known(known) => self.labels.mode(*known).to_string(),
            ReportedMode::Other(raw) => raw.clone(),
        };
        state.view.manual_controls_visible = manual;
        // Coarse: manual always reads as stopped, whatever the motors do
        state.view.activity_label = if manual {
            self.labels.stopped.clone()
        } else {
            self.labels.autonomous.clone()
        };

        if state.session.mode != mode {
            info!("Robot mode: {}", mode.as_wire());
        }
        state.session.mode = mode;
    }

    pub fn connection_changed(&self, state: &mut PanelState, connected: bool) {
        state.connection = ConnectionState::from_connected(connected);
        state.view.connection_indicator = connected;
        state.view.connection_label = self.labels.connection(connected).to_string();
    }
}
