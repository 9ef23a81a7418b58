//! Simulated robot state

use robot_protocol::{Command, Direction, Mode, Speed, StatusMessage};
use tracing::{debug, info};

/// What the simulated robot is doing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotState {
    pub mode: Mode,
    pub speed: Speed,
    /// An autonomous behavior is running
    pub active: bool,
    /// Current motor output while driving manually
    pub motion: Direction,
}

impl RobotState {
    pub fn new(speed: Speed) -> Self {
        Self {
            mode: Mode::Manual,
            speed,
            active: false,
            motion: Direction::Stop,
        }
    }

    /// Apply one command token. Returns `false` if the token was ignored.
    pub fn apply_token(&mut self, token: &str) -> bool {
        match token.parse::<Command>() {
            Ok(command) => self.apply(command),
            Err(e) => {
                debug!("Ignoring command {:?}: {}", token, e);
                false
            }
        }
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SelectMode(mode) => {
                if mode != self.mode {
                    info!("Mode {} -> {}", self.mode, mode);
                }
                self.mode = mode;
                self.active = mode.is_autonomous();
                // Leaving or entering manual always halts the motors first
                self.motion = Direction::Stop;
                true
            }
            Command::Drive(direction) => {
                // Motors obey the pad in every mode, like the real robot
                if self.mode.is_autonomous() {
                    debug!("Drive {} while in {} mode", direction, self.mode);
                }
                self.motion = direction;
                true
            }
            Command::SetSpeed(speed) => {
                self.speed = speed;
                true
            }
        }
    }

    /// Full status report
    pub fn status(&self) -> StatusMessage {
        StatusMessage {
            modo: Some(self.mode.id().to_string()),
            velocidad: Some(self.speed.percent() as i64),
            activo: Some(self.active),
        }
    }
}
