//! Shared types and wire format for robot panel ↔ robot communication.
//!
//! This crate is intentionally lightweight (`serde`, `serde_json`, `thiserror`).
//! It defines:
//! - The command vocabulary (Mode, Direction, Speed, Command) and its text tokens
//! - The status report sent back by the robot
//! - The JSON envelopes carried in WebSocket text frames

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ── Command vocabulary ─────────────────────────────────────────────

/// Robot operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Driven from the panel
    Manual,
    /// Autonomous line following
    Line,
    /// Autonomous sumo
    Sumo,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Manual, Mode::Line, Mode::Sumo];

    /// Wire identifier, used both as the mode-select token and in status reports
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Manual => "manual",
            Mode::Line => "linea",
            Mode::Sumo => "sumo",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "manual" => Some(Mode::Manual),
            "linea" => Some(Mode::Line),
            "sumo" => Some(Mode::Sumo),
            _ => None,
        }
    }

    pub fn is_autonomous(&self) -> bool {
        !matches!(self, Mode::Manual)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Drive direction. `Stop` shares the vocabulary with the four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
    Stop,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
        Direction::Stop,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Direction::Forward => "F",
            Direction::Back => "B",
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Stop => "S",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "F" => Some(Direction::Forward),
            "B" => Some(Direction::Back),
            "L" => Some(Direction::Left),
            "R" => Some(Direction::Right),
            "S" => Some(Direction::Stop),
            _ => None,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Direction::Stop)
    }

    /// Stable index for per-direction tables
    pub fn index(&self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Back => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::Stop => 4,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Speed percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Option<Self> {
        (percent <= Self::MAX).then_some(Self(percent))
    }

    /// Clamp an arbitrary integer into the valid range
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single outbound instruction for the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SelectMode(Mode),
    Drive(Direction),
    SetSpeed(Speed),
}

impl Command {
    pub const STOP: Command = Command::Drive(Direction::Stop);

    /// Text token as carried in `{ "cmd": <token> }`
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectMode(mode) => f.write_str(mode.id()),
            Command::Drive(direction) => write!(f, "{}", direction),
            Command::SetSpeed(speed) => write!(f, "V{}", speed),
        }
    }
}

/// Errors from parsing a command token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command token")]
    Empty,
    #[error("unknown command token {0:?}")]
    Unknown(String),
    #[error("malformed speed token {0:?}")]
    MalformedSpeed(String),
    #[error("speed {0} outside 0-100")]
    SpeedOutOfRange(u32),
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(CommandParseError::Empty);
        }
        if let Some(mode) = Mode::from_id(token) {
            return Ok(Command::SelectMode(mode));
        }
        if let Some(direction) = Direction::from_token(token) {
            return Ok(Command::Drive(direction));
        }
        if let Some(digits) = token.strip_prefix('V') {
            // Unsigned decimal digits only: "V+5" and "V-1" are rejected
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CommandParseError::MalformedSpeed(token.to_string()));
            }
            let value: u32 = digits
                .parse()
                .map_err(|_| CommandParseError::MalformedSpeed(token.to_string()))?;
            return u8::try_from(value)
                .ok()
                .and_then(Speed::new)
                .map(Command::SetSpeed)
                .ok_or(CommandParseError::SpeedOutOfRange(value));
        }
        Err(CommandParseError::Unknown(token.to_string()))
    }
}

// ── Status report ──────────────────────────────────────────────────

/// Mode as reported by the robot; unknown ids are carried verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedMode {
    Known(Mode),
    Other(String),
}

impl ReportedMode {
    pub fn from_wire(id: &str) -> Self {
        match Mode::from_id(id) {
            Some(mode) => ReportedMode::Known(mode),
            None => ReportedMode::Other(id.to_string()),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, ReportedMode::Known(Mode::Manual))
    }

    pub fn as_wire(&self) -> &str {
        match self {
            ReportedMode::Known(mode) => mode.id(),
            ReportedMode::Other(id) => id,
        }
    }
}

impl Default for ReportedMode {
    fn default() -> Self {
        ReportedMode::Known(Mode::Manual)
    }
}

/// Status report from the robot. Every field is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Current mode id
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_mode"
    )]
    pub modo: Option<String>,
    /// Current speed percentage
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_speed"
    )]
    pub velocidad: Option<i64>,
    /// Whether an autonomous routine is running
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_bool"
    )]
    pub activo: Option<bool>,
}

impl StatusMessage {
    /// Reported mode; an empty id counts as absent
    pub fn mode(&self) -> Option<ReportedMode> {
        self.modo
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ReportedMode::from_wire)
    }

    pub fn is_empty(&self) -> bool {
        self.modo.is_none() && self.velocidad.is_none() && self.activo.is_none()
    }
}

// Field decoders never fail: a value of the wrong shape counts as absent.

fn lenient_mode<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(de)? {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_speed<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(de)? {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(de)? {
        Some(serde_json::Value::Bool(b)) => Some(b),
        _ => None,
    })
}

// ── WebSocket text frames ──────────────────────────────────────────
//
// Every text frame is a JSON envelope: {"event": <name>, "data": <payload>}.
// Panel → robot uses "comando"; robot → panel uses "status".

/// Payload of a "comando" event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub cmd: String,
}

impl From<&Command> for CommandMessage {
    fn from(command: &Command) -> Self {
        Self {
            cmd: command.token(),
        }
    }
}

/// Frames sent by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ClientFrame {
    Comando(CommandMessage),
}

/// Frames sent by the robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ServerFrame {
    Status(StatusMessage),
}

pub fn encode_command_frame(command: &Command) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ClientFrame::Comando(CommandMessage::from(command)))
}

pub fn decode_client_frame(text: &str) -> Result<ClientFrame, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn encode_status_frame(status: &StatusMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerFrame::Status(status.clone()))
}

pub fn decode_server_frame(text: &str) -> Result<ServerFrame, serde_json::Error> {
    serde_json::from_str(text)
}

/// Default robot listen address
pub const DEFAULT_ROBOT_ADDR: &str = "127.0.0.1:5000";

/// WebSocket endpoint path
pub const WS_PATH: &str = "/ws";

/// Speed the robot boots with
pub const DEFAULT_SPEED: u8 = 80;
