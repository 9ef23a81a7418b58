//! Input translation
//!
//! Turns discrete UI interactions into commands. Directional input only
//! produces commands while the robot reports manual mode. Session state is
//! never changed here; only the reflector writes it, once the robot has
//! acknowledged.

use super::keymap::{key_down_direction, key_up_direction, KeyInput};
use super::sink::CommandSink;
use crate::core::state::PanelState;
use robot_protocol::{Command, Direction, Mode, Speed};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputTranslator;

impl InputTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Always allowed. The last selected mode button becomes the active one.
    pub fn select_mode(&self, state: &mut PanelState, mode: Mode, sink: &mut impl CommandSink) {
        state.view.active_mode = Some(mode);
        emit(sink, Command::SelectMode(mode));
    }

    pub fn press(&self, state: &mut PanelState, direction: Direction, sink: &mut impl CommandSink) {
        if !state.session.is_manual() {
            return;
        }
        state.view.set_pressed(direction, true);
        emit(sink, Command::Drive(direction));
    }

    /// Releasing any direction stops the robot, even if another direction is
    /// still held: only one direction is ever active.
    pub fn release(&self, state: &mut PanelState, direction: Direction, sink: &mut impl CommandSink) {
        state.view.set_pressed(direction, false);
        if state.session.is_manual() && !direction.is_stop() {
            emit(sink, Command::STOP);
        }
    }

    /// Pointer left the control while pressed
    pub fn cancel(&self, state: &mut PanelState, direction: Direction, sink: &mut impl CommandSink) {
        self.release(state, direction, sink);
    }

    /// Live slider movement: display only
    pub fn preview_speed(&self, state: &mut PanelState, value: Speed) {
        state.view.slider_value = value.percent();
        state.view.set_speed_text(value);
    }

    pub fn commit_speed(&self, state: &mut PanelState, value: Speed, sink: &mut impl CommandSink) {
        state.view.slider_value = value.percent();
        emit(sink, Command::SetSpeed(value));
    }

    pub fn key_down(&self, state: &mut PanelState, key: KeyInput, sink: &mut impl CommandSink) {
        if !state.session.is_manual() {
            return;
        }
        if let Some(direction) = key_down_direction(key) {
            self.press(state, direction, sink);
        }
    }

    /// Key release. The pressed look is always cleared, even if the mode
    /// changed while the key was held; a stop is only sent in manual.
    pub fn key_up(&self, state: &mut PanelState, key: KeyInput, sink: &mut impl CommandSink) {
        match key_up_direction(key) {
            Some(direction) => self.release(state, direction, sink),
            // Space stops on key-down and has nothing to send on release
            None if key == KeyInput::Space => state.view.set_pressed(Direction::Stop, false),
            None => {}
        }
    }
}

fn emit(sink: &mut impl CommandSink, command: Command) {
    debug!("Command: {}", command);
    sink.send(command);
}
