//! Panel capability interface and controller
//!
//! Every UI event source (window widgets, keyboard, transport) talks to the
//! panel through `PanelEvents`. `Controller` is the single implementation: it
//! owns the panel state and lends it to the translator and reflector.

use super::keymap::KeyInput;
use super::reflector::StatusReflector;
use super::sink::CommandSink;
use super::translator::InputTranslator;
use crate::core::config::Labels;
use crate::core::events::AppEvent;
use crate::core::state::PanelState;
use robot_protocol::{Direction, Mode, Speed, StatusMessage};

/// Events a panel front-end can deliver
pub trait PanelEvents {
    fn on_mode_select(&mut self, mode: Mode);
    fn on_direction_press(&mut self, direction: Direction);
    fn on_direction_release(&mut self, direction: Direction);
    fn on_direction_cancel(&mut self, direction: Direction);
    fn on_speed_preview(&mut self, value: Speed);
    fn on_speed_commit(&mut self, value: Speed);
    fn on_key_down(&mut self, key: KeyInput);
    fn on_key_up(&mut self, key: KeyInput);
    fn on_status_message(&mut self, status: &StatusMessage);
    fn on_connection_change(&mut self, connected: bool);

    /// Route a transport event to the matching handler
    fn on_app_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Connected => self.on_connection_change(true),
            AppEvent::Disconnected => self.on_connection_change(false),
            AppEvent::Status(status) => self.on_status_message(status),
        }
    }
}

pub struct Controller<S> {
    state: PanelState,
    translator: InputTranslator,
    reflector: StatusReflector,
    sink: S,
}

impl<S: CommandSink> Controller<S> {
    pub fn new(initial_speed: u8, labels: Labels, sink: S) -> Self {
        Self {
            state: PanelState::new(initial_speed, &labels),
            translator: InputTranslator::new(),
            reflector: StatusReflector::new(labels),
            sink,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn labels(&self) -> &Labels {
        self.reflector.labels()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: CommandSink> PanelEvents for Controller<S> {
    fn on_mode_select(&mut self, mode: Mode) {
        self.translator.select_mode(&mut self.state, mode, &mut self.sink);
    }

    fn on_direction_press(&mut self, direction: Direction) {
        self.translator.press(&mut self.state, direction, &mut self.sink);
    }

    fn on_direction_release(&mut self, direction: Direction) {
        self.translator.release(&mut self.state, direction, &mut self.sink);
    }

    fn on_direction_cancel(&mut self, direction: Direction) {
        self.translator.cancel(&mut self.state, direction, &mut self.sink);
    }

    fn on_speed_preview(&mut self, value: Speed) {
        self.translator.preview_speed(&mut self.state, value);
    }

    fn on_speed_commit(&mut self, value: Speed) {
        self.translator.commit_speed(&mut self.state, value, &mut self.sink);
    }

    fn on_key_down(&mut self, key: KeyInput) {
        self.translator.key_down(&mut self.state, key, &mut self.sink);
    }

    fn on_key_up(&mut self, key: KeyInput) {
        self.translator.key_up(&mut self.state, key, &mut self.sink);
    }

    fn on_status_message(&mut self, status: &StatusMessage) {
        self.reflector.apply_status(&mut self.state, status);
    }

    fn on_connection_change(&mut self, connected: bool) {
        self.reflector.connection_changed(&mut self.state, connected);
    }
}
