//! eframe application hosting the panel

use tokio::sync::mpsc;

use super::input::{collect_key_transitions, KeyTransition};
use super::render::{render_panel, WidgetState};
use crate::control::{CommandSink, Controller, PanelEvents};
use crate::core::events::AppEvent;

pub struct PanelApp<S> {
    controller: Controller<S>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    widgets: WidgetState,
}

impl<S: CommandSink> PanelApp<S> {
    pub fn new(controller: Controller<S>, event_rx: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        Self {
            controller,
            event_rx,
            widgets: WidgetState::default(),
        }
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    /// Apply every pending transport event, in arrival order
    fn process_events(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.controller.on_app_event(&event);
            count += 1;
        }
        count
    }

    fn process_keys(&mut self, ctx: &egui::Context) {
        for transition in collect_key_transitions(ctx) {
            match transition {
                KeyTransition::Down(key) => self.controller.on_key_down(key),
                KeyTransition::Up(key) => self.controller.on_key_up(key),
            }
        }
    }

    /// Run one frame against `ctx`
    pub fn frame(&mut self, ctx: &egui::Context) {
        self.process_events();
        self.process_keys(ctx);

        let intents = render_panel(
            ctx,
            &self.controller.state().view,
            self.controller.labels(),
            &mut self.widgets,
        );
        if !intents.is_empty() {
            for intent in intents {
                intent.dispatch(&mut self.controller);
            }
            ctx.request_repaint();
        }
    }
}

impl<S: CommandSink> eframe::App for PanelApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}
