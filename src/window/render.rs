//! Panel rendering
//!
//! Draws the panel view and reports what the user did as `PanelIntent`s.
//! Rendering never touches panel state directly.

use robot_protocol::{Direction, Mode, Speed};

use super::input::{ControlPointer, PointerTransition};
use crate::control::PanelEvents;
use crate::core::config::Labels;
use crate::core::state::PanelView;

/// Connected indicator color
pub const CONNECTED_GREEN: egui::Color32 = egui::Color32::from_rgb(0x3F, 0xB9, 0x50);

/// Disconnected indicator color
pub const DISCONNECTED_RED: egui::Color32 = egui::Color32::from_rgb(0xE5, 0x48, 0x4D);

/// Directional pad button size in logical pixels
pub const DPAD_BUTTON_SIZE: [f32; 2] = [72.0, 56.0];

/// A user interaction produced while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    SelectMode(Mode),
    Press(Direction),
    Release(Direction),
    Cancel(Direction),
    PreviewSpeed(Speed),
    CommitSpeed(Speed),
}

impl PanelIntent {
    pub fn dispatch(self, panel: &mut impl PanelEvents) {
        match self {
            PanelIntent::SelectMode(mode) => panel.on_mode_select(mode),
            PanelIntent::Press(direction) => panel.on_direction_press(direction),
            PanelIntent::Release(direction) => panel.on_direction_release(direction),
            PanelIntent::Cancel(direction) => panel.on_direction_cancel(direction),
            PanelIntent::PreviewSpeed(value) => panel.on_speed_preview(value),
            PanelIntent::CommitSpeed(value) => panel.on_speed_commit(value),
        }
    }
}

/// Widget state that lives across frames
#[derive(Debug, Default)]
pub struct WidgetState {
    dpad: [ControlPointer; 5],
    /// Slider moved and not committed yet
    slider_pending: bool,
    /// Last laid-out rects, for hit-testing synthetic input
    slider_rect: Option<egui::Rect>,
    dpad_rects: [Option<egui::Rect>; 5],
}

impl WidgetState {
    pub fn slider_rect(&self) -> Option<egui::Rect> {
        self.slider_rect
    }

    pub fn dpad_rect(&self, direction: Direction) -> Option<egui::Rect> {
        self.dpad_rects[direction.index()]
    }
}

/// Render the whole panel and return the interactions of this frame
pub fn render_panel(
    ctx: &egui::Context,
    view: &PanelView,
    labels: &Labels,
    widgets: &mut WidgetState,
) -> Vec<PanelIntent> {
    let mut intents = Vec::new();

    egui::TopBottomPanel::top("connection_bar").show(ctx, |ui| {
        render_connection(ui, view);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        render_mode_selector(ui, view, labels, &mut intents);

        ui.add_space(12.0);
        render_status(ui, view);

        ui.add_space(12.0);
        if view.manual_controls_visible {
            render_dpad(ui, view, widgets, &mut intents);
        } else {
            // Hidden controls cannot be released by the pointer any more
            for direction in Direction::ALL {
                widgets.dpad_rects[direction.index()] = None;
                if widgets.dpad[direction.index()].reset() {
                    intents.push(PanelIntent::Release(direction));
                }
            }
        }

        ui.add_space(12.0);
        render_speed(ui, view, widgets, &mut intents);
    });

    intents
}

fn render_connection(ui: &mut egui::Ui, view: &PanelView) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        let color = if view.connection_indicator {
            CONNECTED_GREEN
        } else {
            DISCONNECTED_RED
        };
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(&view.connection_label);
    });
}

fn render_mode_selector(
    ui: &mut egui::Ui,
    view: &PanelView,
    labels: &Labels,
    intents: &mut Vec<PanelIntent>,
) {
    ui.horizontal(|ui| {
        for mode in Mode::ALL {
            let button = egui::Button::new(labels.mode(mode)).selected(view.active_mode == Some(mode));
            if ui.add_sized([96.0, 32.0], button).clicked() {
                intents.push(PanelIntent::SelectMode(mode));
            }
        }
    });
}

fn render_status(ui: &mut egui::Ui, view: &PanelView) {
    egui::Grid::new("robot_status")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("Mode");
            ui.strong(&view.mode_label);
            ui.end_row();

            ui.label("Status");
            ui.strong(&view.activity_label);
            ui.end_row();

            ui.label("Speed");
            ui.strong(&view.robot_speed_text);
            ui.end_row();
        });
}

fn render_dpad(
    ui: &mut egui::Ui,
    view: &PanelView,
    widgets: &mut WidgetState,
    intents: &mut Vec<PanelIntent>,
) {
    let rows: [&[Option<Direction>]; 3] = [
        &[None, Some(Direction::Forward), None],
        &[Some(Direction::Left), Some(Direction::Stop), Some(Direction::Right)],
        &[None, Some(Direction::Back), None],
    ];

    egui::Grid::new("dpad").spacing([6.0, 6.0]).show(ui, |ui| {
        for row in rows {
            for cell in row {
                match cell {
                    Some(direction) => {
                        dpad_button(ui, *direction, view, widgets, intents);
                    }
                    None => {
                        ui.allocate_exact_size(DPAD_BUTTON_SIZE.into(), egui::Sense::hover());
                    }
                }
            }
            ui.end_row();
        }
    });
}

fn dpad_button(
    ui: &mut egui::Ui,
    direction: Direction,
    view: &PanelView,
    widgets: &mut WidgetState,
    intents: &mut Vec<PanelIntent>,
) {
    let button = egui::Button::new(dpad_glyph(direction))
        .sense(egui::Sense::click_and_drag())
        .selected(view.is_pressed(direction));
    let response = ui.add_sized(DPAD_BUTTON_SIZE, button);
    widgets.dpad_rects[direction.index()] = Some(response.rect);

    let pointer = &mut widgets.dpad[direction.index()];
    match pointer.update(response.is_pointer_button_down_on(), response.contains_pointer()) {
        Some(PointerTransition::Press) => intents.push(PanelIntent::Press(direction)),
        Some(PointerTransition::Release) => intents.push(PanelIntent::Release(direction)),
        Some(PointerTransition::Cancel) => intents.push(PanelIntent::Cancel(direction)),
        None => {}
    }
}

fn dpad_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "▲",
        Direction::Back => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
        Direction::Stop => "■",
    }
}

fn render_speed(
    ui: &mut egui::Ui,
    view: &PanelView,
    widgets: &mut WidgetState,
    intents: &mut Vec<PanelIntent>,
) {
    ui.horizontal(|ui| {
        ui.label("Speed");
        let mut value = view.slider_value;
        let response = ui.add(
            egui::Slider::new(&mut value, 0..=Speed::MAX)
                .show_value(false)
                .trailing_fill(true),
        );
        ui.label(&view.speed_value_text);
        widgets.slider_rect = Some(response.rect);

        let speed = Speed::clamped(value as i64);
        if response.changed() {
            widgets.slider_pending = true;
            intents.push(PanelIntent::PreviewSpeed(speed));
        }
        // Commit once the interaction is over (pointer released)
        if widgets.slider_pending && !response.is_pointer_button_down_on() {
            widgets.slider_pending = false;
            intents.push(PanelIntent::CommitSpeed(speed));
        }
    });
}
