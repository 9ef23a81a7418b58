//! Panel window module
//!
//! Hosts the panel in an eframe window: keyboard and pointer capture,
//! rendering of the panel view, and the per-frame event pump.

mod app;
mod input;
mod render;

pub use app::PanelApp;
pub use input::{collect_key_transitions, key_input_from_egui, ControlPointer, KeyTransition, PointerTransition};
pub use render::{render_panel, PanelIntent, WidgetState, CONNECTED_GREEN, DISCONNECTED_RED};
