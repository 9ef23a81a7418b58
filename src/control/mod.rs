//! Control module - Input translation, status reflection and the panel controller

pub mod keymap;
pub mod panel;
pub mod reflector;
pub mod sink;
pub mod translator;

pub use keymap::KeyInput;
pub use panel::{Controller, PanelEvents};
pub use reflector::StatusReflector;
pub use sink::CommandSink;
pub use translator::InputTranslator;
