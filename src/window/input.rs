//! Keyboard and pointer input handling for the panel window
//!
//! Converts egui input into toolkit-independent key transitions and tracks
//! per-control pointer state so the directional pad can tell a press, a
//! release and a pointer that slid off the control apart.

use crate::control::KeyInput;

/// A key going down or up. Auto-repeat arrives as repeated `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down(KeyInput),
    Up(KeyInput),
}

/// Map an egui key to a panel key. Letters are reported lowercase.
pub fn key_input_from_egui(key: egui::Key) -> Option<KeyInput> {
    match key {
        egui::Key::ArrowUp => Some(KeyInput::ArrowUp),
        egui::Key::ArrowDown => Some(KeyInput::ArrowDown),
        egui::Key::ArrowLeft => Some(KeyInput::ArrowLeft),
        egui::Key::ArrowRight => Some(KeyInput::ArrowRight),
        egui::Key::Space => Some(KeyInput::Space),
        egui::Key::W => Some(KeyInput::Char('w')),
        egui::Key::A => Some(KeyInput::Char('a')),
        egui::Key::S => Some(KeyInput::Char('s')),
        egui::Key::D => Some(KeyInput::Char('d')),
        _ => None,
    }
}

/// Collect this frame's key transitions, in order
pub fn collect_key_transitions(ctx: &egui::Context) -> Vec<KeyTransition> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }

    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key { key, pressed, .. } => {
                    key_input_from_egui(*key).map(|k| {
                        if *pressed {
                            KeyTransition::Down(k)
                        } else {
                            KeyTransition::Up(k)
                        }
                    })
                }
                _ => None,
            })
            .collect()
    })
}

/// What happened to a control between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTransition {
    Press,
    Release,
    /// Pointer left the control while still held down
    Cancel,
}

/// Pointer state of one directional control
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlPointer {
    held: bool,
    /// Set after a cancel until the button is let go, so sliding back onto
    /// the control does not press it again
    cancelled: bool,
}

impl ControlPointer {
    /// Feed this frame's pointer state.
    ///
    /// `down_on`: the primary button went down on this control and is still
    /// down. `contains_pointer`: the pointer is over the control.
    pub fn update(&mut self, down_on: bool, contains_pointer: bool) -> Option<PointerTransition> {
        if !down_on {
            self.cancelled = false;
            if self.held {
                self.held = false;
                return Some(PointerTransition::Release);
            }
            return None;
        }

        if self.held {
            if !contains_pointer {
                self.held = false;
                self.cancelled = true;
                return Some(PointerTransition::Cancel);
            }
            None
        } else if !self.cancelled {
            self.held = true;
            Some(PointerTransition::Press)
        } else {
            None
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Forget any press (control no longer shown)
    pub fn reset(&mut self) -> bool {
        let was_held = self.held;
        *self = Self::default();
        was_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_release() {
        let mut c = ControlPointer::default();
        assert_eq!(c.update(true, true), Some(PointerTransition::Press));
        assert_eq!(c.update(true, true), None);
        assert_eq!(c.update(false, true), Some(PointerTransition::Release));
        assert_eq!(c.update(false, true), None);
    }

    #[test]
    fn test_slide_off_cancels_once() {
        let mut c = ControlPointer::default();
        c.update(true, true);
        assert_eq!(c.update(true, false), Some(PointerTransition::Cancel));
        // Sliding back while still down does not re-press
        assert_eq!(c.update(true, true), None);
        // Letting go after a cancel emits nothing more
        assert_eq!(c.update(false, true), None);
        // A fresh press works again
        assert_eq!(c.update(true, true), Some(PointerTransition::Press));
    }

    #[test]
    fn test_reset_reports_held() {
        let mut c = ControlPointer::default();
        assert!(!c.reset());
        c.update(true, true);
        assert!(c.is_held());
        assert!(c.reset());
        assert!(!c.is_held());
    }

    #[test]
    fn test_egui_key_mapping() {
        assert_eq!(key_input_from_egui(egui::Key::W), Some(KeyInput::Char('w')));
        assert_eq!(key_input_from_egui(egui::Key::Space), Some(KeyInput::Space));
        assert_eq!(key_input_from_egui(egui::Key::ArrowRight), Some(KeyInput::ArrowRight));
        assert_eq!(key_input_from_egui(egui::Key::Q), None);
    }
}
