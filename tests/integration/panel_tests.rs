//! Panel behavior driven through the public event interface

use robot_panel::control::KeyInput;
use robot_panel::core::config::Labels;
use robot_panel::{AppEvent, Controller, PanelEvents};
use robot_protocol::{Command, Direction, Mode, Speed, StatusMessage};

fn panel() -> Controller<Vec<Command>> {
    Controller::new(80, Labels::default(), Vec::new())
}

fn status(modo: Option<&str>, velocidad: Option<i64>) -> AppEvent {
    AppEvent::Status(StatusMessage {
        modo: modo.map(str::to_string),
        velocidad,
        activo: None,
    })
}

fn speed(value: u8) -> Speed {
    Speed::new(value).unwrap()
}

#[test]
fn test_presses_emit_only_in_manual() {
    let mut p = panel();

    for direction in Direction::ALL {
        p.on_direction_press(direction);
    }
    assert_eq!(
        p.sink(),
        &Direction::ALL.map(Command::Drive).to_vec()
    );

    p.sink_mut().clear();
    for modo in ["linea", "sumo"] {
        p.on_app_event(&status(Some(modo), None));
        for direction in Direction::ALL {
            p.on_direction_press(direction);
            p.on_direction_release(direction);
        }
        p.on_key_down(KeyInput::Char('w'));
        p.on_key_up(KeyInput::Char('w'));
    }
    assert!(p.sink().is_empty());
}

#[test]
fn test_any_release_stops() {
    for direction in [Direction::Forward, Direction::Back, Direction::Left, Direction::Right] {
        let mut p = panel();
        p.on_direction_press(direction);
        p.on_direction_release(direction);
        assert_eq!(p.sink(), &vec![Command::Drive(direction), Command::STOP]);
    }

    // Releasing the stop control itself does not repeat the stop
    let mut p = panel();
    p.on_direction_press(Direction::Stop);
    p.on_direction_release(Direction::Stop);
    assert_eq!(p.sink(), &vec![Command::STOP]);
}

#[test]
fn test_pointer_leaving_control_stops() {
    let mut p = panel();
    p.on_direction_press(Direction::Right);
    assert!(p.state().view.is_pressed(Direction::Right));

    p.on_direction_cancel(Direction::Right);

    assert!(!p.state().view.is_pressed(Direction::Right));
    assert_eq!(p.sink(), &vec![Command::Drive(Direction::Right), Command::STOP]);
}

#[test]
fn test_slider_previews_silently_then_commits_once() {
    let mut p = panel();

    for value in [70, 55, 40, 33] {
        p.on_speed_preview(speed(value));
    }
    assert!(p.sink().is_empty());
    assert_eq!(p.state().view.slider_value, 33);
    assert_eq!(p.state().view.speed_value_text, "33");

    p.on_speed_commit(speed(33));
    assert_eq!(p.sink(), &vec![Command::SetSpeed(speed(33))]);
}

#[test]
fn test_mode_report_toggles_controls() {
    let mut p = panel();
    let labels = Labels::default();

    p.on_app_event(&status(Some("sumo"), None));
    assert!(!p.state().view.manual_controls_visible);
    assert_eq!(p.state().view.activity_label, labels.autonomous);
    assert_eq!(p.state().view.mode_label, labels.sumo);

    p.on_app_event(&status(Some("manual"), None));
    assert!(p.state().view.manual_controls_visible);
    assert_eq!(p.state().view.activity_label, labels.stopped);
    assert_eq!(p.state().view.mode_label, labels.manual);
}

#[test]
fn test_unknown_mode_shown_verbatim() {
    let mut p = panel();
    p.on_app_event(&status(Some("baile"), None));

    assert_eq!(p.state().view.mode_label, "baile");
    assert!(!p.state().view.manual_controls_visible);
    p.on_direction_press(Direction::Forward);
    assert!(p.sink().is_empty());
}

#[test]
fn test_robot_speed_overrides_preview() {
    let mut p = panel();
    p.on_speed_preview(speed(10));

    p.on_app_event(&status(None, Some(42)));

    let view = &p.state().view;
    assert_eq!(view.slider_value, 42);
    assert_eq!(view.speed_value_text, "42");
    assert_eq!(view.robot_speed_text, "42%");
    assert_eq!(p.state().session.speed, 42);
}

#[test]
fn test_reconnect_restores_indicator() {
    let mut p = panel();
    let labels = Labels::default();

    p.on_app_event(&AppEvent::Disconnected);
    assert!(!p.state().view.connection_indicator);
    assert_eq!(p.state().view.connection_label, labels.disconnected);

    p.on_app_event(&AppEvent::Connected);
    assert!(p.state().view.connection_indicator);
    assert_eq!(p.state().view.connection_label, labels.connected);
}

#[test]
fn test_empty_status_changes_nothing() {
    let mut p = panel();
    p.on_app_event(&status(Some("linea"), Some(64)));
    let before = p.state().session.clone();
    let view_before = p.state().view.clone();

    p.on_app_event(&status(None, None));
    p.on_app_event(&status(Some(""), None));

    assert_eq!(p.state().session, before);
    assert_eq!(p.state().view, view_before);
}

#[test]
fn test_keyboard_driving() {
    let mut p = panel();

    p.on_key_down(KeyInput::ArrowUp);
    // Auto-repeat resends the direction
    p.on_key_down(KeyInput::ArrowUp);
    p.on_key_up(KeyInput::ArrowUp);
    p.on_key_down(KeyInput::Char('A'));
    p.on_key_up(KeyInput::Char('a'));
    p.on_key_down(KeyInput::Space);
    p.on_key_up(KeyInput::Space);
    p.on_key_down(KeyInput::Char('x'));

    assert_eq!(
        p.sink(),
        &vec![
            Command::Drive(Direction::Forward),
            Command::Drive(Direction::Forward),
            Command::STOP,
            Command::Drive(Direction::Left),
            Command::STOP,
            Command::STOP,
        ]
    );
}

#[test]
fn test_mode_selection_always_sent() {
    let mut p = panel();
    p.on_app_event(&status(Some("sumo"), None));

    p.on_mode_select(Mode::Line);
    p.on_mode_select(Mode::Manual);

    assert_eq!(
        p.sink(),
        &vec![Command::SelectMode(Mode::Line), Command::SelectMode(Mode::Manual)]
    );
    // The robot's report, not the click, decides what is shown
    assert!(!p.state().view.manual_controls_visible);
    assert_eq!(p.state().view.active_mode, Some(Mode::Manual));
}
