//! Wire format as seen by the robot

use robot_protocol::{
    decode_server_frame, encode_command_frame, Command, Direction, Mode, ReportedMode, ServerFrame,
    Speed,
};
use serde_json::json;

#[test]
fn test_every_command_token() {
    let expected = [
        (Command::SelectMode(Mode::Manual), "manual"),
        (Command::SelectMode(Mode::Line), "linea"),
        (Command::SelectMode(Mode::Sumo), "sumo"),
        (Command::Drive(Direction::Forward), "F"),
        (Command::Drive(Direction::Back), "B"),
        (Command::Drive(Direction::Left), "L"),
        (Command::Drive(Direction::Right), "R"),
        (Command::STOP, "S"),
        (Command::SetSpeed(Speed::new(0).unwrap()), "V0"),
        (Command::SetSpeed(Speed::new(100).unwrap()), "V100"),
    ];

    for (command, token) in expected {
        let frame: serde_json::Value =
            serde_json::from_str(&encode_command_frame(&command).unwrap()).unwrap();
        assert_eq!(frame, json!({"event": "comando", "data": {"cmd": token}}));
        assert_eq!(token.parse::<Command>().unwrap(), command);
    }
}

#[test]
fn test_bad_tokens_rejected() {
    for token in ["V101", "V-1", "X", "", "v50", "M1", "Manual"] {
        assert!(token.parse::<Command>().is_err(), "{token:?} should not parse");
    }
}

#[test]
fn test_status_frame_from_robot() {
    let text = json!({
        "event": "status",
        "data": {"modo": "linea", "velocidad": 65, "activo": true}
    })
    .to_string();

    let ServerFrame::Status(status) = decode_server_frame(&text).unwrap();
    assert_eq!(status.mode(), Some(ReportedMode::Known(Mode::Line)));
    assert_eq!(status.velocidad, Some(65));
    assert_eq!(status.activo, Some(true));
}

#[test]
fn test_status_frame_tolerates_odd_values() {
    let text = json!({
        "event": "status",
        "data": {"modo": null, "velocidad": "70", "extra": [1, 2]}
    })
    .to_string();

    let ServerFrame::Status(status) = decode_server_frame(&text).unwrap();
    assert_eq!(status.mode(), None);
    assert_eq!(status.velocidad, Some(70));
    assert_eq!(status.activo, None);
}
