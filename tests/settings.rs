use roombook::construct::Room;
use roombook::error::BookingError;
use roombook::settings::Settings;

#[test]
fn defaults_apply_to_an_empty_document() {
    let settings = Settings::from_toml("").expect("defaults");
    assert_eq!(settings.bind, "0.0.0.0");
    assert_eq!(settings.port, 3000);
    assert_eq!(settings.log, "info");
    assert_eq!(settings.rooms, vec!["Room A", "Room B", "Room C"]);
    assert_eq!(settings.address(), "0.0.0.0:3000");
}

#[test]
fn document_overrides_defaults() {
    let toml = r#"
        port = 8080
        bind = "127.0.0.1"
        rooms = ["Boardroom", "Library"]
    "#;
    let settings = Settings::from_toml(toml).expect("parsed");
    assert_eq!(settings.address(), "127.0.0.1:8080");
    assert_eq!(settings.log, "info");
    let rooms = settings.room_keeper();
    assert_eq!(rooms.list(), &[Room::new(1, "Boardroom"), Room::new(2, "Library")]);
}

#[test]
fn empty_room_list_is_rejected() {
    let result = Settings::from_toml("rooms = []");
    assert!(matches!(result, Err(BookingError::Config(_))), "{result:?}");
}

#[test]
fn blank_room_name_is_rejected() {
    let result = Settings::from_toml(r#"rooms = ["Room A", " "]"#);
    assert!(matches!(result, Err(BookingError::Config(_))), "{result:?}");
}

#[test]
fn bad_port_is_a_config_error() {
    let result = Settings::from_toml("port = \"many\"");
    assert!(matches!(result, Err(BookingError::Config(_))), "{result:?}");
}
