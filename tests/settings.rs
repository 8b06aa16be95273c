use robotgui::persistence::{load_or_create, load_settings_from_path, save_settings_to_path};
use robotgui::Settings;

#[test]
fn settings_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let settings = Settings {
        ip: "127.0.0.1".to_string(),
        dark_mode: false,
        first_run: false,
        ..Settings::default()
    };
    save_settings_to_path(&settings, &path).unwrap();
    assert_eq!(load_settings_from_path(&path).unwrap(), settings);
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let settings = load_or_create(&path).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(settings.first_run);
    assert!(path.exists());
    assert_eq!(load_settings_from_path(&path).unwrap(), settings);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "ip": "10.0.0.2", "log_level": 10 }"#).unwrap();

    let settings = load_or_create(&path).unwrap();
    assert_eq!(settings.ip, "10.0.0.2");
    assert_eq!(settings.tracing_level(), tracing::Level::DEBUG);
    assert_eq!(settings.camera_screen, Settings::default().camera_screen);
}
