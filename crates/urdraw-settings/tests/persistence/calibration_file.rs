use urdraw_core::{LengthUnit, Orientation, Point};
use urdraw_settings::{CalibrationFile, SettingsError};

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");

    let calibration = CalibrationFile {
        drawing_surface: -150.25,
        home_position: [-40.0, -300.0, -40.0, 2.2, 2.2, 0.0],
        pen_up_offset: 15.0,
        robot_ip: "192.168.1.20".to_string(),
        segment_size: 25,
        ..CalibrationFile::default()
    };
    calibration.save(&path).unwrap();

    let loaded = CalibrationFile::load(&path).unwrap();
    assert_eq!(loaded, calibration);

    let frame = loaded.frame().unwrap();
    assert_eq!(frame.center(), Point::new(-40.0, -300.0));
    assert_eq!(frame.orientation(), Orientation::new(2.2, 2.2, 0.0));
    assert_eq!(frame.pen_up_z(), -135.25);
}

#[test]
fn test_legacy_file_without_new_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    std::fs::write(
        &path,
        r#"{
            "home_position": [-37, -295, -42, 2.2, 2.2, 0],
            "drawing_surface": -146.2,
            "default_speed": 0.05,
            "default_acc": 0.3,
            "robot_ip": "10.150.0.1",
            "robot_port": 30002
        }"#,
    )
    .unwrap();

    let loaded = CalibrationFile::load(&path).unwrap();
    assert_eq!(loaded.default_speed, 0.05);
    assert_eq!(loaded.pen_up_offset, 20.0);
    assert_eq!(loaded.units, LengthUnit::Millimeters);
    assert_eq!(loaded.motion().acceleration, 0.3);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        CalibrationFile::load(&path),
        Err(SettingsError::LoadError { .. })
    ));
    assert_eq!(
        CalibrationFile::load_or_default(&path).unwrap(),
        CalibrationFile::default()
    );
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        CalibrationFile::load_or_default(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.json");
    std::fs::write(&path, r#"{"pen_up_offset": 0.0, "pen_down_offset": 3.0}"#).unwrap();

    assert!(matches!(
        CalibrationFile::load(&path),
        Err(SettingsError::Calibration(_))
    ));
}
