//! Trajectory file round trips and the fallback write location

use urdraw_core::{Pose, TrajectoryError, TrajectoryStep};
use urdraw_toolpath::{read_trajectory, write_trajectory_with_fallback};

fn steps() -> Vec<TrajectoryStep> {
    vec![
        TrajectoryStep::Move(Pose::new(-37.0, -295.0, -125.0, 2.2, 2.2, 0.0)),
        TrajectoryStep::Line(Pose::new(-37.0, -295.0, -145.0, 2.2, 2.2, 0.0)),
        TrajectoryStep::Line(Pose::new(-12.5, -280.25, -145.0, 2.2, 2.2, 0.0)),
        TrajectoryStep::Move(Pose::new(-12.5, -280.25, -125.0, 2.2, 2.2, 0.0)),
    ]
}

#[test]
fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");

    let written = write_trajectory_with_fallback(&path, dir.path(), &steps(), 4).unwrap();
    assert_eq!(written, path);

    let loaded = read_trajectory(&path).unwrap();
    assert_eq!(loaded, steps());
}

#[test]
fn test_fallback_location_used() {
    let dir = tempfile::tempdir().unwrap();
    let fallback = tempfile::tempdir().unwrap();
    let unwritable = dir.path().join("missing").join("drawing.json");

    let written = write_trajectory_with_fallback(&unwritable, fallback.path(), &steps(), 4).unwrap();
    assert_eq!(written, fallback.path().join("drawing.json"));
    assert!(!unwritable.exists());
    assert_eq!(read_trajectory(&written).unwrap().len(), 4);
}

#[test]
fn test_both_locations_fail() {
    let dir = tempfile::tempdir().unwrap();
    let unwritable = dir.path().join("missing").join("drawing.json");
    let bad_fallback = dir.path().join("also-missing");

    let err = write_trajectory_with_fallback(&unwritable, &bad_fallback, &steps(), 4).unwrap_err();
    assert!(matches!(err, TrajectoryError::Write { .. }));
}

#[test]
fn test_read_missing_file() {
    let err = read_trajectory("/nonexistent/trajectory.json").unwrap_err();
    assert!(matches!(err, TrajectoryError::Read { .. }));
}

#[test]
fn test_precision_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rounded.json");
    let steps = vec![TrajectoryStep::Line(Pose::new(
        1.23456789, 0.0, 0.0, 0.0, 0.0, 0.0,
    ))];

    write_trajectory_with_fallback(&path, dir.path(), &steps, 3).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("1.235"), "{}", content);
    assert_eq!(read_trajectory(&path).unwrap()[0].pose().x, 1.235);
}
