use urdraw_core::{CalibrationFrame, GeometryError, PenState, Pose};

#[test]
fn test_z_for_pen_state() {
    let frame = CalibrationFrame::new(10.0, Pose::default(), 5.0, 0.5).unwrap();
    assert_eq!(frame.z_for(PenState::Up), 15.0);
    assert_eq!(frame.z_for(PenState::Down), 10.5);
}

#[test]
fn test_non_finite_values_rejected() {
    let result = CalibrationFrame::new(f64::NAN, Pose::default(), 5.0, 0.0);
    assert_eq!(
        result,
        Err(GeometryError::NonFinite {
            name: "surface_z".to_string()
        })
    );

    let home = Pose::new(0.0, f64::INFINITY, 0.0, 0.0, 0.0, 0.0);
    let result = CalibrationFrame::new(0.0, home, 5.0, 0.0);
    assert!(matches!(result, Err(GeometryError::NonFinite { .. })));
}

#[test]
fn test_accessors_return_validated_values() {
    let home = Pose::new(-37.0, -295.0, -42.0, 2.2, 2.2, 0.0);
    let frame = CalibrationFrame::new(-145.0, home, 20.0, 0.5).unwrap();
    assert_eq!(frame.surface_z(), -145.0);
    assert_eq!(frame.home_pose(), home);
    assert_eq!(frame.pen_up_offset(), 20.0);
    assert_eq!(frame.pen_down_offset(), 0.5);
    assert!(frame.pen_down_z() < frame.pen_up_z());
}

#[test]
fn test_inverted_pen_heights_rejected() {
    let result = CalibrationFrame::new(0.0, Pose::default(), 0.0, 5.0);
    assert!(matches!(
        result,
        Err(GeometryError::InvertedPenHeights { .. })
    ));
}
