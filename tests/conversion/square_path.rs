use urdraw::{
    CalibrationFrame, ConversionStatus, Config, Converter, PenState, Point, Pose, TrajectoryStep,
    WorkspaceConfig,
};

fn frame() -> CalibrationFrame {
    CalibrationFrame::new(-145.0, Pose::new(0.0, 0.0, -42.0, 2.2, 2.2, 0.0), 20.0, 0.0).unwrap()
}

fn converter() -> Converter {
    let config = Config {
        workspace: WorkspaceConfig {
            width: 200.0,
            height: 200.0,
            margin: 1.0,
            ..WorkspaceConfig::default()
        },
        ..Config::default()
    };
    Converter::new(frame(), config)
}

#[test]
fn test_square_path_end_to_end() {
    let conversion = converter()
        .convert_path_data("M 0,0 L 100,0 L 100,100 L 0,100 Z")
        .unwrap();
    assert_eq!(conversion.status, ConversionStatus::Complete);
    assert_eq!(conversion.source_commands, 5);
    assert_eq!(conversion.drawn_commands, 5);

    let steps = &conversion.trajectory;
    assert_eq!(steps[0], TrajectoryStep::Move(Pose::new(-100.0, -100.0, -125.0, 2.2, 2.2, 0.0)));
    assert_eq!(steps[1].pen_state(), PenState::Down);

    let corners: Vec<Point> = steps
        .iter()
        .filter(|s| !s.is_move())
        .map(|s| s.pose().xy())
        .collect();
    assert_eq!(
        corners,
        vec![
            Point::new(-100.0, -100.0),
            Point::new(100.0, -100.0),
            Point::new(100.0, 100.0),
            Point::new(-100.0, 100.0),
            Point::new(-100.0, -100.0),
        ]
    );
    assert_eq!(steps.last(), Some(&TrajectoryStep::Move(frame().home_pose())));
}

#[test]
fn test_malformed_path_is_partial() {
    let conversion = converter()
        .convert_path_data("M 0,0 L 10,x L 100,100")
        .unwrap();
    assert!(matches!(
        conversion.status,
        ConversionStatus::Partial {
            path_diagnostics: 1,
            ..
        }
    ));
}

#[test]
fn test_overflowing_coordinate_is_skipped() {
    let conversion = converter()
        .convert_path_data("M 0 0 L 1e400 0 L 5 5")
        .unwrap();
    assert!(matches!(
        conversion.status,
        ConversionStatus::Partial {
            path_diagnostics: 1,
            ..
        }
    ));
    assert_eq!(conversion.source_commands, 2);
    assert!(conversion
        .trajectory
        .iter()
        .all(|s| s.pose().to_array().iter().all(|v| v.is_finite())));
}
