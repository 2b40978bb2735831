//! The square drawing placed in a 200 x 200 workspace around the origin

use urdraw_core::{CalibrationFrame, DrawCommand, PenState, Point, Pose, TrajectoryStep};
use urdraw_toolpath::{TrajectoryGenerator, WorkspaceConfig, WorkspaceMapper};

fn square() -> Vec<DrawCommand> {
    vec![
        DrawCommand::Move(Point::new(0.0, 0.0)),
        DrawCommand::Line(Point::new(100.0, 0.0)),
        DrawCommand::Line(Point::new(100.0, 100.0)),
        DrawCommand::Line(Point::new(0.0, 100.0)),
        DrawCommand::Line(Point::new(0.0, 0.0)),
    ]
}

fn frame() -> CalibrationFrame {
    let home = Pose::new(0.0, 0.0, 100.0, 2.2, 2.2, 0.0);
    CalibrationFrame::new(-145.0, home, 20.0, 0.0).unwrap()
}

fn workspace() -> WorkspaceConfig {
    WorkspaceConfig {
        width: 200.0,
        height: 200.0,
        margin: 1.0,
        ..WorkspaceConfig::default()
    }
}

#[test]
fn test_square_maps_to_side_200() {
    let mapper = WorkspaceMapper::for_calibration(workspace(), &frame());
    let mapped = mapper.map(&square());

    let expected = [
        (-100.0, -100.0),
        (100.0, -100.0),
        (100.0, 100.0),
        (-100.0, 100.0),
        (-100.0, -100.0),
    ];
    assert_eq!(mapped.len(), 5);
    for (command, (x, y)) in mapped.iter().zip(expected) {
        assert_eq!(command.point(), Point::new(x, y));
    }
    assert!(mapped[0].is_move());
    assert_eq!(mapped[0].point(), mapped[4].point());
}

#[test]
fn test_square_trajectory_pen_sequence() {
    let frame = frame();
    let mapped = WorkspaceMapper::for_calibration(workspace(), &frame).map(&square());
    let steps = TrajectoryGenerator::new(frame).generate(&mapped);

    // travel, lower, four edges, lift, home
    assert_eq!(steps.len(), 8);
    assert_eq!(
        steps[0],
        TrajectoryStep::Move(Pose::new(-100.0, -100.0, -125.0, 2.2, 2.2, 0.0))
    );
    assert_eq!(
        steps[1],
        TrajectoryStep::Line(Pose::new(-100.0, -100.0, -145.0, 2.2, 2.2, 0.0))
    );
    assert!(steps[2..6].iter().all(|s| s.pen_state() == PenState::Down));
    assert_eq!(steps[6].pen_state(), PenState::Up);
    assert_eq!(steps[6].pose().xy(), Point::new(-100.0, -100.0));
    assert_eq!(*steps.last().unwrap(), TrajectoryStep::Move(frame.home_pose()));
}
