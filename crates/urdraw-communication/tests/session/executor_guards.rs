use proptest::prelude::*;
use urdraw_communication::{ExecutorConfig, RobotSession, TrajectoryExecutor};
use urdraw_core::{CalibrationFrame, LengthUnit, Point, Pose, RobotError, TrajectoryStep};

// Records scripts, optionally failing on the n-th send
#[derive(Default)]
struct MockSession {
    scripts: Vec<String>,
    waits: usize,
    fail_on: Option<usize>,
}

impl RobotSession for MockSession {
    fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        if self.fail_on == Some(self.scripts.len()) {
            self.fail_on = None;
            return Err(RobotError::Io {
                reason: "link down".to_string(),
            });
        }
        self.scripts.push(script.to_string());
        Ok(())
    }

    fn wait_for_motion(&mut self) -> Result<(), RobotError> {
        self.waits += 1;
        Ok(())
    }
}

fn pose_values(script: &str) -> Vec<f64> {
    let start = script.find("p[").unwrap() + 2;
    let end = script[start..].find(']').unwrap() + start;
    script[start..end]
        .split(',')
        .map(|v| v.trim().parse().unwrap())
        .collect()
}

fn frame() -> CalibrationFrame {
    CalibrationFrame::new(
        -145.0,
        Pose::new(-37.0, -295.0, -42.0, 2.2, 2.2, 0.0),
        20.0,
        0.0,
    )
    .unwrap()
}

fn config(segment_size: usize) -> ExecutorConfig {
    ExecutorConfig {
        segment_size,
        ..ExecutorConfig::default()
    }
}

fn square(frame: &CalibrationFrame) -> Vec<TrajectoryStep> {
    let orientation = frame.orientation();
    let up = frame.pen_up_z();
    let down = frame.pen_down_z();
    let corners = [(0.0, -300.0), (50.0, -300.0), (50.0, -250.0), (0.0, -250.0)];
    let mut steps = vec![
        TrajectoryStep::Move(Pose::at(Point::new(0.0, -300.0), up, orientation)),
        TrajectoryStep::Line(Pose::at(Point::new(0.0, -300.0), down, orientation)),
    ];
    for (x, y) in corners.iter().skip(1).chain(corners.iter().take(1)) {
        steps.push(TrajectoryStep::Line(Pose::at(Point::new(*x, *y), down, orientation)));
    }
    steps.push(TrajectoryStep::Move(Pose::at(Point::new(0.0, -300.0), up, orientation)));
    steps
}

#[test]
fn test_every_motion_is_awaited() {
    let frame = frame();
    let steps = square(&frame);
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(3));
    let report = executor.execute(&steps).unwrap();

    assert_eq!(report.steps_executed, steps.len());
    assert_eq!(report.batches, 3);
    let session = executor.into_session();
    assert_eq!(session.scripts.len(), steps.len() + 2);
    assert_eq!(session.waits, session.scripts.len());
}

#[test]
fn test_confirmation_between_batches() {
    let frame = frame();
    let steps = square(&frame);
    let mut asked = Vec::new();
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(3));
    executor
        .execute_with_confirmation(&steps, |progress| {
            asked.push((progress.batch, progress.steps_done));
            true
        })
        .unwrap();

    // 7 steps in batches of 3: asked after the first two batches only
    assert_eq!(asked, vec![(1, 3), (2, 6)]);
}

#[test]
fn test_refusal_lifts_pen_and_returns_home() {
    let frame = frame();
    let steps = square(&frame);
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(4));
    let result = executor.execute_with_confirmation(&steps, |_| false);
    assert!(matches!(result, Err(RobotError::Aborted { .. })));

    let session = executor.into_session();
    // home + 4 steps + lift + home
    assert_eq!(session.scripts.len(), 7);
    let lift = pose_values(&session.scripts[5]);
    assert!((lift[2] - frame.pen_up_z() / 1000.0).abs() < 1e-9);
    assert_eq!(session.scripts[6], session.scripts[0]);
}

#[test]
fn test_session_failure_retreats() {
    let frame = frame();
    let steps = square(&frame);
    let session = MockSession {
        fail_on: Some(3),
        ..MockSession::default()
    };
    let mut executor = TrajectoryExecutor::new(session, frame, config(10));
    let result = executor.execute(&steps);
    assert!(matches!(result, Err(RobotError::Io { .. })));

    let session = executor.into_session();
    let last = session.scripts.last().unwrap();
    assert_eq!(last, &session.scripts[0]);
}

#[test]
fn test_positions_sent_in_meters() {
    let frame = frame();
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(10));
    executor.execute(&square(&frame)).unwrap();
    let session = executor.into_session();
    let home = pose_values(&session.scripts[0]);
    assert_eq!(home, vec![-0.037, -0.295, -0.042, 2.2, 2.2, 0.0]);
}

#[test]
fn test_meters_calibration_untouched() {
    let frame =
        CalibrationFrame::new(0.1, Pose::new(0.3, -0.2, 0.3, 0.0, 3.0, 0.0), 0.02, 0.0).unwrap();
    let steps = [TrajectoryStep::Move(Pose::new(0.3, -0.2, 0.12, 0.0, 3.0, 0.0))];
    let config = ExecutorConfig {
        units: LengthUnit::Meters,
        ..ExecutorConfig::default()
    };
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config);
    executor.execute(&steps).unwrap();
    let session = executor.into_session();
    assert_eq!(pose_values(&session.scripts[1])[2], 0.12);
}

#[test]
fn test_travel_moves_are_split() {
    let frame = frame();
    let steps = square(&frame);
    let config = ExecutorConfig {
        travel_segments: 4,
        ..config(10)
    };
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config);
    let report = executor.execute(&steps).unwrap();

    assert_eq!(report.steps_executed, steps.len());
    // home, 4 for the first travel, lower, 4 lines, 4 for the lift, 4 home
    assert_eq!(report.moves_sent, 18);

    let session = executor.into_session();
    assert_eq!(session.scripts.len(), 18);
    assert_eq!(session.waits, 18);

    // A quarter of the way from home to the first pen-up position
    let first = pose_values(&session.scripts[1]);
    let expected = [-0.02775, -0.29625, -0.06275, 2.2, 2.2, 0.0];
    for (got, want) in first.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{:?}", first);
    }
    assert_eq!(pose_values(&session.scripts[4])[..3], [0.0, -0.3, -0.125]);
    assert_eq!(session.scripts.last(), session.scripts.first());
}

#[test]
fn test_lines_are_never_split() {
    let frame = frame();
    let orientation = frame.orientation();
    let steps = [
        TrajectoryStep::Line(Pose::at(Point::new(-37.0, -295.0), -145.0, orientation)),
        TrajectoryStep::Line(Pose::at(Point::new(10.0, -295.0), -145.0, orientation)),
    ];
    let config = ExecutorConfig {
        travel_segments: 3,
        ..config(10)
    };
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config);
    let report = executor.execute(&steps).unwrap();
    // home, two lines, home in three parts
    assert_eq!(report.moves_sent, 6);
}

#[test]
fn test_travel_kept_above_surface_clearance() {
    let frame = frame();
    let orientation = frame.orientation();
    let at = Point::new(0.0, -300.0);
    let steps = [
        TrajectoryStep::Move(Pose::at(at, -143.0, orientation)),
        TrajectoryStep::Line(Pose::at(at, -143.0, orientation)),
        TrajectoryStep::Move(Pose::at(at, -125.0, orientation)),
    ];
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(10));
    let report = executor.execute(&steps).unwrap();
    assert_eq!(report.clamped, 1);

    let session = executor.into_session();
    // Travel raised to surface + 5 mm, drawing left at its height
    assert!((pose_values(&session.scripts[1])[2] + 0.140).abs() < 1e-9);
    assert!((pose_values(&session.scripts[2])[2] + 0.143).abs() < 1e-9);
}

#[test]
fn test_custom_travel_clearance() {
    let frame = frame();
    let steps = [TrajectoryStep::Move(Pose::new(0.0, -300.0, -140.0, 2.2, 2.2, 0.0))];
    let config = ExecutorConfig {
        travel_clearance: 0.010,
        ..config(10)
    };
    let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config);
    assert_eq!(executor.travel_floor(), -135.0);
    let report = executor.execute(&steps).unwrap();
    assert_eq!(report.clamped, 1);
    let session = executor.into_session();
    assert!((pose_values(&session.scripts[1])[2] + 0.135).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_travel_never_below_clearance(
        zs in prop::collection::vec(-400.0f64..100.0, 1..20),
        segments in 1usize..5,
    ) {
        let frame = frame();
        let steps: Vec<TrajectoryStep> = zs
            .iter()
            .map(|z| TrajectoryStep::Move(Pose::new(0.0, -300.0, *z, 2.2, 2.2, 0.0)))
            .collect();
        let config = ExecutorConfig {
            travel_segments: segments,
            ..config(5)
        };
        let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config);
        let floor = executor.travel_floor() / 1000.0;
        executor.execute(&steps).unwrap();

        for script in &executor.session().scripts {
            prop_assert!(pose_values(script)[2] >= floor - 1e-9);
        }
    }

    #[test]
    fn prop_never_below_pen_down(zs in prop::collection::vec(-400.0f64..100.0, 1..30)) {
        let frame = frame();
        let steps: Vec<TrajectoryStep> = zs
            .iter()
            .map(|z| TrajectoryStep::Line(Pose::new(0.0, -300.0, *z, 2.2, 2.2, 0.0)))
            .collect();
        let mut executor = TrajectoryExecutor::new(MockSession::default(), frame, config(5));
        let report = executor.execute(&steps).unwrap();

        let below = zs.iter().filter(|z| **z < frame.pen_down_z()).count();
        prop_assert_eq!(report.clamped, below);

        let floor = frame.pen_down_z() / 1000.0;
        for script in &executor.session().scripts {
            prop_assert!(pose_values(script)[2] >= floor - 1e-9);
        }
    }
}
