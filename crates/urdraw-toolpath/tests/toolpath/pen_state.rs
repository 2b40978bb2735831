//! Pen state machine properties

use proptest::prelude::*;
use urdraw_core::{CalibrationFrame, DrawCommand, PenState, Point, Pose, TrajectoryStep};
use urdraw_toolpath::TrajectoryGenerator;

fn frame() -> CalibrationFrame {
    let home = Pose::new(-37.0, -295.0, -42.0, 2.2, 2.2, 0.0);
    CalibrationFrame::new(-145.0, home, 20.0, 0.0).unwrap()
}

fn command_strategy() -> impl Strategy<Value = DrawCommand> {
    (any::<bool>(), -100.0f64..100.0, -100.0f64..100.0).prop_map(|(is_move, x, y)| {
        let point = Point::new(x, y);
        if is_move {
            DrawCommand::Move(point)
        } else {
            DrawCommand::Line(point)
        }
    })
}

proptest! {
    #[test]
    fn every_step_sits_at_its_pen_height(
        commands in prop::collection::vec(command_strategy(), 0..60)
    ) {
        let frame = frame();
        let steps = TrajectoryGenerator::new(frame).generate(&commands);
        let (home, body) = steps.split_last().unwrap();

        prop_assert_eq!(*home, TrajectoryStep::Move(frame.home_pose()));
        for step in body {
            prop_assert_eq!(step.pose().z, frame.z_for(step.pen_state()));
            prop_assert_eq!(step.pose().orientation(), frame.orientation());
        }
    }

    #[test]
    fn pen_changes_height_only_in_place(
        commands in prop::collection::vec(command_strategy(), 1..60)
    ) {
        let frame = frame();
        let steps = TrajectoryGenerator::new(frame).generate(&commands);
        let body = &steps[..steps.len() - 1];

        // Every transition between pen states happens without XY travel
        for pair in body.windows(2) {
            if pair[0].pen_state() != pair[1].pen_state() {
                prop_assert_eq!(pair[0].pose().xy(), pair[1].pose().xy());
            }
        }
        // Ends lifted before going home
        if let Some(last) = body.last() {
            prop_assert_eq!(last.pen_state(), PenState::Up);
        }
    }

    #[test]
    fn drawn_segments_match_lines(
        commands in prop::collection::vec(command_strategy(), 0..60)
    ) {
        let steps = TrajectoryGenerator::new(frame()).generate(&commands);
        let line_commands = commands.iter().filter(|c| c.is_line()).count();
        let lowers = steps
            .windows(2)
            .filter(|w| w[0].pen_state() == PenState::Up && w[1].pen_state() == PenState::Down)
            .count()
            + usize::from(steps.first().is_some_and(|s| s.pen_state() == PenState::Down));
        let line_steps = steps.iter().filter(|s| s.pen_state() == PenState::Down).count();
        // One extra Line step per lowering
        prop_assert_eq!(line_steps, line_commands + lowers);
    }
}

#[test]
fn test_single_move_stays_lifted() {
    let frame = frame();
    let steps =
        TrajectoryGenerator::new(frame).generate(&[DrawCommand::Move(Point::new(1.0, 2.0))]);

    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(TrajectoryStep::is_move));
    assert_eq!(steps[0].pose().z, frame.pen_up_z());
    assert_eq!(steps[1], TrajectoryStep::Move(frame.home_pose()));
}

#[test]
fn test_line_without_position_lowers_on_target() {
    let frame = frame();
    let steps =
        TrajectoryGenerator::new(frame).generate(&[DrawCommand::Line(Point::new(4.0, 4.0))]);
    assert_eq!(steps[0].pen_state(), PenState::Down);
    assert_eq!(steps[0].pose().xy(), Point::new(4.0, 4.0));
    assert_eq!(steps[1].pose().xy(), Point::new(4.0, 4.0));
}
