//! Trajectory generator.
//!
//! A two-state pen machine turns mapped drawing commands into robot poses:
//!
//! | state    | on `Move`                              | on `Line`                                |
//! |----------|----------------------------------------|------------------------------------------|
//! | Up       | travel at pen-up Z                     | lower in place, then draw at pen-down Z  |
//! | Down     | lift in place, then travel at pen-up Z | draw at pen-down Z                       |
//!
//! The machine starts and ends lifted. Every trajectory finishes with a
//! `Move` to the calibrated home pose.

use urdraw_core::{CalibrationFrame, DrawCommand, PenState, Point, Pose, TrajectoryStep};

/// Pen transitions inserted while generating, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub lifts: usize,
    pub lowers: usize,
}

#[derive(Debug, Clone)]
pub struct TrajectoryGenerator {
    frame: CalibrationFrame,
}

impl TrajectoryGenerator {
    pub fn new(frame: CalibrationFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &CalibrationFrame {
        &self.frame
    }

    fn pose(&self, point: Point, pen: PenState) -> Pose {
        Pose::at(point, self.frame.z_for(pen), self.frame.orientation())
    }

    /// Generate the robot trajectory for mapped commands
    pub fn generate(&self, commands: &[DrawCommand]) -> Vec<TrajectoryStep> {
        self.generate_with_stats(commands).0
    }

    pub fn generate_with_stats(
        &self,
        commands: &[DrawCommand],
    ) -> (Vec<TrajectoryStep>, GenerationStats) {
        let mut steps = Vec::with_capacity(commands.len() * 2 + 2);
        let mut stats = GenerationStats::default();
        let mut pen = PenState::Up;
        let mut current: Option<Point> = None;

        for command in commands {
            match *command {
                DrawCommand::Move(target) => {
                    if pen == PenState::Down {
                        if let Some(at) = current {
                            steps.push(TrajectoryStep::Move(self.pose(at, PenState::Up)));
                        }
                        pen = PenState::Up;
                        stats.lifts += 1;
                    }
                    steps.push(TrajectoryStep::Move(self.pose(target, PenState::Up)));
                    current = Some(target);
                }
                DrawCommand::Line(target) => {
                    if pen == PenState::Up {
                        // Without a known position the pen lowers over the target
                        let at = current.unwrap_or(target);
                        steps.push(TrajectoryStep::Line(self.pose(at, PenState::Down)));
                        pen = PenState::Down;
                        stats.lowers += 1;
                    }
                    steps.push(TrajectoryStep::Line(self.pose(target, PenState::Down)));
                    current = Some(target);
                }
            }
        }

        if pen == PenState::Down {
            if let Some(at) = current {
                steps.push(TrajectoryStep::Move(self.pose(at, PenState::Up)));
                stats.lifts += 1;
            }
        }
        steps.push(TrajectoryStep::Move(self.frame.home_pose()));

        tracing::info!(
            "Generated {} trajectory steps from {} commands ({} lowers, {} lifts)",
            steps.len(),
            commands.len(),
            stats.lowers,
            stats.lifts
        );
        (steps, stats)
    }
}
