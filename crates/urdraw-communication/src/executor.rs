//! Trajectory execution
//!
//! Streams an immutable trajectory to a [`RobotSession`] strictly in order,
//! waiting for each motion to finish before the next one is started.
//!
//! # Safety guards
//! - The arm moves to the home pose before the first step and after the last.
//! - No commanded Z is ever below the pen-down height of the calibration frame.
//!   Travel moves are additionally kept a clearance above the surface.
//! - Travel moves can be split into several interpolated sub-moves.
//! - Steps run in batches; between batches an optional confirmation callback
//!   decides whether to continue. A refusal lifts the pen, returns home and
//!   ends the run with [`RobotError::Aborted`].
//! - Any session failure mid-run lifts the pen and returns home on a best
//!   effort basis before the error is reported.

use urdraw_core::{CalibrationFrame, LengthUnit, Pose, RobotError, TrajectoryStep};

use crate::session::RobotSession;
use crate::urscript;

/// Motion parameters for an execution run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutorConfig {
    /// Tool speed in m/s
    pub speed: f64,
    /// Tool acceleration in m/s²
    pub acceleration: f64,
    /// Unit of trajectory positions
    pub units: LengthUnit,
    /// Steps per batch between confirmations
    pub segment_size: usize,
    /// Sub-moves each travel move is split into; 1 moves directly
    pub travel_segments: usize,
    /// Minimum height above the surface for travel moves, in meters
    pub travel_clearance: f64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            acceleration: 0.5,
            units: LengthUnit::Millimeters,
            segment_size: 10,
            travel_segments: 1,
            travel_clearance: 0.005,
        }
    }
}

/// Passed to the confirmation callback after each completed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based number of the batch just finished
    pub batch: usize,
    pub total_batches: usize,
    pub steps_done: usize,
    pub total_steps: usize,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    pub steps_executed: usize,
    pub batches: usize,
    /// Motion commands sent, including home moves and travel sub-moves
    pub moves_sent: usize,
    /// Commanded poses whose Z had to be raised to a floor
    pub clamped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Travel,
    Draw,
}

/// Executes trajectories on a robot session
#[derive(Debug)]
pub struct TrajectoryExecutor<S: RobotSession> {
    session: S,
    frame: CalibrationFrame,
    config: ExecutorConfig,
    last_pose: Option<Pose>,
}

impl<S: RobotSession> TrajectoryExecutor<S> {
    pub fn new(session: S, frame: CalibrationFrame, config: ExecutorConfig) -> Self {
        Self {
            session,
            frame,
            config,
            last_pose: None,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run every step without pausing between batches
    pub fn execute(&mut self, steps: &[TrajectoryStep]) -> Result<ExecutionReport, RobotError> {
        self.execute_with_confirmation(steps, |_| true)
    }

    /// Run every step, asking `confirm` after each batch except the last
    pub fn execute_with_confirmation<F>(
        &mut self,
        steps: &[TrajectoryStep],
        mut confirm: F,
    ) -> Result<ExecutionReport, RobotError>
    where
        F: FnMut(&BatchProgress) -> bool,
    {
        if steps.is_empty() {
            return Err(RobotError::Aborted {
                reason: "trajectory is empty".to_string(),
            });
        }

        let segment_size = self.config.segment_size.max(1);
        let total_batches = steps.len().div_ceil(segment_size);
        let mut report = ExecutionReport::default();

        tracing::info!(
            "Executing {} steps in {} batches of up to {}",
            steps.len(),
            total_batches,
            segment_size
        );

        let home = self.frame.home_pose();
        self.travel_to(home, &mut report)?;

        for (index, batch) in steps.chunks(segment_size).enumerate() {
            for step in batch {
                let result = match step {
                    TrajectoryStep::Move(pose) => self.travel_to(*pose, &mut report),
                    TrajectoryStep::Line(pose) => self.move_to(*pose, Motion::Draw, &mut report),
                };
                if let Err(e) = result {
                    tracing::error!(
                        "Step {} of {} failed: {}",
                        report.steps_executed + 1,
                        steps.len(),
                        e
                    );
                    self.retreat();
                    return Err(e);
                }
                report.steps_executed += 1;
            }
            report.batches += 1;

            let progress = BatchProgress {
                batch: index + 1,
                total_batches,
                steps_done: report.steps_executed,
                total_steps: steps.len(),
            };
            tracing::info!(
                "Batch {}/{} done ({}/{} steps)",
                progress.batch,
                progress.total_batches,
                progress.steps_done,
                progress.total_steps
            );

            if progress.batch < total_batches && !confirm(&progress) {
                tracing::warn!("Execution stopped by operator after batch {}", progress.batch);
                self.retreat();
                return Err(RobotError::Aborted {
                    reason: format!(
                        "stopped after {} of {} steps",
                        progress.steps_done, progress.total_steps
                    ),
                });
            }
        }

        self.travel_to(home, &mut report)?;

        if report.clamped > 0 {
            tracing::warn!("{} poses were raised to a safe height", report.clamped);
        }
        tracing::info!("Trajectory finished: {} steps", report.steps_executed);
        Ok(report)
    }

    /// Lowest Z a travel move may command
    pub fn travel_floor(&self) -> f64 {
        let clearance = self.config.units.from_meters(self.config.travel_clearance);
        self.frame.pen_down_z().max(self.frame.surface_z() + clearance)
    }

    /// Raise `pose` to the floor of its motion kind if it would go lower
    fn guard(&self, pose: Pose, motion: Motion) -> (Pose, bool) {
        let floor = match motion {
            Motion::Draw => self.frame.pen_down_z(),
            Motion::Travel => self.travel_floor(),
        };
        if pose.z < floor {
            tracing::warn!("Z {} below {:?} floor {}, clamping", pose.z, motion, floor);
            (pose.with_z(floor), true)
        } else {
            (pose, false)
        }
    }

    /// Travel to `target`, split into `travel_segments` sub-moves when the
    /// current position is known
    fn travel_to(&mut self, target: Pose, report: &mut ExecutionReport) -> Result<(), RobotError> {
        let segments = self.config.travel_segments.max(1);
        let Some(start) = self.last_pose.filter(|_| segments > 1) else {
            return self.move_to(target, Motion::Travel, report);
        };

        tracing::debug!("Splitting travel move into {} segments", segments);
        for i in 1..segments {
            let t = i as f64 / segments as f64;
            self.move_to(start.lerp(&target, t), Motion::Travel, report)?;
        }
        self.move_to(target, Motion::Travel, report)
    }

    fn move_to(
        &mut self,
        pose: Pose,
        motion: Motion,
        report: &mut ExecutionReport,
    ) -> Result<(), RobotError> {
        let (pose, clamped) = self.guard(pose, motion);
        if clamped {
            report.clamped += 1;
        }

        let script = urscript::movel(
            &pose,
            self.config.units,
            self.config.acceleration,
            self.config.speed,
        );
        self.session.send_script(&script)?;
        self.session.wait_for_motion()?;
        report.moves_sent += 1;
        self.last_pose = Some(pose);
        Ok(())
    }

    /// Lift the pen where it is and go home, logging rather than failing
    fn retreat(&mut self) {
        let mut scratch = ExecutionReport::default();
        if let Some(last) = self.last_pose {
            let lifted = last.with_z(last.z.max(self.frame.pen_up_z()));
            if let Err(e) = self.move_to(lifted, Motion::Travel, &mut scratch) {
                tracing::warn!("Could not lift the pen: {}", e);
                return;
            }
        }
        let home = self.frame.home_pose();
        if let Err(e) = self.travel_to(home, &mut scratch) {
            tracing::warn!("Could not return home: {}", e);
        }
    }
}
