//! # urdraw Communication
//!
//! Talks to a Universal Robots controller and streams trajectories to it.
//!
//! - **URScript**: `movel` formatting with unit conversion
//! - **Secondary interface**: TCP client that accepts URScript programs
//! - **Dashboard server**: line protocol used to acknowledge motion completion
//! - **Executor**: ordered, one-at-a-time trajectory execution with safety guards

pub mod dashboard;
pub mod executor;
pub mod secondary;
pub mod session;
pub mod urscript;

pub use dashboard::{parse_program_state, parse_running, DashboardClient, ProgramState};
pub use executor::{BatchProgress, ExecutionReport, ExecutorConfig, TrajectoryExecutor};
pub use secondary::{ConnectionParams, SecondaryClient};
pub use session::{DryRunSession, MotionWait, RobotSession, UrSession};
pub use urscript::{format_pose, movel};
