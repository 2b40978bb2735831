//! # urdraw Toolpath
//!
//! Turns planar drawing commands into a robot trajectory and persists it.
//!
//! - **Workspace Mapper**: scales and centers a drawing inside the physical drawing area
//! - **Trajectory Generator**: pen-up/pen-down state machine producing tool poses
//! - **Trajectory File**: tagged JSON trajectory format with a fallback write location

pub mod generator;
pub mod mapper;
pub mod trajectory_file;

pub use generator::{GenerationStats, TrajectoryGenerator};
pub use mapper::{Placement, ScaleFactors, WorkspaceConfig, WorkspaceMapper};
pub use trajectory_file::{
    default_output_path, read_trajectory, write_trajectory, write_trajectory_with_fallback,
    OutputConfig,
};
