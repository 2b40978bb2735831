//! # urdraw Core
//!
//! Core types and utilities shared by every urdraw crate.
//! Provides the planar drawing commands produced from SVG input, the
//! robot poses and trajectory steps they are turned into, length units,
//! and the error types for each of those layers.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    Bounds, CalibrationFrame, DrawCommand, Orientation, PenState, Point, Pose, TrajectoryStep,
};

pub use error::{GeometryError, RobotError, TrajectoryError};

pub use units::LengthUnit;
