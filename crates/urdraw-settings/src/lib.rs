//! urdraw Settings Crate
//!
//! Handles the calibration file that anchors drawings in the robot frame and
//! the converter configuration (workspace, flattening, optimizer, output).

pub mod calibration;
pub mod config;
pub mod error;

pub use calibration::{
    CalibrationFile, MotionSettings, RobotConnection, DEFAULT_CALIBRATION_FILE,
    DEFAULT_MIN_SAFETY_DISTANCE_M,
};
pub use config::Config;
pub use error::{
    CalibrationError, CalibrationResult, ConfigError, ConfigResult, SettingsError,
    SettingsResult,
};
