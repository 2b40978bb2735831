//! Calibration file handling
//!
//! The calibration file is a flat JSON object measured once per setup. Every
//! key is optional and falls back to the documented default:
//!
//! | key               | default                          |
//! |-------------------|----------------------------------|
//! | `drawing_surface` | `-145.0`                         |
//! | `home_position`   | `[-37, -295, -42, 2.2, 2.2, 0]`  |
//! | `pen_up_offset`   | `20.0`                           |
//! | `pen_down_offset` | `0.0`                            |
//! | `default_speed`   | `0.1` m/s                        |
//! | `default_acc`     | `0.5` m/s²                       |
//! | `robot_ip`        | `10.150.0.1`                     |
//! | `robot_port`      | `30002`                          |
//! | `dashboard_port`  | `29999`                          |
//! | `rtde_port`       | `30004`                          |
//! | `segment_size`    | `10`                             |
//! | `safe_move_segments` | `1`                           |
//! | `min_safety_distance` | 5 mm in `units`              |
//! | `units`           | `millimeters`                    |
//!
//! The file is turned into an immutable [`CalibrationFrame`] plus motion and
//! connection parameters, which are then passed explicitly to whoever needs
//! them.

use crate::error::{CalibrationError, CalibrationResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use urdraw_core::{CalibrationFrame, LengthUnit, Pose};

/// Default calibration file name, looked up in the working directory
pub const DEFAULT_CALIBRATION_FILE: &str = "calibration.json";

/// On-disk calibration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationFile {
    /// Robot Z at which the pen touches the paper
    pub drawing_surface: f64,
    /// Safe pose `[x, y, z, rx, ry, rz]`; its XY is the drawing center
    pub home_position: [f64; 6],
    /// Height above the surface while travelling
    pub pen_up_offset: f64,
    /// Height above the surface while drawing
    pub pen_down_offset: f64,
    /// Tool speed in m/s
    pub default_speed: f64,
    /// Tool acceleration in m/s²
    pub default_acc: f64,
    pub robot_ip: String,
    /// Secondary interface port accepting URScript
    pub robot_port: u16,
    pub dashboard_port: u16,
    pub rtde_port: u16,
    /// Steps executed between operator confirmations
    pub segment_size: usize,
    /// Interpolated sub-moves per travel move; 1 travels directly
    pub safe_move_segments: usize,
    /// Minimum travel height above the surface, in `units`. Defaults to 5 mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_safety_distance: Option<f64>,
    /// Unit of `drawing_surface`, `home_position` XYZ and the pen offsets
    pub units: LengthUnit,
}

impl Default for CalibrationFile {
    fn default() -> Self {
        Self {
            drawing_surface: -145.0,
            home_position: [-37.0, -295.0, -42.0, 2.2, 2.2, 0.0],
            pen_up_offset: 20.0,
            pen_down_offset: 0.0,
            default_speed: 0.1,
            default_acc: 0.5,
            robot_ip: "10.150.0.1".to_string(),
            robot_port: 30002,
            dashboard_port: 29999,
            rtde_port: 30004,
            segment_size: 10,
            safe_move_segments: 1,
            min_safety_distance: None,
            units: LengthUnit::Millimeters,
        }
    }
}

/// Speed and acceleration for linear moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// m/s
    pub speed: f64,
    /// m/s²
    pub acceleration: f64,
    /// Unit of trajectory positions
    pub units: LengthUnit,
    /// Sub-moves per travel move
    pub travel_segments: usize,
    /// Minimum travel height above the surface, in meters
    pub travel_clearance: f64,
}

/// Travel clearance used when the calibration does not set one
pub const DEFAULT_MIN_SAFETY_DISTANCE_M: f64 = 0.005;

/// Where to reach the robot controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotConnection {
    pub host: String,
    pub script_port: u16,
    pub dashboard_port: u16,
    pub rtde_port: u16,
}

impl CalibrationFile {
    /// Load a calibration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let calibration: Self = serde_json::from_str(&content)?;
        calibration.validate()?;

        tracing::info!("Calibration data loaded from {}", path.display());
        tracing::info!(
            "Drawing surface Z: {} {}, center X={} Y={}",
            calibration.drawing_surface,
            calibration.units.suffix(),
            calibration.home_position[0],
            calibration.home_position[1]
        );
        Ok(calibration)
    }

    /// Load a calibration file, or use defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(
                "Calibration file {} not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!("Calibration saved to {}", path.display());
        Ok(())
    }

    /// Validate every value
    pub fn validate(&self) -> CalibrationResult<()> {
        self.frame()?;

        for (key, value) in [
            ("default_speed", self.default_speed),
            ("default_acc", self.default_acc),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalibrationError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if self.robot_ip.trim().is_empty() {
            return Err(CalibrationError::MissingValue("robot_ip".to_string()));
        }
        for (key, port) in [
            ("robot_port", self.robot_port),
            ("dashboard_port", self.dashboard_port),
            ("rtde_port", self.rtde_port),
        ] {
            if port == 0 {
                return Err(CalibrationError::ValueOutOfRange {
                    key: key.to_string(),
                    value: port.to_string(),
                });
            }
        }
        for (key, count) in [
            ("segment_size", self.segment_size),
            ("safe_move_segments", self.safe_move_segments),
        ] {
            if count == 0 {
                return Err(CalibrationError::ValueOutOfRange {
                    key: key.to_string(),
                    value: "0".to_string(),
                });
            }
        }
        if let Some(distance) = self.min_safety_distance {
            if !distance.is_finite() || distance < 0.0 {
                return Err(CalibrationError::ValueOutOfRange {
                    key: "min_safety_distance".to_string(),
                    value: distance.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The calibration frame used for mapping and trajectory generation
    pub fn frame(&self) -> CalibrationResult<CalibrationFrame> {
        Ok(CalibrationFrame::new(
            self.drawing_surface,
            Pose::from_array(self.home_position),
            self.pen_up_offset,
            self.pen_down_offset,
        )?)
    }

    pub fn motion(&self) -> MotionSettings {
        MotionSettings {
            speed: self.default_speed,
            acceleration: self.default_acc,
            units: self.units,
            travel_segments: self.safe_move_segments,
            travel_clearance: self
                .min_safety_distance
                .map(|distance| self.units.to_meters(distance))
                .unwrap_or(DEFAULT_MIN_SAFETY_DISTANCE_M),
        }
    }

    pub fn connection(&self) -> RobotConnection {
        RobotConnection {
            host: self.robot_ip.clone(),
            script_port: self.robot_port,
            dashboard_port: self.dashboard_port,
            rtde_port: self.rtde_port,
        }
    }
}
