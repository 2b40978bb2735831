//! Length units
//!
//! The calibration frame fixes one linear unit for a whole run. Trajectory
//! files and the mapper keep that unit; only the URScript adapter converts,
//! because the controller always expects meters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear unit of robot-frame positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters
    #[default]
    #[serde(alias = "mm")]
    Millimeters,
    /// Meters
    #[serde(alias = "m")]
    Meters,
}

impl LengthUnit {
    /// Convert a value in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Millimeters => value / 1000.0,
            Self::Meters => value,
        }
    }

    /// Convert a value in meters to this unit
    pub fn from_meters(self, value: f64) -> f64 {
        match self {
            Self::Millimeters => value * 1000.0,
            Self::Meters => value,
        }
    }

    /// Short suffix used in log output
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Meters => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "Millimeters"),
            Self::Meters => write!(f, "Meters"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeters" | "millimetres" => Ok(Self::Millimeters),
            "m" | "meters" | "metres" => Ok(Self::Meters),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}
