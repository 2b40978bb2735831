//! URScript formatting
//!
//! The controller expects positions in meters and rotations as a rotation
//! vector in radians. Poses coming from a trajectory are in the calibration
//! unit and are converted here.

use urdraw_core::{LengthUnit, Pose};

/// Decimal places written for every pose component
const POSE_DECIMALS: usize = 6;

/// Format a pose as a URScript pose literal, `p[x, y, z, rx, ry, rz]`.
pub fn format_pose(pose: &Pose, units: LengthUnit) -> String {
    let values = [
        units.to_meters(pose.x),
        units.to_meters(pose.y),
        units.to_meters(pose.z),
        pose.rx,
        pose.ry,
        pose.rz,
    ];
    let parts: Vec<String> = values
        .iter()
        .map(|v| format!("{:.*}", POSE_DECIMALS, fold_zero(*v)))
        .collect();
    format!("p[{}]", parts.join(", "))
}

/// Linear tool-space move to `pose`.
///
/// `acceleration` is in m/s², `velocity` in m/s.
pub fn movel(pose: &Pose, units: LengthUnit, acceleration: f64, velocity: f64) -> String {
    format!(
        "movel({}, a={}, v={})",
        format_pose(pose, units),
        acceleration,
        velocity
    )
}

fn fold_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
