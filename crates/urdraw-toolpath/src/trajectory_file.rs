//! Trajectory file reading and writing.
//!
//! A trajectory file is a JSON array with one record per step:
//!
//! ```json
//! [
//! ["move",[-37.0,-295.0,-125.0,2.2,2.2,0.0]],
//! ["line",[-37.0,-295.0,-145.0,2.2,2.2,0.0]]
//! ]
//! ```
//!
//! The tag carries the pen state, so untagged `[[x, y, z, rx, ry, rz]]`
//! records are rejected rather than guessed. Positions keep the calibration
//! unit; rotations are radians. All values in one file share the same
//! number of decimals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use urdraw_core::{Pose, TrajectoryError, TrajectoryStep};

/// Trajectory output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places kept for every value
    pub precision: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.precision > 10 {
            return Err(format!(
                "precision must be between 0 and 10 decimals, got {}",
                self.precision
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StepTag {
    Move,
    Line,
}

#[derive(Debug, Serialize, Deserialize)]
struct StepRecord(StepTag, [f64; 6]);

impl StepRecord {
    fn from_step(step: &TrajectoryStep, precision: u32) -> Self {
        let tag = if step.is_move() {
            StepTag::Move
        } else {
            StepTag::Line
        };
        Self(tag, step.pose().to_array().map(|v| round_to(v, precision)))
    }

    fn into_step(self) -> TrajectoryStep {
        let pose = Pose::from_array(self.1);
        match self.0 {
            StepTag::Move => TrajectoryStep::Move(pose),
            StepTag::Line => TrajectoryStep::Line(pose),
        }
    }
}

/// Round to `precision` decimals, folding negative zero into zero
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Serialize steps, one record per line
pub fn to_json(steps: &[TrajectoryStep], precision: u32) -> Result<String, TrajectoryError> {
    if steps.is_empty() {
        return Err(TrajectoryError::Empty);
    }
    // JSON has no NaN or infinity; serde_json would write them as null
    if let Some(index) = steps
        .iter()
        .position(|step| step.pose().to_array().iter().any(|v| !v.is_finite()))
    {
        return Err(TrajectoryError::InvalidFormat {
            reason: format!("step {}: pose has a non-finite value", index),
        });
    }
    let records = steps
        .iter()
        .map(|step| serde_json::to_string(&StepRecord::from_step(step, precision)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TrajectoryError::InvalidFormat {
            reason: e.to_string(),
        })?;
    Ok(format!("[\n{}\n]\n", records.join(",\n")))
}

/// Parse a trajectory file's content
pub fn from_json(content: &str) -> Result<Vec<TrajectoryStep>, TrajectoryError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| TrajectoryError::InvalidFormat {
            reason: e.to_string(),
        })?;
    let serde_json::Value::Array(records) = value else {
        return Err(TrajectoryError::InvalidFormat {
            reason: "expected a JSON array of steps".to_string(),
        });
    };
    if records.is_empty() {
        return Err(TrajectoryError::Empty);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if is_untagged_record(&record) {
                return Err(TrajectoryError::InvalidFormat {
                    reason: format!(
                        "step {}: untagged pose records are not supported, \
                         expected [\"move\"|\"line\", [x, y, z, rx, ry, rz]]",
                        index
                    ),
                });
            }
            serde_json::from_value::<StepRecord>(record)
                .map(StepRecord::into_step)
                .map_err(|e| TrajectoryError::InvalidFormat {
                    reason: format!("step {}: {}", index, e),
                })
        })
        .collect()
}

/// `[[x, y, z, rx, ry, rz]]`: a pose with no tag
fn is_untagged_record(record: &serde_json::Value) -> bool {
    match record.as_array().map(Vec::as_slice) {
        Some([serde_json::Value::Array(pose)]) => pose.len() == 6,
        _ => false,
    }
}

/// Read a trajectory file
pub fn read_trajectory(path: impl AsRef<Path>) -> Result<Vec<TrajectoryStep>, TrajectoryError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| TrajectoryError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let steps = from_json(&content)?;
    tracing::info!("Loaded {} trajectory steps from {}", steps.len(), path.display());
    Ok(steps)
}

/// Write a trajectory file, falling back to the current directory.
///
/// Returns the path the file was actually written to.
pub fn write_trajectory(
    path: impl AsRef<Path>,
    steps: &[TrajectoryStep],
    precision: u32,
) -> Result<PathBuf, TrajectoryError> {
    let fallback_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    write_trajectory_with_fallback(path, &fallback_dir, steps, precision)
}

/// Write a trajectory file to `path`, or under `fallback_dir` with the same
/// file name if that fails
pub fn write_trajectory_with_fallback(
    path: impl AsRef<Path>,
    fallback_dir: &Path,
    steps: &[TrajectoryStep],
    precision: u32,
) -> Result<PathBuf, TrajectoryError> {
    let path = path.as_ref();
    let content = to_json(steps, precision)?;

    let primary_error = match std::fs::write(path, &content) {
        Ok(()) => {
            tracing::info!("Wrote {} trajectory steps to {}", steps.len(), path.display());
            return Ok(path.to_path_buf());
        }
        Err(e) => e,
    };

    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("trajectory.json"));
    let fallback = fallback_dir.join(file_name);
    tracing::warn!(
        "Could not write {}: {}; trying {}",
        path.display(),
        primary_error,
        fallback.display()
    );

    match std::fs::write(&fallback, &content) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} trajectory steps to fallback {}",
                steps.len(),
                fallback.display()
            );
            Ok(fallback)
        }
        Err(e) => Err(TrajectoryError::Write {
            path: path.display().to_string(),
            fallback: fallback.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Default trajectory path for an input drawing: same name, `.json` extension
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("json")
}
