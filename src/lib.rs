//! # urdraw
//!
//! Draws SVG artwork with a Universal Robots arm holding a pen.
//!
//! ## Architecture
//!
//! urdraw is organized as a workspace with multiple crates:
//!
//! 1. **urdraw-core** - Geometry and trajectory types, units, errors
//! 2. **urdraw-camtools** - SVG import, path interpretation, curve flattening, optimization
//! 3. **urdraw-toolpath** - Workspace mapping, pen state machine, trajectory files
//! 4. **urdraw-settings** - Calibration file and converter configuration
//! 5. **urdraw-communication** - URScript, controller sessions, trajectory execution
//! 6. **urdraw** - Conversion pipeline, logging setup and the command line tool
//!
//! ## Pipeline
//!
//! SVG file → drawing commands → optimized strokes → workspace placement →
//! pen-up/pen-down trajectory → trajectory file → robot.

pub mod pipeline;

pub use pipeline::{
    convert_svg_file, Conversion, ConversionStatus, ConvertError, ConvertedFile, Converter,
};

pub use urdraw_core::{
    Bounds, CalibrationFrame, DrawCommand, LengthUnit, PenState, Point, Pose, TrajectoryStep,
};

pub use urdraw_camtools::{
    write_samples, CurveFlattener, FlattenerConfig, OptimizerConfig, PathInterpreter,
    PathOptimizer, Sample, ShapeAdapter, SvgImport, SvgImporter,
};

pub use urdraw_toolpath::{
    read_trajectory, write_trajectory, GenerationStats, OutputConfig, TrajectoryGenerator,
    WorkspaceConfig, WorkspaceMapper,
};

pub use urdraw_settings::{CalibrationFile, Config};

pub use urdraw_communication::{
    DryRunSession, ExecutionReport, ExecutorConfig, RobotSession, TrajectoryExecutor, UrSession,
};

use std::path::PathBuf;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("URDRAW_BUILD_DATE");

/// Default log file, appended to on every run
pub const DEFAULT_LOG_FILE: &str = "urdraw.log";

/// Logging setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Directive used when `RUST_LOG` is not set
    pub default_directive: String,
    /// Also append plain-text logs to this file
    pub log_file: Option<PathBuf>,
    /// Emit JSON lines on stdout instead of human-readable output
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            json: false,
        }
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stdout
/// - RUST_LOG environment variable support, INFO otherwise
/// - An optional log file; if it cannot be opened logging stays console-only
pub fn init_logging(options: LogOptions) -> anyhow::Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_directive))?;

    let console = fmt::layer().with_writer(std::io::stdout).with_target(true);
    let console = if options.json {
        console.json().boxed()
    } else {
        console.boxed()
    };

    let mut file_error = None;
    let file_layer = options.log_file.as_ref().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true),
            ),
            Err(e) => {
                file_error = Some((path.clone(), e));
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()?;

    if let Some((path, e)) = file_error {
        tracing::warn!("Could not open log file {}: {}", path.display(), e);
    }
    Ok(())
}
