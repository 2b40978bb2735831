use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "urdraw", version = crate::LONG_VERSION, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub action: Commands,

    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Log file to append to
    #[clap(long, global = true, default_value = urdraw::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log to the console only
    #[clap(long, global = true)]
    pub no_log_file: bool,

    /// Emit JSON log lines on stdout
    #[clap(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an SVG drawing into a trajectory file
    Convert(Convert),
    /// Play a trajectory file on the robot
    Run(Run),
    /// Write a calibration file filled with defaults
    CalibrationTemplate(CalibrationTemplate),
    /// Write the built-in test drawings
    Samples(Samples),
}

#[derive(Args)]
pub struct Convert {
    /// SVG file to convert
    pub input: PathBuf,

    /// Trajectory file to write [default: input with .json extension]
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Calibration file
    #[clap(short, long, default_value = urdraw_settings::DEFAULT_CALIBRATION_FILE)]
    pub calibration: PathBuf,

    /// Converter config (.toml or .json) [default: platform config directory]
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct Run {
    /// Trajectory file to execute
    pub trajectory: PathBuf,

    /// Calibration file
    #[clap(short, long, default_value = urdraw_settings::DEFAULT_CALIBRATION_FILE)]
    pub calibration: PathBuf,

    /// Log the URScript instead of sending it
    #[clap(long)]
    pub dry_run: bool,

    /// Ask before every batch of steps
    #[clap(long)]
    pub confirm: bool,
}

#[derive(Args)]
pub struct CalibrationTemplate {
    /// Where to write the calibration file
    #[clap(default_value = urdraw_settings::DEFAULT_CALIBRATION_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[clap(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct Samples {
    /// Directory to write the drawings to
    #[clap(default_value = "drawings")]
    pub dir: PathBuf,

    /// Overwrite existing files
    #[clap(long)]
    pub force: bool,
}
