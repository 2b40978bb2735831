use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use urdraw::{
    init_logging, read_trajectory, ConversionStatus, Converter, ExecutorConfig, LogOptions,
    RobotSession, TrajectoryExecutor, TrajectoryStep,
};
use urdraw_communication::{ConnectionParams, DryRunSession, MotionWait, UrSession};
use urdraw_settings::{CalibrationFile, Config};

mod cli;

use cli::{CalibrationTemplate, Cli, Commands, Convert, Run, Samples};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("URDRAW_BUILD_DATE"),
    ")"
);

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogOptions {
        default_directive: if cli.verbose { "debug" } else { "info" }.to_string(),
        log_file: (!cli.no_log_file).then(|| cli.log_file.clone()),
        json: cli.json_logs,
    })?;

    match cli.action {
        Commands::Convert(opts) => convert(opts),
        Commands::Run(opts) => run(opts),
        Commands::CalibrationTemplate(opts) => calibration_template(opts),
        Commands::Samples(opts) => samples(opts),
    }
}

fn convert(opts: Convert) -> Result<()> {
    let calibration = CalibrationFile::load_or_default(&opts.calibration)
        .with_context(|| format!("loading calibration {}", opts.calibration.display()))?;
    let config = Config::load_or_default(opts.config.as_deref()).context("loading config")?;

    let converter = Converter::from_calibration(&calibration, config)?;
    let converted = converter
        .convert_file(&opts.input, opts.output.as_deref())
        .with_context(|| format!("converting {}", opts.input.display()))?;

    let conversion = &converted.conversion;
    match conversion.status {
        ConversionStatus::Complete => tracing::info!(
            "Trajectory with {} steps in {} strokes written to {}",
            conversion.trajectory.len(),
            conversion.strokes,
            converted.output.display()
        ),
        ConversionStatus::Partial { .. } => tracing::warn!(
            "Partial trajectory with {} steps written to {}; see warnings above",
            conversion.trajectory.len(),
            converted.output.display()
        ),
    }
    Ok(())
}

fn run(opts: Run) -> Result<()> {
    let calibration = CalibrationFile::load_or_default(&opts.calibration)
        .with_context(|| format!("loading calibration {}", opts.calibration.display()))?;
    let frame = calibration.frame()?;
    let steps = read_trajectory(&opts.trajectory)
        .with_context(|| format!("reading trajectory {}", opts.trajectory.display()))?;

    let motion = calibration.motion();
    let config = ExecutorConfig {
        speed: motion.speed,
        acceleration: motion.acceleration,
        units: motion.units,
        segment_size: calibration.segment_size,
        travel_segments: motion.travel_segments,
        travel_clearance: motion.travel_clearance,
    };

    if opts.dry_run {
        return execute(DryRunSession::new(), frame, config, &steps, opts.confirm);
    }

    let connection = calibration.connection();
    let session = UrSession::connect(
        ConnectionParams::new(connection.host.clone(), connection.script_port),
        ConnectionParams::new(connection.host.clone(), connection.dashboard_port),
        MotionWait::default(),
    )
    .with_context(|| format!("connecting to robot at {}", connection.host))?;
    execute(session, frame, config, &steps, opts.confirm)
}

fn execute<S: RobotSession>(
    session: S,
    frame: urdraw::CalibrationFrame,
    config: ExecutorConfig,
    steps: &[TrajectoryStep],
    confirm: bool,
) -> Result<()> {
    let mut executor = TrajectoryExecutor::new(session, frame, config);
    let report = if confirm {
        executor.execute_with_confirmation(steps, |progress| {
            ask(&format!(
                "{}/{} steps done. Continue? [Y/n] ",
                progress.steps_done, progress.total_steps
            ))
        })
    } else {
        executor.execute(steps)
    }
    .context("executing trajectory")?;

    tracing::info!(
        "Executed {} steps in {} batches",
        report.steps_executed,
        report.batches
    );
    Ok(())
}

/// Prompt on stdout and read a yes/no answer; empty means yes
fn ask(prompt: &str) -> bool {
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

fn calibration_template(opts: CalibrationTemplate) -> Result<()> {
    if opts.path.exists() && !opts.force {
        bail!(
            "{} already exists, use --force to overwrite",
            opts.path.display()
        );
    }
    CalibrationFile::default()
        .save(&opts.path)
        .with_context(|| format!("writing {}", opts.path.display()))?;
    println!("Calibration template written to {}", opts.path.display());
    Ok(())
}

fn samples(opts: Samples) -> Result<()> {
    let written = urdraw::write_samples(&opts.dir, opts.force)
        .with_context(|| format!("writing samples to {}", opts.dir.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
