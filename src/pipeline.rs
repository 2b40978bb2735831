//! End-to-end conversion
//!
//! SVG import → optimization → workspace mapping → trajectory generation →
//! trajectory file. Every stage gets its configuration explicitly from the
//! [`Converter`]; nothing is read from global state.

use std::path::{Path, PathBuf};
use thiserror::Error;
use urdraw_camtools::{
    CurveFlattener, FileFormatError, PathInterpreter, PathOptimizer, SvgImport, SvgImporter,
};
use urdraw_core::{CalibrationFrame, DrawCommand, TrajectoryError, TrajectoryStep};
use urdraw_settings::{CalibrationError, CalibrationFile, Config};
use urdraw_toolpath::{
    default_output_path, write_trajectory, GenerationStats, TrajectoryGenerator, WorkspaceMapper,
};

/// Why a conversion produced no trajectory
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The SVG could not be read or parsed at all
    #[error("Could not import {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: FileFormatError,
    },

    /// The input parsed but contained nothing drawable
    #[error("Nothing to draw in {0}")]
    NothingToDraw(String),

    /// The calibration does not describe a usable frame
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// The trajectory could not be written
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

/// Whether every element made it into the trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Complete,
    /// Some elements or path segments were skipped
    Partial {
        skipped_elements: usize,
        path_diagnostics: usize,
    },
}

impl ConversionStatus {
    fn of(import: &SvgImport) -> Self {
        if import.is_partial() {
            Self::Partial {
                skipped_elements: import.skipped.len(),
                path_diagnostics: import.path_diagnostics.len(),
            }
        } else {
            Self::Complete
        }
    }
}

/// Result of one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub trajectory: Vec<TrajectoryStep>,
    /// Commands produced by the import
    pub source_commands: usize,
    /// Commands left after optimization
    pub drawn_commands: usize,
    /// Strokes of at most `optimizer.max_segments_per_stroke` commands
    pub strokes: usize,
    pub stats: GenerationStats,
    pub status: ConversionStatus,
}

/// A conversion written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFile {
    pub conversion: Conversion,
    /// Where the trajectory actually landed, possibly the fallback location
    pub output: PathBuf,
}

/// Runs the conversion stages with one calibration and one configuration
#[derive(Debug, Clone)]
pub struct Converter {
    config: Config,
    importer: SvgImporter,
    optimizer: PathOptimizer,
    mapper: WorkspaceMapper,
    generator: TrajectoryGenerator,
}

impl Converter {
    pub fn new(frame: CalibrationFrame, config: Config) -> Self {
        Self {
            config,
            importer: SvgImporter::new(config.flattening),
            optimizer: PathOptimizer::new(config.optimizer),
            mapper: WorkspaceMapper::for_calibration(config.workspace, &frame),
            generator: TrajectoryGenerator::new(frame),
        }
    }

    /// Build from a loaded calibration file
    pub fn from_calibration(
        calibration: &CalibrationFile,
        config: Config,
    ) -> Result<Self, ConvertError> {
        Ok(Self::new(calibration.frame()?, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Optimize, map and generate. The status is always `Complete`; callers
    /// that know about skipped input override it.
    pub fn convert_commands(&self, commands: &[DrawCommand]) -> Conversion {
        let optimized = self.optimizer.optimize(commands);
        let strokes = self.optimizer.strokes(&optimized).len();
        let mapped = self.mapper.map(&optimized);
        let (trajectory, stats) = self.generator.generate_with_stats(&mapped);
        Conversion {
            trajectory,
            source_commands: commands.len(),
            drawn_commands: optimized.len(),
            strokes,
            stats,
            status: ConversionStatus::Complete,
        }
    }

    /// Convert raw path data, as found in a `d` attribute
    pub fn convert_path_data(&self, data: &str) -> Result<Conversion, ConvertError> {
        let interpreter = PathInterpreter::new(CurveFlattener::new(self.config.flattening));
        let parse = interpreter.interpret(data);
        if parse.commands.is_empty() {
            return Err(ConvertError::NothingToDraw("path data".to_string()));
        }

        let status = if parse.is_clean() {
            ConversionStatus::Complete
        } else {
            ConversionStatus::Partial {
                skipped_elements: 0,
                path_diagnostics: parse.diagnostics.len(),
            }
        };
        Ok(Conversion {
            status,
            ..self.convert_commands(&parse.commands)
        })
    }

    /// Convert SVG markup
    pub fn convert_svg(&self, svg: &str) -> Result<Conversion, ConvertError> {
        let import = self
            .importer
            .import_str(svg)
            .map_err(|source| ConvertError::Import {
                path: "<memory>".to_string(),
                source,
            })?;
        self.convert_import(import, "<memory>")
    }

    /// Convert an SVG file and write the trajectory.
    ///
    /// `output` defaults to the input path with a `.json` extension.
    pub fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ConvertedFile, ConvertError> {
        let result = self.convert_file_inner(input, output);
        if let Err(e) = &result {
            tracing::error!("Conversion of {} failed: {}", input.display(), e);
        }
        result
    }

    fn convert_file_inner(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ConvertedFile, ConvertError> {
        let name = input.display().to_string();
        let import = self
            .importer
            .import_file(input)
            .map_err(|source| ConvertError::Import {
                path: name.clone(),
                source,
            })?;
        let conversion = self.convert_import(import, &name)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input));
        let written = write_trajectory(
            &output,
            &conversion.trajectory,
            self.config.output.precision,
        )?;

        Ok(ConvertedFile {
            conversion,
            output: written,
        })
    }

    fn convert_import(&self, import: SvgImport, name: &str) -> Result<Conversion, ConvertError> {
        if import.is_empty() {
            return Err(ConvertError::NothingToDraw(name.to_string()));
        }

        let status = ConversionStatus::of(&import);
        match status {
            ConversionStatus::Complete => tracing::info!(
                "Imported {} elements from {} ({} commands)",
                import.converted,
                name,
                import.commands.len()
            ),
            ConversionStatus::Partial {
                skipped_elements,
                path_diagnostics,
            } => tracing::warn!(
                "Partially imported {}: {} elements converted, {} skipped, {} path data problems",
                name,
                import.converted,
                skipped_elements,
                path_diagnostics
            ),
        }

        Ok(Conversion {
            status,
            ..self.convert_commands(&import.commands)
        })
    }
}

/// Convert `input` with the given calibration and configuration
pub fn convert_svg_file(
    input: &Path,
    output: Option<&Path>,
    calibration: &CalibrationFile,
    config: Config,
) -> Result<ConvertedFile, ConvertError> {
    Converter::from_calibration(calibration, config)?.convert_file(input, output)
}
