//! Error types for the settings crate.
//!
//! This module provides structured error types for converter configuration,
//! calibration files, and their persistence.

use std::io;
use thiserror::Error;
use urdraw_core::GeometryError;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file could not be loaded.
    #[error("Failed to load settings from {path}: {reason}")]
    LoadError { path: String, reason: String },

    /// The file could not be saved.
    #[error("Failed to save settings to {path}: {reason}")]
    SaveError { path: String, reason: String },

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A calibration validation error occurred.
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),
}

/// Errors related to converter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A section failed validation.
    #[error("Invalid [{section}] settings: {reason}")]
    InvalidSection { section: String, reason: String },

    /// The workspace cannot hold a drawing.
    #[error("Invalid workspace: {0}")]
    Workspace(#[from] GeometryError),
}

/// Errors related to calibration data.
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Surface height, home pose or pen offsets do not form a usable frame.
    #[error("Invalid calibration frame: {0}")]
    InvalidFrame(#[from] GeometryError),

    /// A value is out of its valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// A required value is empty.
    #[error("Missing value for '{0}'")]
    MissingValue(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;
