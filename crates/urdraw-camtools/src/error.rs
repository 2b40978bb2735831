//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for path data interpretation,
//! parameter validation, and SVG document processing.

use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A path data problem was found.
    #[error("Path data error: {0}")]
    PathData(#[from] PathDataError),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Problems found while interpreting SVG path data.
///
/// None of these abort a path: the interpreter records them, skips the
/// offending input and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
    /// A token that is neither a command letter nor a number.
    #[error("Skipped unrecognized token '{token}' at token {position}")]
    UnknownToken { token: String, position: usize },

    /// A number appeared before any command letter, or after a close.
    #[error("Skipped number at token {position}: no command to apply it to")]
    MissingCommand { position: usize },

    /// An operand of the command could not be read as a number.
    #[error("Skipped '{command}' command: operand '{token}' at token {position} is not a number")]
    MalformedOperand {
        command: char,
        token: String,
        position: usize,
    },

    /// The command ran out of operands before its arity was met.
    #[error("Dropped '{command}' command: expected {expected} operands, found {found}")]
    TruncatedCommand {
        command: char,
        expected: usize,
        found: usize,
    },
}

/// Errors related to SVG document parsing and element conversion.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The SVG file could not be parsed.
    #[error("SVG parse error: {0}")]
    SvgParseError(String),

    /// The document root is not an `<svg>` element.
    #[error("Not an SVG document: root element is <{0}>")]
    NotSvg(String),

    /// An element lacks the attribute that defines its geometry.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute value could not be read.
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// An element has geometry that cannot be drawn (negative radius, ...).
    #[error("<{element}> cannot be drawn: {reason}")]
    InvalidGeometry { element: String, reason: String },

    /// The file is empty or contains no usable data.
    #[error("Empty file: {0}")]
    EmptyFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for file format operations.
pub type FileFormatResult<T> = Result<T, FileFormatError>;
