//! Error handling for urdraw
//!
//! Provides error types for the layers that can actually fail:
//! - Geometry errors (invalid workspace or tool parameters)
//! - Trajectory errors (empty output, trajectory file I/O and format)
//! - Robot errors (session, protocol and motion acknowledgement)
//!
//! Degenerate geometry met while converting a drawing is resolved locally
//! and never surfaces here. All error types use `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when conversion parameters cannot describe a valid placement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The target workspace has no usable area
    #[error("Invalid workspace {width} x {height}: dimensions must be positive")]
    InvalidWorkspace {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// The fill fraction must lie in (0, 1]
    #[error("Invalid margin factor {margin}: must be in (0, 1]")]
    InvalidMargin {
        /// Requested margin factor.
        margin: f64,
    },

    /// A numeric parameter is not finite
    #[error("Parameter '{name}' is not a finite number")]
    NonFinite {
        /// The parameter name.
        name: String,
    },

    /// Pen heights are inverted
    #[error("Pen-down offset {pen_down} must be below pen-up offset {pen_up}")]
    InvertedPenHeights {
        /// Pen-down offset above the surface.
        pen_down: f64,
        /// Pen-up offset above the surface.
        pen_up: f64,
    },
}

/// Trajectory error type
#[derive(Error, Debug, Clone)]
pub enum TrajectoryError {
    /// Nothing to draw
    #[error("Trajectory is empty")]
    Empty,

    /// The trajectory file does not follow the tagged step format
    #[error("Invalid trajectory format: {reason}")]
    InvalidFormat {
        /// Why the content was rejected.
        reason: String,
    },

    /// Reading a trajectory file failed
    #[error("Failed to read trajectory {path}: {reason}")]
    Read {
        /// The file that could not be read.
        path: String,
        /// The underlying failure.
        reason: String,
    },

    /// Writing failed at the requested location and at the fallback location
    #[error("Failed to write trajectory {path} (fallback {fallback}): {reason}")]
    Write {
        /// The requested output path.
        path: String,
        /// The fallback path that was also tried.
        fallback: String,
        /// The last failure.
        reason: String,
    },
}

/// Robot session error type
///
/// Represents failures of the external robot interfaces (secondary
/// script port, dashboard server).
#[derive(Error, Debug, Clone)]
pub enum RobotError {
    /// No connection is open
    #[error("Robot not connected")]
    NotConnected,

    /// Opening the TCP session failed
    #[error("Failed to connect to {host}:{port}: {reason}")]
    ConnectionFailed {
        /// Robot host name or address.
        host: String,
        /// TCP port.
        port: u16,
        /// The reason the connection failed.
        reason: String,
    },

    /// An operation did not finish in time
    #[error("Robot operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Sending or receiving failed on an open session
    #[error("Robot I/O error: {reason}")]
    Io {
        /// The reason for the I/O error.
        reason: String,
    },

    /// The controller answered something unexpected
    #[error("Unexpected dashboard reply to '{command}': {reply}")]
    UnexpectedReply {
        /// The dashboard command sent.
        command: String,
        /// The raw reply.
        reply: String,
    },

    /// Execution was stopped by the operator
    #[error("Execution aborted: {reason}")]
    Aborted {
        /// Why the run was stopped.
        reason: String,
    },
}
