//! Dashboard server client
//!
//! Newline-terminated text protocol on port 29999. The server greets every
//! new connection with one banner line and answers each command with one
//! line. Only the queries needed to observe motion completion are wrapped.

use std::fmt;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use urdraw_core::RobotError;

use crate::secondary::ConnectionParams;

/// Default dashboard server port
pub const DEFAULT_DASHBOARD_PORT: u16 = 29999;

/// Program execution state reported by `programState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "STOPPED"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Paused => write!(f, "PAUSED"),
        }
    }
}

/// Parse a `running` reply, e.g. `Program running: true`
pub fn parse_running(reply: &str) -> Option<bool> {
    let value = reply.trim().strip_prefix("Program running:")?.trim();
    match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a `programState` reply, e.g. `PLAYING drawing.urp`
pub fn parse_program_state(reply: &str) -> Option<ProgramState> {
    let state = reply.split_whitespace().next()?;
    match state.to_ascii_uppercase().as_str() {
        "STOPPED" => Some(ProgramState::Stopped),
        "PLAYING" => Some(ProgramState::Playing),
        "PAUSED" => Some(ProgramState::Paused),
        _ => None,
    }
}

#[derive(Debug)]
struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

/// Dashboard server session
#[derive(Debug)]
pub struct DashboardClient {
    params: ConnectionParams,
    connection: Option<Connection>,
}

impl DashboardClient {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            connection: None,
        }
    }

    /// Connect and consume the greeting banner
    pub fn connect(&mut self) -> Result<(), RobotError> {
        let stream = self.params.open()?;
        let writer = stream.try_clone().map_err(io_error)?;
        let mut connection = Connection {
            reader: BufReader::new(stream),
            writer,
        };
        let banner = read_line(&mut connection.reader, self.params.timeout.as_millis() as u64)?;
        tracing::info!(
            "Connected to dashboard server at {}:{}: {}",
            self.params.host,
            self.params.port,
            banner
        );
        self.connection = Some(connection);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            let _ = connection.writer.write_all(b"quit\n");
            tracing::info!("Dashboard connection closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Send one command and return the reply line without its terminator
    pub fn send_and_receive(&mut self, command: &str) -> Result<String, RobotError> {
        let timeout_ms = self.params.timeout.as_millis() as u64;
        let connection = self.connection.as_mut().ok_or(RobotError::NotConnected)?;

        connection
            .writer
            .write_all(format!("{}\n", command.trim_end()).as_bytes())
            .and_then(|_| connection.writer.flush())
            .map_err(io_error)?;

        let reply = read_line(&mut connection.reader, timeout_ms)?;
        tracing::trace!("Dashboard '{}' -> '{}'", command, reply);
        Ok(reply)
    }

    /// Whether a program is currently running
    pub fn is_running(&mut self) -> Result<bool, RobotError> {
        let reply = self.send_and_receive("running")?;
        parse_running(&reply).ok_or_else(|| RobotError::UnexpectedReply {
            command: "running".to_string(),
            reply,
        })
    }

    pub fn program_state(&mut self) -> Result<ProgramState, RobotError> {
        let reply = self.send_and_receive("programState")?;
        parse_program_state(&reply).ok_or_else(|| RobotError::UnexpectedReply {
            command: "programState".to_string(),
            reply,
        })
    }
}

impl Drop for DashboardClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn read_line(reader: &mut BufReader<TcpStream>, timeout_ms: u64) -> Result<String, RobotError> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Err(RobotError::Io {
            reason: "connection closed by controller".to_string(),
        }),
        Ok(_) => Ok(line.trim_end().to_string()),
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ) =>
        {
            Err(RobotError::Timeout { timeout_ms })
        }
        Err(e) => Err(io_error(e)),
    }
}

fn io_error(e: std::io::Error) -> RobotError {
    RobotError::Io {
        reason: e.to_string(),
    }
}
