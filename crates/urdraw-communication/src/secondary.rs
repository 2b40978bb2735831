//! Secondary interface client
//!
//! The secondary interface (port 30002 by default) runs any URScript program
//! it receives. It sends no per-command acknowledgement, so completion has to
//! be observed elsewhere (see [`crate::dashboard`]).

use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use urdraw_core::RobotError;

/// Default secondary interface port
pub const DEFAULT_SECONDARY_PORT: u16 = 30002;

/// Default connect, read and write timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to open a TCP session with the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ConnectionParams {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve and connect, applying the timeout to reads and writes as well
    pub(crate) fn open(&self) -> Result<TcpStream, RobotError> {
        let failed = |reason: String| RobotError::ConnectionFailed {
            host: self.host.clone(),
            port: self.port,
            reason,
        };

        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| failed(e.to_string()))?
            .next()
            .ok_or_else(|| failed("address did not resolve".to_string()))?;

        let stream = TcpStream::connect_timeout(&addr, self.timeout).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                RobotError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                failed(e.to_string())
            }
        })?;
        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
            .map_err(|e| failed(e.to_string()))?;
        Ok(stream)
    }
}

/// URScript sender over the secondary interface
#[derive(Debug)]
pub struct SecondaryClient {
    params: ConnectionParams,
    stream: Option<TcpStream>,
}

impl SecondaryClient {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            stream: None,
        }
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub fn connect(&mut self) -> Result<(), RobotError> {
        let stream = self.params.open()?;
        tracing::info!(
            "Connected to secondary interface at {}:{}",
            self.params.host,
            self.params.port
        );
        self.stream = Some(stream);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            tracing::info!("Secondary interface connection closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Send one URScript program. A trailing newline is added when missing.
    pub fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        let stream = self.stream.as_mut().ok_or(RobotError::NotConnected)?;

        let mut payload = script.to_string();
        if !payload.ends_with('\n') {
            payload.push('\n');
        }
        tracing::debug!("Sending script: {}", payload.trim_end());

        stream
            .write_all(payload.as_bytes())
            .and_then(|_| stream.flush())
            .map_err(|e| {
                tracing::error!("Failed to send script: {}", e);
                RobotError::Io {
                    reason: e.to_string(),
                }
            })
    }
}

impl Drop for SecondaryClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}
