//! Robot sessions
//!
//! A [`RobotSession`] accepts one URScript program at a time and reports
//! when the motion it started has finished. The executor only ever talks to
//! this trait, so a dry run or a test double can stand in for the robot.

use std::time::{Duration, Instant};
use urdraw_core::RobotError;

use crate::dashboard::DashboardClient;
use crate::secondary::{ConnectionParams, SecondaryClient};

/// One in-flight motion at a time
pub trait RobotSession {
    /// Start a URScript program
    fn send_script(&mut self, script: &str) -> Result<(), RobotError>;

    /// Block until the last started motion has finished
    fn wait_for_motion(&mut self) -> Result<(), RobotError>;
}

impl<S: RobotSession + ?Sized> RobotSession for &mut S {
    fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        (**self).send_script(script)
    }

    fn wait_for_motion(&mut self) -> Result<(), RobotError> {
        (**self).wait_for_motion()
    }
}

impl<S: RobotSession + ?Sized> RobotSession for Box<S> {
    fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        (**self).send_script(script)
    }

    fn wait_for_motion(&mut self) -> Result<(), RobotError> {
        (**self).wait_for_motion()
    }
}

/// Completion polling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionWait {
    /// Delay between `running` queries
    pub poll_interval: Duration,
    /// A program never seen running is treated as finished after this long
    pub start_grace: Duration,
    /// Upper bound for a single motion
    pub motion_timeout: Duration,
}

impl Default for MotionWait {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
            start_grace: Duration::from_millis(500),
            motion_timeout: Duration::from_secs(60),
        }
    }
}

/// Live robot: scripts go to the secondary interface, completion is read
/// from the dashboard server.
#[derive(Debug)]
pub struct UrSession {
    secondary: SecondaryClient,
    dashboard: DashboardClient,
    wait: MotionWait,
}

impl UrSession {
    /// Open both connections
    pub fn connect(
        secondary: ConnectionParams,
        dashboard: ConnectionParams,
        wait: MotionWait,
    ) -> Result<Self, RobotError> {
        let mut dashboard = DashboardClient::new(dashboard);
        dashboard.connect()?;
        let mut secondary = SecondaryClient::new(secondary);
        secondary.connect()?;
        Ok(Self {
            secondary,
            dashboard,
            wait,
        })
    }

    pub fn dashboard(&mut self) -> &mut DashboardClient {
        &mut self.dashboard
    }

    pub fn disconnect(&mut self) {
        self.secondary.disconnect();
        self.dashboard.disconnect();
    }
}

impl RobotSession for UrSession {
    fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        self.secondary.send_script(script)
    }

    fn wait_for_motion(&mut self) -> Result<(), RobotError> {
        let started = Instant::now();
        let mut seen_running = false;

        loop {
            if self.dashboard.is_running()? {
                seen_running = true;
            } else if seen_running || started.elapsed() >= self.wait.start_grace {
                return Ok(());
            }

            if started.elapsed() >= self.wait.motion_timeout {
                return Err(RobotError::Timeout {
                    timeout_ms: self.wait.motion_timeout.as_millis() as u64,
                });
            }
            std::thread::sleep(self.wait.poll_interval);
        }
    }
}

/// Logs every script instead of sending it
#[derive(Debug, Default)]
pub struct DryRunSession {
    scripts: Vec<String>,
}

impl DryRunSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts "sent" so far, in order
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}

impl RobotSession for DryRunSession {
    fn send_script(&mut self, script: &str) -> Result<(), RobotError> {
        tracing::info!("[dry run] {}", script);
        self.scripts.push(script.to_string());
        Ok(())
    }

    fn wait_for_motion(&mut self) -> Result<(), RobotError> {
        Ok(())
    }
}
