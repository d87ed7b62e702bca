//! Periodic risk monitor.

use alloc::sync::Arc;
use core::time::Duration;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};

use crate::advisor::Advisor;

/// Interval used by [`RiskMonitor::start_default`].
pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// Background thread that runs [`Advisor::auto_risk_control`] on a fixed
/// interval until stopped or dropped.
#[derive(Debug)]
pub struct RiskMonitor {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RiskMonitor {
    /// Starts monitoring the advisor.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn start(advisor: Arc<Advisor>, interval: Duration) -> io::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("bacrs-risk-monitor".into())
            .spawn(move || {
                tracing::debug!(interval_ms = interval.as_millis(), "risk monitor started");
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            advisor.auto_risk_control();
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!("risk monitor stopped");
            })?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Starts monitoring with [`DEFAULT_MONITOR_INTERVAL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn start_default(advisor: Arc<Advisor>) -> io::Result<Self> {
        Self::start(advisor, DEFAULT_MONITOR_INTERVAL)
    }

    /// Returns whether the monitor thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the monitor and waits for its thread to exit.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            if stop.send(()).is_err() {
                tracing::debug!("risk monitor thread already exited");
            }
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("risk monitor thread panicked");
            }
        }
    }
}

impl Drop for RiskMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
