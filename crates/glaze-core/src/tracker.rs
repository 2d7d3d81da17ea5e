use std::time::Duration;

use crate::active::ActiveWindow;
use crate::shutdown::Shutdown;
use crate::{WindowHandle, WindowOps};

/// Delay between foreground queries. Bounds how stale the active
/// window can be when a hotkey is dispatched.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Publishes the foreground window into an [`ActiveWindow`] slot.
pub struct ForegroundTracker<'a> {
    active: &'a ActiveWindow,
}

impl<'a> ForegroundTracker<'a> {
    pub fn new(active: &'a ActiveWindow) -> Self {
        Self { active }
    }

    /// Records one foreground observation.
    ///
    /// Returns the new window when the observation is a transition: a
    /// non-empty handle different from the stored one. Empty readings
    /// (e.g. while the desktop switches) never clear the slot.
    pub fn observe(&self, foreground: Option<WindowHandle>) -> Option<WindowHandle> {
        let window = foreground?;
        if self.active.get() == Some(window) {
            return None;
        }
        self.active.set(window);
        Some(window)
    }

    /// Queries `ops` once and records the result.
    ///
    /// Windows owned by this process are never targets, so they read as
    /// empty and leave the previous window in place.
    pub fn poll(&self, ops: &dyn WindowOps) -> Option<WindowHandle> {
        let foreground = ops.foreground_window().filter(|w| !ops.is_own_window(*w));
        self.observe(foreground)
    }

    /// Polls `ops` every `interval` until `shutdown` fires.
    pub fn run(&self, ops: &dyn WindowOps, shutdown: &Shutdown, interval: Duration) {
        crate::log_debug!("Foreground tracker started ({}ms)", interval.as_millis());

        while !shutdown.is_triggered() {
            if let Some(window) = self.poll(ops) {
                crate::log_info!("New active window {window}");
            }
            if shutdown.wait_timeout(interval) {
                break;
            }
        }

        crate::log_debug!("Foreground tracker stopped");
    }
}
