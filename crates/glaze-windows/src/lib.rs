//! Windows platform implementation for Glaze.
//!
//! Empty on other targets so the workspace still builds and the core
//! tests run everywhere.
#![cfg(windows)]

/// Ctrl+C / Ctrl+Break routing into the shutdown signal.
pub mod ctrl_c;

/// Daemon wiring: starts and joins every worker.
pub mod daemon;

/// Hotkey listener thread.
pub mod event_loop;

/// `RegisterHotKey` and the thread message queue.
pub mod hotkey;

/// Key character to virtual key code mapping.
pub mod keys;

/// Notification-area icon (the exit affordance).
pub mod tray;

/// Win32 implementation of the window capabilities.
pub mod window;

pub use window::Win32Desktop;
