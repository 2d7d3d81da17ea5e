pub mod active;
pub mod alpha;
pub mod config;
pub mod controller;
pub mod event;
pub mod keybinding;
pub mod listener;
pub mod log;
pub mod shutdown;
pub mod tracker;
pub mod window;

#[cfg(test)]
mod fake;

pub use active::ActiveWindow;
pub use alpha::{ALPHA_MAP, AlphaLevel};
pub use controller::WindowController;
pub use event::{HotkeySource, QueueEvent};
pub use keybinding::{HotkeyAction, HotkeyBinding, Modifier};
pub use listener::{HotkeyListener, ListenerState};
pub use shutdown::Shutdown;
pub use tracker::ForegroundTracker;
pub use window::{WindowHandle, WindowOps, WindowResult, ZBand};
