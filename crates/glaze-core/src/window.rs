use std::fmt;

/// A boxed error type for window operations.
///
/// Platform errors (which carry the OS error code in their message)
/// are boxed at the trait boundary so the core never depends on a
/// platform crate.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// An opaque identifier for a top-level window.
///
/// The handle is borrowed from the OS: it stays valid only while the
/// window exists and may go stale at any time without notification.
/// Zero is never a valid handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// Wraps a raw handle value, rejecting the null handle.
    pub fn new(raw: usize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Returns the raw pointer-sized handle value.
    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// The z-order band a window is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZBand {
    /// Above every non-topmost window, regardless of activation.
    Topmost,
    /// The normal band.
    NotTopmost,
}

impl ZBand {
    /// Returns the band for a "pinned" flag.
    pub fn pinned(pinned: bool) -> Self {
        if pinned { Self::Topmost } else { Self::NotTopmost }
    }
}

/// Window-manager capabilities consumed by the tracker and the controller.
///
/// Each platform crate (e.g. `glaze-windows`) provides its own
/// implementation. Calls may be made from several threads.
pub trait WindowOps: Send + Sync {
    /// Returns the current foreground window, if any.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Returns whether the window belongs to this process, e.g. the
    /// tray icon's window while its menu is open.
    fn is_own_window(&self, window: WindowHandle) -> bool;

    /// Returns whether the window already has the layered style bit.
    fn is_layered(&self, window: WindowHandle) -> WindowResult<bool>;

    /// Adds the layered style bit, preserving every other extended style.
    fn add_layered_style(&self, window: WindowHandle) -> WindowResult<()>;

    /// Programs the window's alpha byte (no color key).
    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> WindowResult<()>;

    /// Moves the window into `band` without moving, resizing or
    /// activating it.
    fn set_z_band(&self, window: WindowHandle, band: ZBand) -> WindowResult<()>;
}
