use std::sync::atomic::{AtomicUsize, Ordering};

use crate::WindowHandle;

/// Single-slot cell holding the most recently observed foreground window.
///
/// Written only by the foreground tracker, read by the hotkey listener
/// at dispatch time. Zero encodes "nothing observed yet".
#[derive(Debug, Default)]
pub struct ActiveWindow {
    slot: AtomicUsize,
}

impl ActiveWindow {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last stored window, if any.
    pub fn get(&self) -> Option<WindowHandle> {
        WindowHandle::new(self.slot.load(Ordering::Acquire))
    }

    /// Overwrites the slot.
    pub fn set(&self, window: WindowHandle) {
        self.slot.store(window.raw(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        // Assert
        assert_eq!(ActiveWindow::new().get(), None);
    }

    #[test]
    fn keeps_last_written_handle() {
        // Arrange
        let active = ActiveWindow::new();

        // Act
        active.set(WindowHandle::new(0x10).unwrap());
        active.set(WindowHandle::new(0x20).unwrap());

        // Assert
        assert_eq!(active.get(), WindowHandle::new(0x20));
    }
}
