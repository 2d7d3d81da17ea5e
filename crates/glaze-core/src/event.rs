use crate::WindowResult;
use crate::keybinding::HotkeyBinding;

/// One message retrieved from the process's hotkey queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    /// A registered hotkey fired; carries the registration id.
    Hotkey(i32),
    /// Any other message. It has already been translated and dispatched.
    Other,
    /// The queue was asked to quit.
    Closed,
    /// Retrieval failed.
    Failed(String),
}

/// Global hotkey registration plus the blocking queue that delivers them.
///
/// Implementations are bound to the thread that created them: hotkeys
/// registered without a window are delivered to that thread's queue.
pub trait HotkeySource {
    /// Registers `binding` as a process-wide hotkey.
    fn register(&mut self, binding: &HotkeyBinding) -> WindowResult<()>;

    /// Releases the registration for `id`.
    fn unregister(&mut self, id: i32) -> WindowResult<()>;

    /// Blocks until the next message arrives.
    fn next_event(&mut self) -> QueueEvent;
}
