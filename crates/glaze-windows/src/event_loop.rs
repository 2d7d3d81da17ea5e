use std::sync::Arc;
use std::thread;

use glaze_core::{
    ActiveWindow, HotkeyBinding, HotkeyListener, Shutdown, WindowController, WindowResult,
};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_QUIT};

use crate::hotkey::ThreadQueue;
use crate::window::Win32Desktop;

/// Starts the hotkey listener on a new thread.
///
/// The thread owns the hotkey registrations and the window controller.
/// Shutdown posts `WM_QUIT` to its queue so the blocking `GetMessageW`
/// returns and the listener drains its registrations.
pub fn start(
    bindings: Vec<HotkeyBinding>,
    active: Arc<ActiveWindow>,
    shutdown: Shutdown,
) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<u32>();

    let handle = thread::Builder::new()
        .name("glaze-hotkeys".into())
        .spawn(move || {
            let desktop = Win32Desktop;
            let mut queue = ThreadQueue::new();
            let controller = WindowController::new(&desktop);
            let mut listener = HotkeyListener::new(bindings, controller, &active, shutdown.clone());

            // SAFETY: GetCurrentThreadId has no preconditions.
            let thread_id = unsafe { GetCurrentThreadId() };
            shutdown.on_trigger(move || post_quit(thread_id));
            let _ = ready_tx.send(thread_id);

            listener.run(&mut queue);
        })?;

    let thread_id = ready_rx
        .recv()
        .map_err(|_| "hotkey thread exited unexpectedly")?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for the hotkey thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Waits for the listener to release its hotkeys and exit.
    ///
    /// Call after the shared [`Shutdown`] has been triggered.
    pub fn join(self) {
        if self.handle.join().is_err() {
            glaze_core::log_error!("Hotkey thread {} panicked", self.thread_id);
        }
    }
}

/// Posts `WM_QUIT` to the hotkey thread's queue.
fn post_quit(thread_id: u32) {
    // SAFETY: PostThreadMessageW only enqueues a message; it fails
    // harmlessly if the thread has already exited.
    if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
        glaze_core::log_debug!("Could not wake hotkey thread: {e}");
    }
}
