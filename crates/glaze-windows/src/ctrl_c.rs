//! Ctrl+C handling using `SetConsoleCtrlHandler`.
//!
//! Lets a console-launched daemon stop the same way as the tray "Exit"
//! item: through the shared shutdown signal.

use std::sync::OnceLock;

use glaze_core::{Shutdown, WindowResult};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

/// Shutdown handle reached by the handler. Written once by `set_handler`.
static SHUTDOWN: OnceLock<Shutdown> = OnceLock::new();

/// Routes Ctrl+C and Ctrl+Break to `shutdown`.
pub fn set_handler(shutdown: Shutdown) -> WindowResult<()> {
    SHUTDOWN
        .set(shutdown)
        .map_err(|_| "Ctrl+C handler already registered")?;
    unsafe { SetConsoleCtrlHandler(Some(handler), true)? };
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(shutdown) = SHUTDOWN.get()
    {
        glaze_core::log_info!("Console interrupt received");
        shutdown.trigger();
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
