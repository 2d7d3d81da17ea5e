use std::sync::Arc;
use std::thread;

use glaze_core::tracker::{ForegroundTracker, POLL_INTERVAL};
use glaze_core::{ActiveWindow, Shutdown, WindowResult, config, keybinding};

use crate::window::Win32Desktop;
use crate::{ctrl_c, event_loop, tray};

/// Runs the Glaze daemon until the user exits.
///
/// Starts the foreground tracker and the hotkey listener on background
/// threads and hosts the tray icon on the calling thread. Every exit
/// path (tray "Exit", Ctrl+Alt+Q, Ctrl+C) triggers the same shutdown,
/// and both workers are joined before this returns, so all hotkeys are
/// released by then.
pub fn run() -> WindowResult<()> {
    let config = config::load();
    glaze_core::log::init(&config.logging);
    glaze_core::log_info!("Glaze started (PID: {})", std::process::id());

    let shutdown = Shutdown::new();
    let active = Arc::new(ActiveWindow::new());

    if let Err(e) = ctrl_c::set_handler(shutdown.clone()) {
        glaze_core::log_warn!("Ctrl+C handler unavailable: {e}");
    }

    let tracker = spawn_tracker(active.clone(), shutdown.clone())?;
    let hotkeys = match event_loop::start(keybinding::defaults(), active, shutdown.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            shutdown.trigger();
            join_worker("Foreground tracker", tracker);
            return Err(e);
        }
    };

    let result = tray::run(&shutdown);

    // The tray may have failed before any exit action fired.
    shutdown.trigger();
    hotkeys.join();
    join_worker("Foreground tracker", tracker);

    glaze_core::log_info!("Glaze stopped");
    result
}

/// Spawns the foreground polling thread.
fn spawn_tracker(
    active: Arc<ActiveWindow>,
    shutdown: Shutdown,
) -> WindowResult<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("glaze-tracker".into())
        .spawn(move || {
            ForegroundTracker::new(&active).run(&Win32Desktop, &shutdown, POLL_INTERVAL);
        })?;
    Ok(handle)
}

/// Joins a worker thread, logging a panic instead of propagating it.
///
/// Returns whether the worker exited cleanly.
fn join_worker(name: &str, handle: thread::JoinHandle<()>) -> bool {
    let clean = handle.join().is_ok();
    if !clean {
        glaze_core::log_error!("{name} panicked");
    }
    clean
}
