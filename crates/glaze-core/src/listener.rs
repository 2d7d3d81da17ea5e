//! Hotkey listener state machine.
//!
//! `Registering -> Listening -> Draining -> Stopped`. Draining is entered
//! exactly once on every exit path (quit hotkey, queue closed or failed,
//! shutdown requested elsewhere) and unregisters every binding we
//! attempted, so each id is released exactly once.

use crate::active::ActiveWindow;
use crate::controller::WindowController;
use crate::event::{HotkeySource, QueueEvent};
use crate::keybinding::{self, HotkeyAction, HotkeyBinding};
use crate::shutdown::Shutdown;

/// Lifecycle phase of a [`HotkeyListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Registering,
    Listening,
    Draining,
    Stopped,
}

/// Outcome of dispatching one hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The action was applied to the active window.
    Applied,
    /// No foreground window has been observed yet.
    NoActiveWindow,
    /// The OS rejected the change; already logged.
    Failed,
    /// The id is not ours.
    Ignored,
    /// The quit hotkey fired.
    Quit,
}

/// Owns the hotkey table and drives a [`HotkeySource`] until shutdown.
pub struct HotkeyListener<'a> {
    state: ListenerState,
    bindings: Vec<HotkeyBinding>,
    controller: WindowController<'a>,
    active: &'a ActiveWindow,
    shutdown: Shutdown,
}

impl<'a> HotkeyListener<'a> {
    pub fn new(
        bindings: Vec<HotkeyBinding>,
        controller: WindowController<'a>,
        active: &'a ActiveWindow,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            state: ListenerState::Registering,
            bindings,
            controller,
            active,
            shutdown,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn controller(&self) -> &WindowController<'a> {
        &self.controller
    }

    /// Runs the state machine to completion on the calling thread.
    pub fn run(&mut self, source: &mut dyn HotkeySource) {
        while self.state != ListenerState::Stopped {
            self.step(source);
        }
    }

    /// Advances the state machine by one transition.
    pub fn step(&mut self, source: &mut dyn HotkeySource) {
        let next = match self.state {
            ListenerState::Registering => {
                self.register_all(source);
                ListenerState::Listening
            }
            ListenerState::Listening => self.listen(source),
            ListenerState::Draining => {
                self.unregister_all(source);
                ListenerState::Stopped
            }
            ListenerState::Stopped => ListenerState::Stopped,
        };

        if next != self.state {
            crate::log_debug!("Hotkey listener: {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }

    /// Applies the action bound to hotkey `id` to the active window.
    ///
    /// The active window is read here, at dispatch time, so it may trail
    /// the real foreground window by up to one tracker interval.
    pub fn dispatch(&mut self, id: i32) -> Dispatch {
        let Some(binding) = keybinding::find(&self.bindings, id) else {
            crate::log_debug!("Ignoring unknown hotkey id {id}");
            return Dispatch::Ignored;
        };

        let action = binding.action;
        if action == HotkeyAction::Quit {
            return Dispatch::Quit;
        }

        let Some(window) = self.active.get() else {
            crate::log_info!("Hotkey {id}: no active window");
            return Dispatch::NoActiveWindow;
        };

        let result = match action {
            HotkeyAction::Opacity(level) => self.controller.set_opacity(window, level),
            HotkeyAction::ToggleTopmost => self.controller.toggle_topmost(window).map(|_| ()),
            HotkeyAction::Quit => Ok(()),
        };

        match result {
            Ok(()) => Dispatch::Applied,
            Err(e) => {
                crate::log_error!("Hotkey {id} on {window} failed: {e}");
                Dispatch::Failed
            }
        }
    }

    fn register_all(&self, source: &mut dyn HotkeySource) {
        for binding in &self.bindings {
            match source.register(binding) {
                Ok(()) => crate::log_info!("Registered {} (id {})", binding.chord(), binding.id),
                Err(e) => crate::log_warn!(
                    "Failed to register {} (id {}): {e}",
                    binding.chord(),
                    binding.id
                ),
            }
        }
    }

    fn listen(&mut self, source: &mut dyn HotkeySource) -> ListenerState {
        if self.shutdown.is_triggered() {
            return ListenerState::Draining;
        }

        match source.next_event() {
            QueueEvent::Hotkey(id) => {
                if self.dispatch(id) == Dispatch::Quit {
                    crate::log_info!("Quit hotkey pressed");
                    self.shutdown.trigger();
                    return ListenerState::Draining;
                }
                ListenerState::Listening
            }
            QueueEvent::Other => ListenerState::Listening,
            QueueEvent::Closed => {
                crate::log_debug!("Hotkey queue closed");
                ListenerState::Draining
            }
            QueueEvent::Failed(e) => {
                crate::log_error!("Hotkey queue failed: {e}");
                ListenerState::Draining
            }
        }
    }

    fn unregister_all(&self, source: &mut dyn HotkeySource) {
        for binding in &self.bindings {
            if let Err(e) = source.unregister(binding.id) {
                crate::log_warn!("Failed to unregister id {}: {e}", binding.id);
            }
        }
        crate::log_info!("Hotkeys released");
    }
}
