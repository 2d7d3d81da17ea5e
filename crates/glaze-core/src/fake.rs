//! In-memory platform used by the unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use crate::event::{HotkeySource, QueueEvent};
use crate::keybinding::HotkeyBinding;
use crate::{WindowHandle, WindowOps, WindowResult, ZBand};

/// A mutating call observed by [`FakeDesktop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddLayered(WindowHandle),
    SetAlpha(WindowHandle, u8),
    SetZBand(WindowHandle, ZBand),
}

#[derive(Default)]
struct DesktopState {
    foreground: VecDeque<Option<WindowHandle>>,
    layered: HashSet<WindowHandle>,
    dead: HashSet<WindowHandle>,
    own: HashSet<WindowHandle>,
    calls: Vec<Call>,
}

/// Records every mutating call and simulates the layered style bit.
#[derive(Default)]
pub struct FakeDesktop {
    state: Mutex<DesktopState>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues foreground observations, returned one per query.
    ///
    /// Once the queue is drained every query returns `None`.
    pub fn with_foreground(self, seq: &[Option<WindowHandle>]) -> Self {
        self.state.lock().unwrap().foreground = seq.iter().copied().collect();
        self
    }

    /// Marks a window as belonging to the daemon itself.
    pub fn with_own_window(self, window: WindowHandle) -> Self {
        self.state.lock().unwrap().own.insert(window);
        self
    }

    /// Marks a window as closed: every call against it fails.
    pub fn close(&self, window: WindowHandle) {
        self.state.lock().unwrap().dead.insert(window);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn check(state: &DesktopState, window: WindowHandle) -> WindowResult<()> {
        if state.dead.contains(&window) {
            return Err(format!("invalid window handle {window} (os error 1400)").into());
        }
        Ok(())
    }
}

impl WindowOps for FakeDesktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.state.lock().unwrap().foreground.pop_front().flatten()
    }

    fn is_own_window(&self, window: WindowHandle) -> bool {
        self.state.lock().unwrap().own.contains(&window)
    }

    fn is_layered(&self, window: WindowHandle) -> WindowResult<bool> {
        let state = self.state.lock().unwrap();
        Self::check(&state, window)?;
        Ok(state.layered.contains(&window))
    }

    fn add_layered_style(&self, window: WindowHandle) -> WindowResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, window)?;
        state.layered.insert(window);
        state.calls.push(Call::AddLayered(window));
        Ok(())
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> WindowResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, window)?;
        state.calls.push(Call::SetAlpha(window, alpha));
        Ok(())
    }

    fn set_z_band(&self, window: WindowHandle, band: ZBand) -> WindowResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, window)?;
        state.calls.push(Call::SetZBand(window, band));
        Ok(())
    }
}

/// A hotkey queue that replays a fixed script of events.
///
/// When the script runs out it reports [`QueueEvent::Closed`]. A hook
/// can run before each event is handed out, to interleave side effects
/// (e.g. a foreground change) with dispatch.
#[derive(Default)]
pub struct ScriptedQueue {
    script: VecDeque<QueueEvent>,
    rejected: HashSet<i32>,
    pub registered: Vec<i32>,
    pub unregistered: Vec<i32>,
    pub delivered: usize,
    before_event: Option<Box<dyn FnMut(usize)>>,
}

impl ScriptedQueue {
    pub fn new(script: impl IntoIterator<Item = QueueEvent>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Makes registration of `id` fail, as if another process owned it.
    pub fn reject(mut self, id: i32) -> Self {
        self.rejected.insert(id);
        self
    }

    /// Runs `hook(n)` before the `n`-th event (0-based) is delivered.
    pub fn before_event(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.before_event = Some(Box::new(hook));
        self
    }
}

impl HotkeySource for ScriptedQueue {
    fn register(&mut self, binding: &HotkeyBinding) -> WindowResult<()> {
        self.registered.push(binding.id);
        if self.rejected.contains(&binding.id) {
            return Err("hot key is already registered (os error 1409)".into());
        }
        Ok(())
    }

    fn unregister(&mut self, id: i32) -> WindowResult<()> {
        self.unregistered.push(id);
        if self.rejected.contains(&id) {
            return Err("hot key is not registered (os error 1419)".into());
        }
        Ok(())
    }

    fn next_event(&mut self) -> QueueEvent {
        if let Some(hook) = self.before_event.as_mut() {
            hook(self.delivered);
        }
        self.delivered += 1;
        self.script.pop_front().unwrap_or(QueueEvent::Closed)
    }
}
