use glaze_core::event::{HotkeySource, QueueEvent};
use glaze_core::{HotkeyBinding, Modifier, WindowResult};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, TranslateMessage, WM_HOTKEY,
    WM_USER,
};

use crate::keys;

/// The current thread's message queue, used as a [`HotkeySource`].
///
/// Hotkeys are registered without a window, so `WM_HOTKEY` messages are
/// posted to the queue of the thread that registered them. The value
/// must therefore stay on the thread that created it.
pub struct ThreadQueue {
    msg: MSG,
}

impl ThreadQueue {
    /// Creates the calling thread's message queue.
    ///
    /// Windows only allocates a queue on the first user32 call, and
    /// `PostThreadMessageW` to a thread without one is lost. Peeking once
    /// makes the queue exist before anyone can post to it.
    pub fn new() -> Self {
        let mut msg = MSG::default();
        // SAFETY: PeekMessageW with PM_NOREMOVE leaves the queue untouched.
        unsafe {
            let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
        }
        Self { msg }
    }
}

impl Default for ThreadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeySource for ThreadQueue {
    fn register(&mut self, binding: &HotkeyBinding) -> WindowResult<()> {
        let vk = keys::vk_from_char(binding.key)
            .ok_or_else(|| format!("unknown key {:?}", binding.key))?;

        let mut modifiers = MOD_NOREPEAT;
        for m in binding.modifiers {
            modifiers |= modifier_to_flag(*m);
        }

        // SAFETY: RegisterHotKey registers a system-wide hotkey on the
        // current thread's message queue. Ids are unique per binding.
        unsafe { RegisterHotKey(None, binding.id, modifiers, vk)? };
        Ok(())
    }

    fn unregister(&mut self, id: i32) -> WindowResult<()> {
        // SAFETY: UnregisterHotKey removes a registration made by this
        // thread; an id we never obtained just fails.
        unsafe { UnregisterHotKey(None, id)? };
        Ok(())
    }

    fn next_event(&mut self) -> QueueEvent {
        // SAFETY: GetMessageW blocks until a message for this thread
        // arrives. It returns 0 for WM_QUIT and -1 on error.
        let ret = unsafe { GetMessageW(&mut self.msg, None, 0, 0) };
        match ret.0 {
            0 => return QueueEvent::Closed,
            -1 => return QueueEvent::Failed(windows::core::Error::from_win32().to_string()),
            _ => {}
        }

        if self.msg.message == WM_HOTKEY {
            return QueueEvent::Hotkey(self.msg.wParam.0 as i32);
        }

        // SAFETY: standard pass-through for anything that is not ours.
        unsafe {
            let _ = TranslateMessage(&self.msg);
            DispatchMessageW(&self.msg);
        }
        QueueEvent::Other
    }
}

/// Converts a platform-agnostic modifier to a Win32 hotkey flag.
fn modifier_to_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Ctrl => MOD_CONTROL,
    }
}
