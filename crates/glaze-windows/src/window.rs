use glaze_core::{WindowHandle, WindowOps, WindowResult, ZBand};

use windows::Win32::Foundation::{COLORREF, HWND, SetLastError, WIN32_ERROR};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetForegroundWindow, GetWindowLongPtrW, GetWindowThreadProcessId, HWND_NOTOPMOST,
    HWND_TOPMOST, LWA_ALPHA, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SetLayeredWindowAttributes,
    SetWindowLongPtrW, SetWindowPos, WS_EX_LAYERED,
};

/// The Win32 desktop, seen through the [`WindowOps`] capability.
///
/// Stateless: every call goes straight to `user32`, so one instance can
/// be shared by the tracker and the hotkey thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Desktop;

/// Converts a core handle back into an `HWND`.
pub fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut _)
}

impl Win32Desktop {
    /// Reads the extended style bits.
    ///
    /// `GetWindowLongPtrW` returns 0 both for "no bits set" and for
    /// failure, so the thread's last error is cleared first and checked
    /// afterwards.
    fn ex_style(&self, window: WindowHandle) -> WindowResult<isize> {
        // SAFETY: GetWindowLongPtrW only reads window data; a stale HWND
        // makes it fail with ERROR_INVALID_WINDOW_HANDLE.
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let style = GetWindowLongPtrW(hwnd(window), GWL_EXSTYLE);
            if style == 0 {
                let err = windows::core::Error::from_win32();
                if err.code().is_err() {
                    return Err(err.into());
                }
            }
            Ok(style)
        }
    }
}

impl WindowOps for Win32Desktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        // SAFETY: GetForegroundWindow is a simple query with no arguments.
        let hwnd = unsafe { GetForegroundWindow() };
        WindowHandle::new(hwnd.0 as usize)
    }

    fn is_own_window(&self, window: WindowHandle) -> bool {
        let mut pid = 0u32;
        // SAFETY: GetWindowThreadProcessId only reads; a stale HWND
        // returns 0 and leaves `pid` untouched.
        unsafe {
            GetWindowThreadProcessId(hwnd(window), Some(&mut pid));
            pid != 0 && pid == GetCurrentProcessId()
        }
    }

    fn is_layered(&self, window: WindowHandle) -> WindowResult<bool> {
        let style = self.ex_style(window)? as u32;
        Ok(style & WS_EX_LAYERED.0 == WS_EX_LAYERED.0)
    }

    fn add_layered_style(&self, window: WindowHandle) -> WindowResult<()> {
        let style = self.ex_style(window)?;

        // SAFETY: SetWindowLongPtrW writes the extended style of a window
        // we do not own. Only the layered bit is added; every other bit is
        // written back unchanged. It returns the previous value, which is
        // non-zero here unless the call failed.
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let previous =
                SetWindowLongPtrW(hwnd(window), GWL_EXSTYLE, style | WS_EX_LAYERED.0 as isize);
            if previous == 0 {
                let err = windows::core::Error::from_win32();
                if err.code().is_err() {
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> WindowResult<()> {
        // SAFETY: SetLayeredWindowAttributes on a layered window. The color
        // key is ignored because only LWA_ALPHA is passed.
        unsafe { SetLayeredWindowAttributes(hwnd(window), COLORREF(0), alpha, LWA_ALPHA)? };
        Ok(())
    }

    fn set_z_band(&self, window: WindowHandle, band: ZBand) -> WindowResult<()> {
        let after = match band {
            ZBand::Topmost => HWND_TOPMOST,
            ZBand::NotTopmost => HWND_NOTOPMOST,
        };

        // SAFETY: SetWindowPos with SWP_NOMOVE | SWP_NOSIZE only changes the
        // z-order; SWP_NOACTIVATE keeps focus where the user left it.
        unsafe {
            SetWindowPos(
                hwnd(window),
                Some(after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?
        };
        Ok(())
    }
}
