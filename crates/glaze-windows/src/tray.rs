//! Notification-area icon with a single "Exit" item.
//!
//! Runs on the main thread and blocks until the icon's window is closed.
//! Choosing "Exit" triggers the shared shutdown; a shutdown triggered
//! anywhere else posts `WM_CLOSE` to the icon's window, so the tray loop
//! ends together with the other workers.

use std::cell::{Cell, RefCell};

use glaze_core::{Shutdown, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu, DestroyWindow,
    DispatchMessageW, GetCursorPos, GetMessageW, IDI_APPLICATION, LoadIconW, MF_STRING, MSG,
    PostMessageW, PostQuitMessage, RegisterClassW, RegisterWindowMessageW, SetForegroundWindow,
    TPM_BOTTOMALIGN, TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenuEx, TranslateMessage, WM_APP,
    WM_CLOSE, WM_DESTROY, WM_LBUTTONUP, WM_RBUTTONUP, WNDCLASSW, WS_EX_TOOLWINDOW,
};
use windows::core::w;

const TRAY_ID: u32 = 1;
const WM_TRAYICON: u32 = WM_APP + 1;
const IDM_EXIT: usize = 1;
const TOOLTIP: &str = "Glaze – Ctrl+Alt+0~9";

thread_local! {
    static TRAY_SHUTDOWN: RefCell<Option<Shutdown>> = const { RefCell::new(None) };
    static TASKBAR_CREATED: Cell<u32> = const { Cell::new(0) };
}

/// Shows the tray icon and blocks until shutdown.
pub fn run(shutdown: &Shutdown) -> WindowResult<()> {
    TRAY_SHUTDOWN.with(|cell| *cell.borrow_mut() = Some(shutdown.clone()));

    let hwnd = create_tray_window()?;
    add_icon(hwnd);

    let raw = hwnd.0 as usize;
    shutdown.on_trigger(move || post_close(raw));

    let mut msg = MSG::default();
    // SAFETY: standard message pump for the window created above. The
    // loop ends on WM_QUIT (0) or error (-1).
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    TRAY_SHUTDOWN.with(|cell| cell.borrow_mut().take());
    glaze_core::log_debug!("Tray loop stopped");
    Ok(())
}

/// Creates the hidden window that owns the icon and receives its clicks.
///
/// A regular hidden window rather than a message-only one: popup menus
/// need a window that can be brought to the foreground, and only
/// top-level windows receive the `TaskbarCreated` broadcast.
fn create_tray_window() -> WindowResult<HWND> {
    unsafe {
        let class_name = w!("GlazeTray");
        let wc = WNDCLASSW {
            lpfnWndProc: Some(tray_proc),
            lpszClassName: class_name,
            ..Default::default()
        };

        if RegisterClassW(&wc) == 0 {
            return Err("failed to register GlazeTray class".into());
        }

        TASKBAR_CREATED.with(|c| c.set(RegisterWindowMessageW(w!("TaskbarCreated"))));

        // WS_EX_TOOLWINDOW: no taskbar entry. No WS_VISIBLE: stays hidden.
        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("Glaze"),
            Default::default(),
            0,
            0,
            0,
            0,
            None,
            None,
            None,
            None,
        )?;
        Ok(hwnd)
    }
}

fn icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ID,
        ..Default::default()
    }
}

fn add_icon(hwnd: HWND) {
    let mut nid = icon_data(hwnd);
    nid.uFlags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
    nid.uCallbackMessage = WM_TRAYICON;
    // SAFETY: loads a stock system icon; no module handle needed.
    nid.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default();

    let tip: Vec<u16> = TOOLTIP.encode_utf16().collect();
    let len = tip.len().min(nid.szTip.len() - 1);
    nid.szTip[..len].copy_from_slice(&tip[..len]);

    // SAFETY: Shell_NotifyIconW copies the struct; it does not keep it.
    if unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
        glaze_core::log_info!("Tray icon added");
    } else {
        glaze_core::log_warn!("Failed to add tray icon; use Ctrl+Alt+Q to quit");
    }
}

fn remove_icon(hwnd: HWND) {
    let nid = icon_data(hwnd);
    // SAFETY: removing an icon that was never added just fails.
    unsafe {
        let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
    }
}

/// Shows the popup menu at the cursor and returns the chosen item id.
fn show_menu(hwnd: HWND) -> Option<usize> {
    unsafe {
        let menu = CreatePopupMenu().ok()?;
        let _ = AppendMenuW(menu, MF_STRING, IDM_EXIT, w!("Exit"));

        // The menu only dismisses on outside clicks if our window is
        // in the foreground while it is open. The tracker skips windows
        // of this process, so the hotkey target stays put.
        let _ = SetForegroundWindow(hwnd);
        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);
        let flags = TPM_RETURNCMD | TPM_RIGHTBUTTON | TPM_BOTTOMALIGN;
        let cmd = TrackPopupMenuEx(menu, flags.0, pt.x, pt.y, hwnd, None);
        let _ = DestroyMenu(menu);

        usize::try_from(cmd.0).ok().filter(|id| *id != 0)
    }
}

fn post_close(raw: usize) {
    // SAFETY: PostMessageW only enqueues; a destroyed window makes it fail.
    unsafe {
        let _ = PostMessageW(Some(HWND(raw as *mut _)), WM_CLOSE, WPARAM(0), LPARAM(0));
    }
}

fn request_shutdown() {
    let shutdown = TRAY_SHUTDOWN.with(|cell| cell.borrow().clone());
    if let Some(shutdown) = shutdown {
        shutdown.trigger();
    }
}

/// WNDPROC for the tray window.
unsafe extern "system" fn tray_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TRAYICON => {
            let mouse = lparam.0 as u32;
            if (mouse == WM_RBUTTONUP || mouse == WM_LBUTTONUP)
                && show_menu(hwnd) == Some(IDM_EXIT)
            {
                glaze_core::log_info!("Exit selected from tray");
                request_shutdown();
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            remove_icon(hwnd);
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ if msg != 0 && msg == TASKBAR_CREATED.with(Cell::get) => {
            // Explorer restarted and dropped every icon.
            add_icon(hwnd);
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
