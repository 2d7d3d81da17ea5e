use glaze_core::{HotkeyAction, HotkeyBinding, keybinding};

/// Prints the fixed hotkey table.
pub fn execute() {
    for binding in keybinding::defaults() {
        println!("  {:<12} {}", binding.chord(), describe(&binding));
    }
}

fn describe(binding: &HotkeyBinding) -> String {
    match binding.action {
        HotkeyAction::Opacity(level) if level.alpha() == u8::MAX => "opaque (alpha 255)".into(),
        HotkeyAction::Opacity(level) => {
            format!("opacity level {} (alpha {})", level.get(), level.alpha())
        }
        HotkeyAction::ToggleTopmost => "toggle always-on-top".into(),
        HotkeyAction::Quit => "quit".into(),
    }
}
