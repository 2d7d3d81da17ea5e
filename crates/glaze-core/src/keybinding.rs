use std::fmt;

use crate::alpha::AlphaLevel;

/// Hotkey id reserved for the quit chord.
pub const QUIT_ID: i32 = 99;

/// Digit that toggles always-on-top instead of setting an opacity level.
///
/// `ALPHA_MAP[1]` is therefore unreachable from the keyboard.
pub const TOPMOST_DIGIT: u8 = 1;

/// Modifier chord shared by every binding.
pub const CHORD: &[Modifier] = &[Modifier::Ctrl, Modifier::Alt];

/// Keyboard modifier keys used by [`CHORD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Alt,
    Ctrl,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alt => "Alt",
            Self::Ctrl => "Ctrl",
        })
    }
}

/// What a hotkey does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Program the active window's alpha to this level.
    Opacity(AlphaLevel),
    /// Flip the active window between the topmost and normal bands.
    ToggleTopmost,
    /// Stop the daemon.
    Quit,
}

/// A global hotkey: id, modifier chord, key and the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    /// Registration id, delivered back with every hotkey event.
    pub id: i32,
    /// Modifier keys that must be held.
    pub modifiers: &'static [Modifier],
    /// Key character ('0'..'9' or 'Q').
    pub key: char,
    /// The action to trigger.
    pub action: HotkeyAction,
}

impl HotkeyBinding {
    /// Returns the chord as text, e.g. `Ctrl+Alt+5`.
    pub fn chord(&self) -> String {
        let mut parts: Vec<String> = self.modifiers.iter().map(ToString::to_string).collect();
        parts.push(self.key.to_string());
        parts.join("+")
    }
}

/// Returns the fixed hotkey table.
///
/// Ids 0..=9 map to Ctrl+Alt+digit. Digit 1 toggles topmost, the others
/// set the opacity level equal to the digit. [`QUIT_ID`] maps to Ctrl+Alt+Q.
pub fn defaults() -> Vec<HotkeyBinding> {
    let mut bindings: Vec<HotkeyBinding> = (0..=9u8)
        .map(|digit| {
            let action = if digit == TOPMOST_DIGIT {
                HotkeyAction::ToggleTopmost
            } else {
                HotkeyAction::Opacity(AlphaLevel::fixed(digit))
            };
            bind(i32::from(digit), char::from(b'0' + digit), action)
        })
        .collect();

    bindings.push(bind(QUIT_ID, 'Q', HotkeyAction::Quit));
    bindings
}

/// Finds the binding registered under `id`.
pub fn find(bindings: &[HotkeyBinding], id: i32) -> Option<&HotkeyBinding> {
    bindings.iter().find(|b| b.id == id)
}

fn bind(id: i32, key: char, action: HotkeyAction) -> HotkeyBinding {
    HotkeyBinding {
        id,
        modifiers: CHORD,
        key,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_ten_digits_and_quit() {
        // Act
        let bindings = defaults();

        // Assert
        assert_eq!(bindings.len(), 11);
        let ids: Vec<i32> = bindings.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, QUIT_ID]);
        assert!(bindings.iter().all(|b| b.modifiers == CHORD));
    }

    #[test]
    fn digit_one_toggles_topmost() {
        // Act
        let bindings = defaults();

        // Assert
        assert_eq!(find(&bindings, 1).unwrap().action, HotkeyAction::ToggleTopmost);
        assert_eq!(
            find(&bindings, 5).unwrap().action,
            HotkeyAction::Opacity(AlphaLevel::new(5).unwrap())
        );
    }

    #[test]
    fn quit_binding_uses_q() {
        // Act
        let bindings = defaults();
        let quit = find(&bindings, QUIT_ID).unwrap();

        // Assert
        assert_eq!(quit.key, 'Q');
        assert_eq!(quit.action, HotkeyAction::Quit);
        assert_eq!(quit.chord(), "Ctrl+Alt+Q");
    }

    #[test]
    fn digit_keys_match_their_ids() {
        // Act
        let bindings = defaults();

        // Assert
        for b in bindings.iter().filter(|b| b.id != QUIT_ID) {
            assert_eq!(b.key.to_digit(10), Some(b.id as u32));
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        // Assert
        assert!(find(&defaults(), 42).is_none());
    }
}
