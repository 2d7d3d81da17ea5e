use std::collections::HashMap;

use crate::alpha::AlphaLevel;
use crate::{WindowHandle, WindowOps, WindowResult, ZBand};

/// Applies opacity and topmost changes to windows.
///
/// Owns the per-window topmost bookkeeping. Entries are created on first
/// toggle and never removed; entries for closed windows are harmless.
/// Lives on the hotkey listener thread, so the registry needs no locking.
pub struct WindowController<'a> {
    ops: &'a dyn WindowOps,
    topmost: HashMap<WindowHandle, bool>,
}

impl<'a> WindowController<'a> {
    pub fn new(ops: &'a dyn WindowOps) -> Self {
        Self {
            ops,
            topmost: HashMap::new(),
        }
    }

    /// Programs `ALPHA_MAP[level]` on the window.
    ///
    /// The layered style bit is added only when it is absent; it is
    /// never cleared. Level 0 leaves the window layered but opaque.
    pub fn set_opacity(&self, window: WindowHandle, level: AlphaLevel) -> WindowResult<()> {
        if !self.ops.is_layered(window)? {
            self.ops.add_layered_style(window)?;
            crate::log_debug!("Set layered style on {window}");
        }

        let alpha = level.alpha();
        self.ops.set_alpha(window, alpha)?;
        crate::log_info!("Opacity {window}: level={} alpha={alpha}", level.get());
        Ok(())
    }

    /// Flips the window between the topmost and normal bands.
    ///
    /// Position and size are left alone. The registry is only updated
    /// once the z-order change succeeds. Returns the new pinned state.
    pub fn toggle_topmost(&mut self, window: WindowHandle) -> WindowResult<bool> {
        let pinned = !self.is_topmost(window);
        self.ops.set_z_band(window, ZBand::pinned(pinned))?;
        self.topmost.insert(window, pinned);
        crate::log_info!("Topmost {window}: {pinned}");
        Ok(pinned)
    }

    /// Returns whether the window is pinned by us. Unknown windows are not.
    pub fn is_topmost(&self, window: WindowHandle) -> bool {
        self.topmost.get(&window).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha::ALPHA_MAP;
    use crate::fake::{Call, FakeDesktop};

    fn h(raw: usize) -> WindowHandle {
        WindowHandle::new(raw).unwrap()
    }

    fn level(n: u8) -> AlphaLevel {
        AlphaLevel::new(n).unwrap()
    }

    #[test]
    fn opacity_programs_table_value_for_every_level() {
        for n in 0..=AlphaLevel::MAX {
            // Arrange
            let desktop = FakeDesktop::new();
            let controller = WindowController::new(&desktop);

            // Act
            controller.set_opacity(h(1), level(n)).unwrap();

            // Assert
            let alphas: Vec<u8> = desktop
                .calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::SetAlpha(_, a) => Some(a),
                    _ => None,
                })
                .collect();
            assert_eq!(alphas, vec![ALPHA_MAP[usize::from(n)]]);
        }
    }

    #[test]
    fn layered_style_is_set_only_once() {
        // Arrange
        let desktop = FakeDesktop::new();
        let controller = WindowController::new(&desktop);

        // Act
        controller.set_opacity(h(1), level(3)).unwrap();
        controller.set_opacity(h(1), level(8)).unwrap();
        controller.set_opacity(h(1), level(3)).unwrap();

        // Assert
        assert_eq!(
            desktop.calls(),
            vec![
                Call::AddLayered(h(1)),
                Call::SetAlpha(h(1), 132),
                Call::SetAlpha(h(1), 208),
                Call::SetAlpha(h(1), 132),
            ]
        );
    }

    #[test]
    fn opacity_on_closed_window_fails_without_mutation() {
        // Arrange
        let desktop = FakeDesktop::new();
        desktop.close(h(2));
        let controller = WindowController::new(&desktop);

        // Act
        let result = controller.set_opacity(h(2), level(5));

        // Assert
        assert!(result.is_err());
        assert!(desktop.calls().is_empty());
    }

    #[test]
    fn toggle_twice_restores_state_and_orders_calls() {
        // Arrange
        let desktop = FakeDesktop::new();
        let mut controller = WindowController::new(&desktop);

        // Act
        let first = controller.toggle_topmost(h(1)).unwrap();
        let second = controller.toggle_topmost(h(1)).unwrap();

        // Assert
        assert!(first);
        assert!(!second);
        assert!(!controller.is_topmost(h(1)));
        assert_eq!(
            desktop.calls(),
            vec![
                Call::SetZBand(h(1), ZBand::Topmost),
                Call::SetZBand(h(1), ZBand::NotTopmost),
            ]
        );
    }

    #[test]
    fn topmost_state_is_tracked_per_window() {
        // Arrange
        let desktop = FakeDesktop::new();
        let mut controller = WindowController::new(&desktop);

        // Act
        controller.toggle_topmost(h(1)).unwrap();
        controller.toggle_topmost(h(2)).unwrap();
        controller.toggle_topmost(h(2)).unwrap();

        // Assert
        assert!(controller.is_topmost(h(1)));
        assert!(!controller.is_topmost(h(2)));
        assert!(!controller.is_topmost(h(3)));
    }

    #[test]
    fn failed_toggle_keeps_previous_state() {
        // Arrange
        let desktop = FakeDesktop::new();
        let mut controller = WindowController::new(&desktop);
        controller.toggle_topmost(h(1)).unwrap();
        desktop.close(h(1));

        // Act
        let result = controller.toggle_topmost(h(1));

        // Assert
        assert!(result.is_err());
        assert!(controller.is_topmost(h(1)));
    }
}
