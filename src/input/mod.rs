//! Abstract input events.
//!
//! The host windowing layer translates its own event types into these; the
//! crate has no dependency on any particular input library.

use glam::Vec2;

/// Mouse button enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One input event fed to the manager during the per-frame input pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    ButtonPressed { button: MouseButton, position: Vec2 },
    ButtonReleased { button: MouseButton, position: Vec2 },
    /// The inventory toggle key ("I" in the default binding)
    ToggleInventory,
}
