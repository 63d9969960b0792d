use std::fmt;

/// Keyboard key identifier.
///
/// Backends map platform keycodes into these variants where possible.
/// For unsupported keys, `Key::Unknown(u32)` carries a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers; shift is sided like the X11 keysyms it replaces.
    ShiftLeft,
    ShiftRight,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Numpad digits
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

/// Mouse button identifier.
///
/// Wheel motion is reported as the `ScrollUp` / `ScrollDown` pseudo-buttons,
/// one press per wheel notch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Wheel pseudo-buttons have no held state.
    #[inline]
    pub fn is_scroll(self) -> bool {
        matches!(self, MouseButton::ScrollUp | MouseButton::ScrollDown)
    }
}

/// How a backend reports mouse button state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonModel {
    /// `button_pressed` is true only for a press delivered by the most recent
    /// poll. Callers must query every frame or they miss presses.
    OneShot,
    /// `button_pressed` reflects the live held state, which may change
    /// between polls.
    Live,
}

impl ButtonModel {
    /// The model this platform historically used.
    pub const fn platform_default() -> Self {
        if cfg!(windows) {
            ButtonModel::Live
        } else {
            ButtonModel::OneShot
        }
    }
}

/// Backend-agnostic input events.
///
/// Produced by a backend's event pump and consumed immediately by the
/// `InputSnapshot`; events never outlive the poll that delivered them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a position in window pixels.
    PointerMotion { x: f32, y: f32 },
    ButtonPress(MouseButton),
    KeyPress(Key),
    FocusIn,
    FocusOut,
    CloseRequested,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
