use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::coords::Geometry;
use crate::input::{HeldKey, InputEvent, Key, MouseButton};

/// Held-state change carried by a window event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum HeldChange {
    Button(MouseButton, bool),
    Key(HeldKey, bool),
    /// Focus left the window; nothing is held any more.
    ReleaseAll,
}

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem and for
/// pointer motion outside the window's `size`. Positions stay in physical
/// pixels, the unit of the framebuffer.
pub(super) fn translate_window_event(event: &WindowEvent, size: Geometry) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),

        WindowEvent::Focused(true) => Some(InputEvent::FocusIn),
        WindowEvent::Focused(false) => Some(InputEvent::FocusOut),

        // Captured drags keep reporting outside the client area.
        WindowEvent::CursorMoved { position, .. } if !size.contains_point(position.x, position.y) => None,
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMotion {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
            Some(InputEvent::ButtonPress(map_mouse_button(*button)))
        }

        WindowEvent::MouseWheel { delta, .. } => wheel_button(*delta).map(InputEvent::ButtonPress),

        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            Some(InputEvent::KeyPress(map_key(event.physical_key)))
        }

        _ => None,
    }
}

/// Held-state side effect of `event`, if any.
pub(super) fn held_change(event: &WindowEvent) -> Option<HeldChange> {
    match event {
        WindowEvent::Focused(false) => Some(HeldChange::ReleaseAll),

        WindowEvent::MouseInput { state, button, .. } => Some(HeldChange::Button(
            map_mouse_button(*button),
            *state == ElementState::Pressed,
        )),

        WindowEvent::KeyboardInput { event, .. } => Some(HeldChange::Key(
            held_key(event.physical_key),
            event.state == ElementState::Pressed,
        )),

        _ => None,
    }
}

/// Maps a wheel delta to the scroll pseudo-button. Pure horizontal motion is ignored.
pub(super) fn wheel_button(delta: MouseScrollDelta) -> Option<MouseButton> {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(p) => p.y,
    };
    if dy > 0.0 {
        Some(MouseButton::ScrollUp)
    } else if dy < 0.0 {
        Some(MouseButton::ScrollDown)
    } else {
        None
    }
}

pub(super) fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

/// Held-table entry for a physical key: the mapped `Key` plus the scancode
/// that tells left and right variants apart.
pub(super) fn held_key(pk: PhysicalKey) -> HeldKey {
    let code = match pk {
        PhysicalKey::Code(code) => code as u32,
        PhysicalKey::Unidentified(_) => u32::MAX,
    };
    HeldKey::new(map_key(pk), code)
}

pub(super) fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    const SIZE: Geometry = Geometry::new(800, 600);

    fn cursor_at(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn close_and_focus_translate() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested, SIZE),
            Some(InputEvent::CloseRequested)
        );
        assert_eq!(translate_window_event(&WindowEvent::Focused(true), SIZE), Some(InputEvent::FocusIn));
        assert_eq!(translate_window_event(&WindowEvent::Focused(false), SIZE), Some(InputEvent::FocusOut));
    }

    #[test]
    fn pointer_motion_inside_the_window_is_reported() {
        assert_eq!(
            translate_window_event(&cursor_at(12.0, 34.0), SIZE),
            Some(InputEvent::PointerMotion { x: 12.0, y: 34.0 })
        );
        assert_eq!(
            translate_window_event(&cursor_at(799.0, 599.0), SIZE),
            Some(InputEvent::PointerMotion { x: 799.0, y: 599.0 })
        );
    }

    #[test]
    fn pointer_motion_outside_the_window_is_dropped() {
        assert_eq!(translate_window_event(&cursor_at(-30.0, 900.0), SIZE), None);
        assert_eq!(translate_window_event(&cursor_at(-1.0, 10.0), SIZE), None);
        assert_eq!(translate_window_event(&cursor_at(10.0, 600.0), SIZE), None);
        assert_eq!(translate_window_event(&cursor_at(800.0, 10.0), SIZE), None);
    }

    #[test]
    fn focus_loss_releases_everything() {
        assert_eq!(held_change(&WindowEvent::Focused(false)), Some(HeldChange::ReleaseAll));
        assert_eq!(held_change(&WindowEvent::Focused(true)), None);
    }

    // ── mapping ───────────────────────────────────────────────────────────

    #[test]
    fn wheel_maps_to_scroll_buttons() {
        assert_eq!(wheel_button(MouseScrollDelta::LineDelta(0.0, 1.0)), Some(MouseButton::ScrollUp));
        assert_eq!(wheel_button(MouseScrollDelta::LineDelta(0.0, -2.0)), Some(MouseButton::ScrollDown));
        assert_eq!(
            wheel_button(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.5))),
            Some(MouseButton::ScrollDown)
        );
        assert_eq!(wheel_button(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }

    #[test]
    fn keys_keep_sides_for_shift_only() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftLeft)), Key::ShiftLeft);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::ShiftRight);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ControlRight)), Key::Control);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad7)), Key::Numpad7);
    }

    #[test]
    fn held_keys_keep_both_sides_apart() {
        let left = held_key(PhysicalKey::Code(KeyCode::ControlLeft));
        let right = held_key(PhysicalKey::Code(KeyCode::ControlRight));
        assert_eq!(left.key, Key::Control);
        assert_eq!(right.key, Key::Control);
        assert_ne!(left, right);

        let enter = held_key(PhysicalKey::Code(KeyCode::Enter));
        let numpad = held_key(PhysicalKey::Code(KeyCode::NumpadEnter));
        assert_eq!(enter.key, numpad.key);
        assert_ne!(enter, numpad);
    }

    #[test]
    fn unmapped_keys_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::CapsLock)), Key::Unknown(_)));
    }

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }
}
