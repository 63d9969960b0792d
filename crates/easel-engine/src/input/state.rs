use crate::coords::Vec2;

use super::types::{InputEvent, Key, MouseButton};

/// Latest known input for a single window.
///
/// The snapshot is rebuilt incrementally: each poll starts with
/// [`InputSnapshot::begin_poll`], which drops the one-shot values of the
/// previous poll, then every drained event updates exactly one field.
#[derive(Debug, Default, Clone)]
pub struct InputSnapshot {
    /// Whether the window is focused. Starts unfocused.
    focused: bool,

    /// Last pointer position in window pixels. Sticky: kept when the pointer
    /// leaves the window.
    pointer: Vec2,

    /// Latest button press of the current poll.
    last_button: Option<MouseButton>,

    /// Latest key press of the current poll.
    last_key: Option<Key>,

    /// Set once a close request was observed; never cleared.
    close_requested: bool,
}

impl InputSnapshot {
    /// Clears values that only live for one poll.
    pub fn begin_poll(&mut self) {
        self.last_button = None;
        self.last_key = None;
    }

    /// Applies a backend event to the snapshot.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMotion { x, y } => self.pointer = Vec2::new(x, y),
            InputEvent::ButtonPress(button) => self.last_button = Some(button),
            InputEvent::KeyPress(key) => self.last_key = Some(key),
            InputEvent::FocusIn => self.focused = true,
            InputEvent::FocusOut => self.focused = false,
            InputEvent::CloseRequested => {
                if !self.close_requested {
                    log::debug!("close requested by the window system");
                }
                self.close_requested = true;
            }
        }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    pub fn last_button(&self) -> Option<MouseButton> {
        self.last_button
    }

    pub fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_defaults_to_origin() {
        assert_eq!(InputSnapshot::default().pointer_position(), Vec2::zero());
    }

    #[test]
    fn pointer_is_sticky_across_focus_changes() {
        let mut s = InputSnapshot::default();
        s.apply_event(InputEvent::PointerMotion { x: 50.0, y: 70.0 });
        s.begin_poll();
        s.apply_event(InputEvent::FocusOut);
        s.begin_poll();
        s.apply_event(InputEvent::FocusIn);
        assert_eq!(s.pointer_position(), Vec2::new(50.0, 70.0));
    }

    #[test]
    fn button_press_lasts_one_poll() {
        let mut s = InputSnapshot::default();
        s.begin_poll();
        s.apply_event(InputEvent::ButtonPress(MouseButton::Left));
        assert_eq!(s.last_button(), Some(MouseButton::Left));
        s.begin_poll();
        assert_eq!(s.last_button(), None);
    }

    #[test]
    fn latest_button_of_a_poll_wins() {
        let mut s = InputSnapshot::default();
        s.apply_event(InputEvent::ButtonPress(MouseButton::Left));
        s.apply_event(InputEvent::ButtonPress(MouseButton::Right));
        assert_eq!(s.last_button(), Some(MouseButton::Right));
    }

    #[test]
    fn focus_keeps_value_without_events() {
        let mut s = InputSnapshot::default();
        assert!(!s.focused());
        s.apply_event(InputEvent::FocusIn);
        s.begin_poll();
        assert!(s.focused());
    }

    #[test]
    fn close_request_is_latched() {
        let mut s = InputSnapshot::default();
        s.apply_event(InputEvent::CloseRequested);
        s.begin_poll();
        s.apply_event(InputEvent::FocusIn);
        assert!(s.close_requested());
    }

    #[test]
    fn key_press_lasts_one_poll() {
        let mut s = InputSnapshot::default();
        s.apply_event(InputEvent::KeyPress(Key::A));
        assert_eq!(s.last_key(), Some(Key::A));
        s.begin_poll();
        assert_eq!(s.last_key(), None);
    }
}
