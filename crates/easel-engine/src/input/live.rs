use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use super::types::Key;

/// Thread-safe set of currently held keys or buttons.
///
/// Written by whoever observes the press/release (the platform thread for the
/// native backend) and read by window threads at any time, so a query may
/// change between two polls.
#[derive(Debug)]
pub struct HeldSet<T> {
    held: Mutex<HashSet<T>>,
}

impl<T: Eq + Hash + Copy> HeldSet<T> {
    pub fn new() -> Self {
        Self { held: Mutex::new(HashSet::new()) }
    }

    pub fn press(&self, item: T) {
        self.lock().insert(item);
    }

    pub fn release(&self, item: T) {
        self.lock().remove(&item);
    }

    pub fn set(&self, item: T, down: bool) {
        if down {
            self.press(item);
        } else {
            self.release(item);
        }
    }

    pub fn is_down(&self, item: T) -> bool {
        self.lock().contains(&item)
    }

    /// Whether any held entry satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.lock().iter().any(pred)
    }

    /// Drops every held entry (e.g. on focus loss, to avoid stuck keys).
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<T>> {
        // A panic while holding the lock cannot leave a HashSet half-written
        // in a way that matters here.
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Eq + Hash + Copy> Default for HeldSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A held physical key.
///
/// Several physical keys can share one `Key` (both Control keys, both Enter
/// keys); `code` keeps them apart so releasing one leaves the other held.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HeldKey {
    pub key: Key,
    pub code: u32,
}

impl HeldKey {
    #[inline]
    pub const fn new(key: Key, code: u32) -> Self {
        Self { key, code }
    }
}

/// Held physical keys, queried by logical `Key`.
#[derive(Debug, Default)]
pub struct KeyTable {
    held: HeldSet<HeldKey>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: HeldKey, down: bool) {
        self.held.set(key, down);
    }

    /// True while at least one physical key mapped to `key` is held.
    pub fn is_down(&self, key: Key) -> bool {
        self.held.any(|h| h.key == key)
    }

    pub fn clear(&self) {
        self.held.clear();
    }
}

/// Process-wide key table fed by the native platform thread.
pub(crate) static GLOBAL_KEYS: LazyLock<KeyTable> = LazyLock::new(KeyTable::new);

/// Returns whether `key` is currently held down in any native window.
///
/// This is a live query: two calls within the same frame agree unless a key
/// event arrived in between. It does not need a renderer and always reports
/// `false` before the first native window exists.
pub fn key_pressed(key: Key) -> bool {
    GLOBAL_KEYS.is_down(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    // ── held sets ─────────────────────────────────────────────────────────

    #[test]
    fn press_release_round() {
        let set = HeldSet::new();
        set.press(MouseButton::Left);
        assert!(set.is_down(MouseButton::Left));
        assert!(!set.is_down(MouseButton::Right));
        set.release(MouseButton::Left);
        assert!(!set.is_down(MouseButton::Left));
    }

    #[test]
    fn clear_releases_everything() {
        let set = HeldSet::new();
        set.set(Key::A, true);
        set.set(Key::B, true);
        set.clear();
        assert!(!set.is_down(Key::A));
        assert!(!set.is_down(Key::B));
    }

    // ── key table ─────────────────────────────────────────────────────────

    const CONTROL_LEFT: HeldKey = HeldKey::new(Key::Control, 1);
    const CONTROL_RIGHT: HeldKey = HeldKey::new(Key::Control, 2);

    #[test]
    fn releasing_one_side_keeps_the_other_held() {
        let table = KeyTable::new();
        table.set(CONTROL_LEFT, true);
        table.set(CONTROL_RIGHT, true);

        table.set(CONTROL_RIGHT, false);
        assert!(table.is_down(Key::Control));

        table.set(CONTROL_LEFT, false);
        assert!(!table.is_down(Key::Control));
    }

    #[test]
    fn shared_keys_release_independently_in_any_order() {
        let enter = HeldKey::new(Key::Enter, 10);
        let numpad_enter = HeldKey::new(Key::Enter, 11);
        let table = KeyTable::new();

        table.set(numpad_enter, true);
        table.set(enter, true);
        table.set(numpad_enter, false);
        assert!(table.is_down(Key::Enter));
        table.set(enter, false);
        assert!(!table.is_down(Key::Enter));
    }

    #[test]
    fn key_table_clear_releases_every_side() {
        let table = KeyTable::new();
        table.set(CONTROL_LEFT, true);
        table.set(CONTROL_RIGHT, true);
        table.set(HeldKey::new(Key::A, 3), true);
        table.clear();
        assert!(!table.is_down(Key::Control));
        assert!(!table.is_down(Key::A));
    }
}
