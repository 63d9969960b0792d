use crate::coords::Transform;

use super::DrawCmd;

/// A single draw item: command + the transform active when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    pub transform: Transform,
}

/// Recorded draw stream for a frame.
///
/// Paint order is recording order: later items cover earlier ones.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - `clear()` keeps the allocation, so a warmed-up list does not allocate
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    transform: Transform,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and resets the transform. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.transform = Transform::IDENTITY;
    }

    /// Drops recorded items, keeping the current transform.
    #[inline]
    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform applied to subsequently pushed commands.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Pushes a draw command under the current transform.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, transform: self.transform });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn items_keep_recording_order() {
        let mut list = DrawList::new();
        list.push_line(Vec2::zero(), Vec2::new(1.0, 1.0), Color::WHITE);
        list.push_circle(Vec2::zero(), 4.0, Color::WHITE, true);
        assert!(matches!(list.items()[0].cmd, DrawCmd::Line(_)));
        assert!(matches!(list.items()[1].cmd, DrawCmd::Circle(_)));
    }

    #[test]
    fn transform_is_captured_per_item() {
        let mut list = DrawList::new();
        list.push_line(Vec2::zero(), Vec2::new(1.0, 0.0), Color::WHITE);
        list.set_transform(Transform::translation(5.0, 5.0));
        list.push_line(Vec2::zero(), Vec2::new(1.0, 0.0), Color::WHITE);

        assert!(list.items()[0].transform.is_identity());
        assert_eq!(list.items()[1].transform, Transform::translation(5.0, 5.0));
    }

    #[test]
    fn clear_resets_items_and_transform() {
        let mut list = DrawList::new();
        list.set_transform(Transform::IDENTITY.with_rotation(45.0));
        list.push_line(Vec2::zero(), Vec2::new(1.0, 0.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());
        assert!(list.transform().is_identity());
    }
}
