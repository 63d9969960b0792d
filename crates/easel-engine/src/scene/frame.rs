use crate::paint::Color;

use super::DrawList;

/// Everything recorded for one presented frame.
///
/// `clear == None` keeps whatever the target already holds.
#[derive(Debug, Default)]
pub struct Frame {
    clear: Option<Color>,
    list: DrawList,
}

impl Frame {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh frame: no clear color, no draws, identity transform.
    pub fn begin(&mut self) {
        self.clear = None;
        self.list.clear();
    }

    /// Sets the clear color and drops draws recorded before it.
    pub fn clear(&mut self, color: Color) {
        self.clear = Some(color);
        self.list.clear_items();
    }

    /// Called after presenting. The transform survives into the next frame.
    pub(crate) fn finish(&mut self) {
        self.clear = None;
        self.list.clear_items();
    }

    #[inline]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    #[inline]
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    #[inline]
    pub fn list_mut(&mut self) -> &mut DrawList {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Transform, Vec2};

    #[test]
    fn clear_discards_earlier_draws() {
        let mut frame = Frame::new();
        frame.list_mut().push_line(Vec2::zero(), Vec2::new(4.0, 4.0), Color::WHITE);
        frame.clear(Color::BLACK);
        frame.list_mut().push_line(Vec2::zero(), Vec2::new(8.0, 8.0), Color::WHITE);

        assert_eq!(frame.clear_color(), Some(Color::BLACK));
        assert_eq!(frame.list().len(), 1);
    }

    #[test]
    fn finish_keeps_transform_but_not_draws() {
        let mut frame = Frame::new();
        frame.list_mut().set_transform(Transform::translation(3.0, 4.0));
        frame.clear(Color::WHITE);
        frame.list_mut().push_line(Vec2::zero(), Vec2::new(1.0, 1.0), Color::BLACK);
        frame.finish();

        assert!(frame.list().is_empty());
        assert_eq!(frame.clear_color(), None);
        assert_eq!(frame.list().transform(), Transform::translation(3.0, 4.0));
    }

    #[test]
    fn begin_resets_transform() {
        let mut frame = Frame::new();
        frame.list_mut().set_transform(Transform::translation(3.0, 4.0));
        frame.begin();
        assert!(frame.list().transform().is_identity());
    }
}
