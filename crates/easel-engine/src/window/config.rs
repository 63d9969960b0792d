use crate::coords::Geometry;
use crate::input::ButtonModel;

/// Window parameters fixed at construction.
///
/// Windows cannot be resized; `width`/`height` are the framebuffer size in
/// physical pixels for the whole lifetime of the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// Overrides the backend's button semantics.
    pub button_model: Option<ButtonModel>,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self { title: title.into(), width, height, button_model: None }
    }

    pub fn with_button_model(mut self, model: ButtonModel) -> Self {
        self.button_model = Some(model);
        self
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("easel", 800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_800_by_600() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.geometry(), Geometry::new(800, 600));
        assert_eq!(cfg.button_model, None);
    }

    #[test]
    fn button_model_override() {
        let cfg = WindowConfig::new("w", 10, 10).with_button_model(ButtonModel::Live);
        assert_eq!(cfg.button_model, Some(ButtonModel::Live));
    }
}
