use std::path::Path;

use anyhow::{Context, Result};

use crate::coords::Geometry;
use crate::paint::Color;
use crate::scene::DrawError;

/// Decoded RGBA8 pixels, straight alpha, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    size: Geometry,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Decodes an image file. The format is guessed from the contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to load texture from {}", path.display()))?;
        Ok(Self::from_dynamic(img))
    }

    /// Decodes an in-memory encoded image (PNG, JPEG, ...).
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("failed to decode texture bytes")?;
        Ok(Self::from_dynamic(img))
    }

    /// Wraps raw RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "RGBA8 buffer for {width}x{height} must hold {expected} bytes, got {}",
            pixels.len()
        );
        anyhow::ensure!(width > 0 && height > 0, "texture has zero size");
        Ok(Self { size: Geometry::new(width, height), pixels })
    }

    /// A single-color image.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let px = color.to_rgba8();
        let pixels = px.repeat(width as usize * height as usize);
        Self::from_rgba8(width, height, pixels)
    }

    fn from_dynamic(img: image::DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self { size: Geometry::new(width, height), pixels: rgba.into_raw() }
    }

    pub fn size(&self) -> Geometry {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let at = self.offset(x, y)?;
        let px = self.pixels.get(at..at + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrites the texel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<(), DrawError> {
        let Geometry { width, height } = self.size;
        let out_of_bounds = DrawError::PixelOutOfBounds { x, y, width, height };
        let at = self.offset(x, y).ok_or(out_of_bounds)?;
        self.pixels
            .get_mut(at..at + 4)
            .ok_or(out_of_bounds)?
            .copy_from_slice(&rgba);
        Ok(())
    }

    /// Premultiplied colour of the texel under a normalized coordinate.
    ///
    /// Coordinates wrap, matching repeat addressing.
    pub fn sample_nearest(&self, uv: [f32; 2]) -> Color {
        let texel = |t: f32, len: u32| ((t.rem_euclid(1.0) * len as f32) as u32).min(len.saturating_sub(1));
        let x = texel(uv[0], self.size.width);
        let y = texel(uv[1], self.size.height);
        match self.pixel(x, y) {
            Some([r, g, b, a]) => Color::rgba(r.into(), g.into(), b.into(), a.into()),
            None => Color::transparent(),
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        self.size
            .contains(x, y)
            .then(|| (y as usize * self.size.width as usize + x as usize) * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        assert!(ImageData::from_rgba8(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn rejects_zero_size() {
        assert!(ImageData::from_rgba8(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn filled_repeats_the_color() {
        let img = ImageData::filled(3, 2, Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(img.size(), Geometry::new(3, 2));
        assert_eq!(img.pixels().len(), 24);
        assert!(img.pixels().chunks(4).all(|p| p == [1, 2, 3, 255]));
    }

    #[test]
    fn set_pixel_writes_one_texel() {
        let mut img = ImageData::filled(2, 2, Color::BLACK).unwrap();
        img.set_pixel(1, 1, [1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn set_pixel_outside_is_an_error() {
        let mut img = ImageData::filled(2, 2, Color::BLACK).unwrap();
        assert_eq!(
            img.set_pixel(0, 2, [0; 4]),
            Err(DrawError::PixelOutOfBounds { x: 0, y: 2, width: 2, height: 2 })
        );
        assert_eq!(img.pixel(5, 5), None);
    }

    #[test]
    fn nearest_sampling_picks_the_covering_texel() {
        let mut img = ImageData::filled(2, 2, Color::BLACK).unwrap();
        img.set_pixel(1, 0, [255, 0, 0, 255]).unwrap();

        assert_eq!(img.sample_nearest([0.75, 0.25]), Color::rgb(255, 0, 0));
        assert_eq!(img.sample_nearest([0.25, 0.25]), Color::BLACK);
        assert_eq!(img.sample_nearest([1.75, -0.75]), Color::rgb(255, 0, 0));
    }

    #[test]
    fn decodes_png_from_memory() {
        let mut encoded = Vec::new();
        let src = image::RgbaImage::from_pixel(2, 1, image::Rgba([9, 8, 7, 255]));
        src.write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();

        let img = ImageData::from_memory(&encoded).unwrap();
        assert_eq!(img.size(), Geometry::new(2, 1));
        assert_eq!(&img.pixels()[..4], &[9, 8, 7, 255]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ImageData::open("/definitely/not/here.png").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.png"));
    }
}
