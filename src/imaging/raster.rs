//! The addressable pixel buffer every pipeline works on.
//!
//! A [`RasterBuffer`] is a width×height grid of straight-alpha RGBA8 samples.
//! It wraps an [`image::RgbaImage`] so the `image` and `imageproc` ecosystems
//! can draw into it directly, while the primitives in this module add the
//! dimension checks pipelines rely on.

use image::{Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Invalid gradient: {0}")]
    InvalidGradient(String),
}

/// Straight-alpha RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Allocate a buffer filled with one colour.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Build from a row-major list of pixels. Returns `None` if the pixel
    /// count does not match `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgba<u8>]) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        let raw: Vec<u8> = pixels.iter().flat_map(|p| p.0).collect();
        RgbaImage::from_raw(width, height, raw).map(Self::from)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba<u8>) {
        self.image.put_pixel(x, y, px);
    }

    /// Interleaved RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fail with [`RasterError::DimensionMismatch`] unless `other` has the same size.
    pub fn ensure_same_size(&self, other: &RasterBuffer) -> Result<(), RasterError> {
        if self.dimensions() != other.dimensions() {
            return Err(RasterError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent() {
        let buf = RasterBuffer::new(3, 2);
        assert_eq!(buf.dimensions(), (3, 2));
        assert!(buf.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_pixels_is_row_major() {
        let px = [
            Rgba([1, 0, 0, 255]),
            Rgba([2, 0, 0, 255]),
            Rgba([3, 0, 0, 255]),
            Rgba([4, 0, 0, 255]),
        ];
        let buf = RasterBuffer::from_pixels(2, 2, &px).unwrap();
        assert_eq!(buf.pixel(1, 0), Rgba([2, 0, 0, 255]));
        assert_eq!(buf.pixel(0, 1), Rgba([3, 0, 0, 255]));
    }

    #[test]
    fn from_pixels_rejects_wrong_count() {
        assert!(RasterBuffer::from_pixels(2, 2, &[Rgba([0, 0, 0, 0])]).is_none());
    }

    #[test]
    fn ensure_same_size_reports_both_sizes() {
        let a = RasterBuffer::new(2, 2);
        let b = RasterBuffer::new(3, 2);
        match a.ensure_same_size(&b) {
            Err(RasterError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, (2, 2));
                assert_eq!(actual, (3, 2));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }
}
