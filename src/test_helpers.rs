//! Shared raster fixtures for unit tests.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let input = gradient_fixture(16, 8);
//! let bytes = png_bytes(&input);
//! let out = engine.process("sketch-pencil-art", Some(&bytes), &cfg).unwrap();
//! ```

use crate::imaging::{OutputFormat, Quality, RasterBuffer, encode};
use image::Rgba;

/// Opaque buffer of one colour.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RasterBuffer {
    RasterBuffer::filled(width, height, color)
}

/// Opaque buffer with red rising left to right, green top to bottom and a
/// fixed blue, so no two neighbouring pixels match.
pub fn gradient_fixture(width: u32, height: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
            let g = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
            buf.put_pixel(x, y, Rgba([r, g, 96, 255]));
        }
    }
    buf
}

/// Black and white squares of `cell` pixels.
pub fn checker(width: u32, height: u32, cell: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(width, height);
    let cell = cell.max(1);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 };
            buf.put_pixel(x, y, Rgba([v, v, v, 255]));
        }
    }
    buf
}

/// PNG encoding of `buffer`, for feeding `Engine::process`.
pub fn png_bytes(buffer: &RasterBuffer) -> Vec<u8> {
    encode(buffer, OutputFormat::Png, Quality::default()).unwrap()
}
