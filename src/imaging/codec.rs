//! Decoding input bytes and encoding finished buffers.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (alpha dropped) |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |

use super::params::{OutputFormat, Quality};
use super::raster::{RasterBuffer, RasterError};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

/// Decode image bytes into a buffer at the image's natural size.
pub fn load_image(bytes: &[u8]) -> Result<RasterBuffer, RasterError> {
    let img = image::load_from_memory(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
    Ok(RasterBuffer::from(img.to_rgba8()))
}

/// Serialize a buffer to `format`. `quality` only affects JPEG and AVIF.
pub fn encode(
    buffer: &RasterBuffer,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, RasterError> {
    let (width, height) = buffer.dimensions();
    let mut out = Vec::new();
    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut out).write_image(
            buffer.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(buffer.image().clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, quality.value() as u8).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Webp => WebPEncoder::new_lossless(&mut out).write_image(
            buffer.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Avif => AvifEncoder::new_with_speed_quality(&mut out, 6, quality.value() as u8)
            .write_image(buffer.as_raw(), width, height, ExtendedColorType::Rgba8),
    };
    result.map_err(|e| RasterError::Encode(format!("{format} encode failed: {e}")))?;
    Ok(out)
}
