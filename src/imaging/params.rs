//! Parameter types for raster operations.
//!
//! These types describe *what* to paint or encode, not *how*. They are shared
//! by the primitives in this module and by the per-tool pipelines, which build
//! them from resolved settings.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`OutputFormat`]: Encoded representation of a finished buffer.
//! - [`ColorStop`]: One stop of a gradient ramp (offset + colour).
//! - [`CompositeMode`]: How a source buffer combines with a destination.
//! - [`parse_hex`]: `#rgb` / `#rrggbb` / `#rrggbbaa` colour strings from settings.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Encoded output format.
///
/// PNG is the default and the only one that is byte-exact and keeps alpha.
/// JPEG drops alpha, WebP is encoded lossless, AVIF goes through rav1e.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Avif,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Avif => "image/avif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
            OutputFormat::Avif => "avif",
        }
    }

    /// Pick a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::Webp),
            "avif" => Some(OutputFormat::Avif),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One stop of a gradient ramp.
///
/// `offset` is a position in `[0, 1]` along the gradient line. Stops passed to
/// a gradient must be ordered by non-decreasing offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba<u8>,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba<u8>) -> Self {
        Self { offset, color }
    }
}

/// Compositing rule for [`composite`](super::composite::composite).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Porter-Duff source-over.
    #[default]
    SourceOver,
    /// Separable `overlay` blend, then source-over.
    Overlay,
}

/// Parse a CSS-style hex colour: `#rgb`, `#rrggbb` or `#rrggbbaa`.
///
/// The leading `#` is optional. Returns `None` for anything else.
pub fn parse_hex(s: &str) -> Option<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgba(out))
        }
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

/// `rgba(r, g, b, a)` with `a` in `[0, 1]`.
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Rgba<u8> {
    Rgba([r, g, b, (a.clamp(0.0, 1.0) * 255.0).round() as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_95() {
        assert_eq!(Quality::default().value(), 95);
    }

    #[test]
    fn parse_hex_long_and_short_forms() {
        assert_eq!(parse_hex("#1f2937"), Some(Rgba([0x1f, 0x29, 0x37, 255])));
        assert_eq!(parse_hex("#fff"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_hex("00000080"), Some(Rgba([0, 0, 0, 0x80])));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#gggggg"), None);
        assert_eq!(parse_hex("blue"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn rgba_scales_alpha() {
        assert_eq!(rgba(0, 0, 0, 0.4), Rgba([0, 0, 0, 102]));
        assert_eq!(rgba(1, 2, 3, 7.0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("gif"), None);
    }
}
