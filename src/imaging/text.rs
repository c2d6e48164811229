//! Label text: font discovery and centred single-line drawing.

use super::raster::RasterBuffer;
use ab_glyph::{FontArc, PxScale};
use image::Rgba;
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};

/// Bold sans-serif faces tried, in order, when no font is configured.
const SYSTEM_CANDIDATES: &[&str] = &[
    #[cfg(target_os = "linux")]
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    #[cfg(target_os = "linux")]
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    #[cfg(target_os = "linux")]
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    #[cfg(target_os = "linux")]
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    #[cfg(target_os = "linux")]
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    #[cfg(target_os = "macos")]
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    #[cfg(target_os = "macos")]
    "/Library/Fonts/Arial Bold.ttf",
    #[cfg(target_os = "windows")]
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A loaded font used for pipeline labels.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    source: PathBuf,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont").field("source", &self.source).finish()
    }
}

impl LabelFont {
    /// Load a TrueType/OpenType font file.
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read label font");
                return None;
            }
        };
        match FontArc::try_from_vec(bytes) {
            Ok(font) => Some(Self {
                font,
                source: path.to_path_buf(),
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid label font");
                None
            }
        }
    }

    /// Use `configured` if given, otherwise the first system candidate that exists.
    pub fn discover(configured: Option<&Path>) -> Option<Self> {
        if let Some(path) = configured {
            return Self::load(path);
        }
        let found = SYSTEM_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .and_then(Self::load);
        if found.is_none() {
            tracing::debug!("no system label font found; labels will be skipped");
        }
        found
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Draw `text` at `size` px with its bounding box centred on `(cx, cy)`.
///
/// Glyphs rasterize over their full bounds even when clipped, so `size` is
/// capped at twice the longer buffer side.
pub fn draw_label(
    buffer: &mut RasterBuffer,
    font: &LabelFont,
    text: &str,
    size: f32,
    cx: f32,
    cy: f32,
    color: Rgba<u8>,
) {
    if text.is_empty() || size.is_nan() || size <= 0.0 {
        return;
    }
    let size = size.min(2.0 * buffer.width().max(buffer.height()) as f32);
    let scale = PxScale::from(size);
    let (w, h) = text_size(scale, &font.font, text);
    let x = (cx - w as f32 / 2.0).round() as i32;
    let y = (cy - h as f32 / 2.0).round() as i32;
    draw_text_mut(buffer.image_mut(), color, x, y, scale, &font.font, text);
}
