//! Pipelines that synthesize an image from parameters alone.
//!
//! Canvas sizes and label text come from [`GenerationConfig`]; labels are
//! skipped when no font is available.

use super::edit::number_or;
use crate::config::GenerationConfig;
use crate::imaging::paint::{fill_shape, stroke_shape};
use crate::imaging::{
    ColorStop, LabelFont, RasterBuffer, RasterError, Shape, draw_label, fill, linear_gradient,
};
use crate::settings::ResolvedConfig;
use image::Rgba;

const SLATE_800: Rgba<u8> = Rgba([0x1f, 0x29, 0x37, 255]);
const SLATE_700: Rgba<u8> = Rgba([0x37, 0x41, 0x51, 255]);
const INDIGO_600: Rgba<u8> = Rgba([0x4f, 0x46, 0xe5, 255]);
const AMBER_500: Rgba<u8> = Rgba([0xf5, 0x9e, 0x0b, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const BASE_MARK_SIZE: f32 = 200.0;
const STROKE_WIDTH: f32 = 4.0;
const PLACEHOLDER_FONT_SIZE: f32 = 48.0;
/// Label baseline below the centre, as a fraction of the logo canvas.
const LABEL_DROP: f32 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub struct LogoParams {
    /// `None` when the shape name is not one the renderer draws.
    pub shape: Option<Shape>,
    pub spacing: f32,
    pub font_size: f32,
    pub gradient: bool,
    pub shadow: bool,
}

impl LogoParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            shape: config.text("shape").and_then(Shape::parse),
            spacing: number_or(config, "spacing", 0.0),
            font_size: number_or(config, "fontSize", 48.0),
            gradient: config.flag("gradient").unwrap_or(false),
            shadow: config.flag("shadow").unwrap_or(false),
        }
    }

    /// Bounding size of the mark. Large spacing can make this zero or
    /// negative, in which case no mark is drawn.
    pub fn mark_size(&self) -> f32 {
        BASE_MARK_SIZE - self.spacing
    }
}

/// Render the logo: background, centred mark with a white outline, label.
pub fn logo(
    params: &LogoParams,
    generation: &GenerationConfig,
    font: Option<&LabelFont>,
) -> Result<RasterBuffer, RasterError> {
    let size = generation.logo_size;
    let mut out = RasterBuffer::new(size, size);
    if params.gradient {
        linear_gradient(
            &mut out,
            0.0,
            0.0,
            size as f32,
            size as f32,
            &[ColorStop::new(0.0, SLATE_800), ColorStop::new(1.0, INDIGO_600)],
        )?;
    } else {
        fill(&mut out, SLATE_800);
    }

    let centre = size as f32 / 2.0;
    if let Some(shape) = params.shape {
        let mark = params.mark_size();
        fill_shape(&mut out, shape, centre, centre, mark, AMBER_500);
        stroke_shape(&mut out, shape, centre, centre, mark, STROKE_WIDTH, WHITE);
    }

    match font {
        Some(font) => draw_label(
            &mut out,
            font,
            &generation.logo_label,
            params.font_size,
            centre,
            centre + LABEL_DROP * size as f32,
            WHITE,
        ),
        None => tracing::debug!("no label font, logo text skipped"),
    }

    if params.shadow {
        tracing::debug!("shadow requested; nothing is drawn after it is set");
    }
    Ok(out)
}

/// Canvas returned when a tool is run without an input image.
pub fn placeholder(
    generation: &GenerationConfig,
    font: Option<&LabelFont>,
) -> Result<RasterBuffer, RasterError> {
    let (w, h) = (generation.placeholder_width, generation.placeholder_height);
    let mut out = RasterBuffer::new(w, h);
    linear_gradient(
        &mut out,
        0.0,
        0.0,
        w as f32,
        h as f32,
        &[ColorStop::new(0.0, SLATE_800), ColorStop::new(1.0, SLATE_700)],
    )?;
    match font {
        Some(font) => draw_label(
            &mut out,
            font,
            &generation.placeholder_label,
            PLACEHOLDER_FONT_SIZE,
            w as f32 / 2.0,
            h as f32 / 2.0,
            AMBER_500,
        ),
        None => tracing::debug!("no label font, placeholder text skipped"),
    }
    Ok(out)
}
