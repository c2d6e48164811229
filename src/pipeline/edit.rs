//! Pipelines that transform an input image.
//!
//! Each pipeline borrows the decoded input, never mutates it, and returns a
//! freshly owned output buffer. Parameters come in as typed records built
//! from a [`ResolvedConfig`]; a missing key takes the documented fallback,
//! while an explicit value (including `0`) is used as given.
//!
//! | Pipeline | Operation sequence |
//! |---|---|
//! | [`background_replace`] | brightness key → clear → background → keyed pixels on top |
//! | [`sketch`] | grayscale, contrast, brightness, invert |
//! | [`mini_world`] | saturate + contrast → overlay ramp → optional vignette |
//! | [`retouch`] | soft filter at 70% → original at 50% |
//! | [`outpaint`] | 1.5× dark canvas → input centred → blurred enlarged copy at 50% |
//! | [`magic_eraser`] | uniform 5px blur |
//! | [`enhance`] | saturate, contrast, brightness at `intensity` opacity |

use crate::imaging::calculations::{center_offset, expanded_dimensions};
use crate::imaging::composite::blend_pixel;
use crate::imaging::filters::filtered;
use crate::imaging::{
    ColorStop, CompositeMode, FilterOp, RasterBuffer, RasterError, apply_filter_stack, composite,
    draw_at, draw_scaled, fill, linear_gradient, parse_hex, rgba, vignette,
};
use crate::settings::ResolvedConfig;
use image::Rgba;
use rayon::prelude::*;

const SLATE_800: Rgba<u8> = Rgba([0x1f, 0x29, 0x37, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INDIGO_600: Rgba<u8> = Rgba([0x4f, 0x46, 0xe5, 255]);

/// Pixels whose channel mean is above this are keyed as background.
const KEY_BRIGHT: f32 = 200.0;
/// Pixels whose channel mean is below this are keyed as background.
const KEY_DARK: f32 = 50.0;
/// Alpha removed from keyed pixels.
const KEY_ALPHA_DROP: u8 = 100;

// ============================================================================
// Parameters
// ============================================================================

/// Replacement background for [`background_replace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Leave the cleared canvas transparent (also `blur` and `pattern`).
    None,
    Solid(Rgba<u8>),
    /// Diagonal ramp from the colour to slate.
    Gradient(Rgba<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundParams {
    pub background: Background,
}

impl BackgroundParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let color = |fallback: Rgba<u8>| {
            config
                .text("color")
                .and_then(parse_hex)
                .unwrap_or(fallback)
        };
        let background = match config.text("newBackground") {
            Some("solid") => Background::Solid(color(WHITE)),
            Some("gradient") => Background::Gradient(color(INDIGO_600)),
            _ => Background::None,
        };
        Self { background }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchParams {
    pub intensity: f32,
}

impl SketchParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            intensity: number_or(config, "intensity", 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniWorldParams {
    pub saturation: f32,
    pub blur: f32,
    pub vignette: bool,
}

impl MiniWorldParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            saturation: number_or(config, "saturation", 150.0),
            blur: number_or(config, "blur", 80.0),
            vignette: config.flag("vignette").unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetouchParams {
    pub smoothing: f32,
    pub glow: f32,
}

impl RetouchParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            smoothing: number_or(config, "smoothing", 30.0),
            glow: number_or(config, "glow", 20.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    pub intensity: f32,
    pub enhancement: f32,
    pub color: f32,
}

impl EnhanceParams {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            intensity: number_or(config, "intensity", 50.0),
            enhancement: number_or(config, "enhancement", 40.0),
            color: number_or(config, "color", 100.0),
        }
    }
}

pub(crate) fn number_or(config: &ResolvedConfig, key: &str, fallback: f32) -> f32 {
    config.number(key).map(|n| n as f32).unwrap_or(fallback)
}

// ============================================================================
// Pipelines
// ============================================================================

/// Brightness-threshold "segmentation": very bright and very dark pixels
/// lose alpha, then everything is placed over the new background.
///
/// Output colour is the keyed pixel blended over the background; output
/// alpha is the keyed alpha.
pub fn background_replace(
    input: &RasterBuffer,
    params: &BackgroundParams,
) -> Result<RasterBuffer, RasterError> {
    let mut keyed = input.clone();
    keyed.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        let mean = (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / 3.0;
        if mean > KEY_BRIGHT || mean < KEY_DARK {
            px[3] = px[3].saturating_sub(KEY_ALPHA_DROP);
        }
    });

    let (w, h) = input.dimensions();
    let mut out = RasterBuffer::new(w, h);
    match params.background {
        Background::None => {}
        Background::Solid(color) => fill(&mut out, color),
        Background::Gradient(color) => linear_gradient(
            &mut out,
            0.0,
            0.0,
            w as f32,
            h as f32,
            &[ColorStop::new(0.0, color), ColorStop::new(1.0, SLATE_800)],
        )?,
    }

    out.as_raw_mut()
        .par_chunks_exact_mut(4)
        .zip(keyed.as_raw().par_chunks_exact(4))
        .for_each(|(d, s)| {
            let blended = blend_pixel(
                [d[0], d[1], d[2], d[3]],
                [s[0], s[1], s[2], s[3]],
                CompositeMode::SourceOver,
                1.0,
            );
            d.copy_from_slice(&[blended[0], blended[1], blended[2], s[3]]);
        });
    Ok(out)
}

pub fn sketch(input: &RasterBuffer, params: &SketchParams) -> Result<RasterBuffer, RasterError> {
    let ops = [
        FilterOp::Grayscale(100.0),
        FilterOp::Contrast(150.0 + params.intensity),
        FilterOp::Brightness(120.0),
        FilterOp::Invert(100.0),
    ];
    redraw_filtered(input, &ops, 1.0)
}

/// Tilt-shift look: punchier colour, a white overlay ramp that fades out
/// across the middle fifth, and an optional vignette.
pub fn mini_world(input: &RasterBuffer, params: &MiniWorldParams) -> Result<RasterBuffer, RasterError> {
    let mut out = redraw_filtered(
        input,
        &[FilterOp::Saturate(params.saturation), FilterOp::Contrast(120.0)],
        1.0,
    )?;

    let edge = rgba(255, 255, 255, params.blur / 200.0);
    let clear = rgba(255, 255, 255, 0.0);
    let (w, h) = out.dimensions();
    let mut ramp = RasterBuffer::new(w, h);
    linear_gradient(
        &mut ramp,
        0.0,
        0.0,
        0.0,
        h as f32,
        &[
            ColorStop::new(0.0, edge),
            ColorStop::new(0.4, clear),
            ColorStop::new(0.6, clear),
            ColorStop::new(1.0, edge),
        ],
    )?;
    composite(&mut out, &ramp, CompositeMode::Overlay, 1.0)?;

    if params.vignette {
        vignette(&mut out, 0.4);
    }
    Ok(out)
}

/// Soft-focus pass at 70% over the input, then the input again at 50% to
/// bring detail back.
pub fn retouch(input: &RasterBuffer, params: &RetouchParams) -> Result<RasterBuffer, RasterError> {
    let ops = [
        FilterOp::Blur(params.smoothing / 30.0),
        FilterOp::Brightness(100.0 + params.glow / 5.0),
        FilterOp::Contrast(105.0),
        FilterOp::Saturate(110.0),
    ];
    let mut out = redraw_filtered(input, &ops, 0.7)?;
    composite(&mut out, input, CompositeMode::SourceOver, 0.5)?;
    Ok(out)
}

/// Grow the canvas to ⌊1.5w⌋×⌊1.5h⌋ and blend a blurred, enlarged copy over
/// the seams.
pub fn outpaint(input: &RasterBuffer) -> Result<RasterBuffer, RasterError> {
    let (w, h) = input.dimensions();
    let (cw, ch) = expanded_dimensions((w, h));
    let mut out = RasterBuffer::filled(cw, ch, SLATE_800);

    let ox = center_offset(cw, w).floor();
    let oy = center_offset(ch, h).floor();
    draw_at(&mut out, input, ox as i64, oy as i64, 1.0);

    let mut halo = RasterBuffer::new(cw, ch);
    draw_scaled(
        &mut halo,
        input,
        ox - 50.0,
        oy - 50.0,
        f64::from(w) + 100.0,
        f64::from(h) + 100.0,
        1.0,
    );
    apply_filter_stack(&mut halo, &[FilterOp::Blur(20.0)]);
    composite(&mut out, &halo, CompositeMode::SourceOver, 0.5)?;
    Ok(out)
}

/// Uniform blur standing in for object removal. No mask is consulted.
pub fn magic_eraser(input: &RasterBuffer) -> Result<RasterBuffer, RasterError> {
    redraw_filtered(input, &[FilterOp::Blur(5.0)], 1.0)
}

/// The generic enhancement every tool without its own pipeline gets.
pub fn enhance(input: &RasterBuffer, params: &EnhanceParams) -> Result<RasterBuffer, RasterError> {
    let ops = [
        FilterOp::Saturate(params.color),
        FilterOp::Contrast(100.0 + params.enhancement / 2.0),
        FilterOp::Brightness(100.0 + params.enhancement / 4.0),
    ];
    redraw_filtered(input, &ops, params.intensity / 100.0)
}

/// Draw a filtered copy of `input` over itself at `alpha`.
fn redraw_filtered(input: &RasterBuffer, ops: &[FilterOp], alpha: f32) -> Result<RasterBuffer, RasterError> {
    let mut out = input.clone();
    let layer = filtered(input, ops);
    composite(&mut out, &layer, CompositeMode::SourceOver, alpha)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;
    use crate::test_helpers::{checker, gradient_fixture, solid};

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn config(pairs: &[(&str, SettingValue)]) -> ResolvedConfig {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn missing_keys_take_fallbacks() {
        let empty = ResolvedConfig::default();
        assert_eq!(SketchParams::from_config(&empty).intensity, 0.0);
        let mw = MiniWorldParams::from_config(&empty);
        assert_eq!((mw.saturation, mw.blur, mw.vignette), (150.0, 80.0, false));
        let rt = RetouchParams::from_config(&empty);
        assert_eq!((rt.smoothing, rt.glow), (30.0, 20.0));
        let en = EnhanceParams::from_config(&empty);
        assert_eq!((en.intensity, en.enhancement, en.color), (50.0, 40.0, 100.0));
        assert_eq!(BackgroundParams::from_config(&empty).background, Background::None);
    }

    #[test]
    fn explicit_zero_is_respected() {
        let cfg = config(&[("smoothing", 0.into()), ("intensity", 0.into())]);
        assert_eq!(RetouchParams::from_config(&cfg).smoothing, 0.0);
        assert_eq!(EnhanceParams::from_config(&cfg).intensity, 0.0);
    }

    #[test]
    fn background_params_parse_colour_with_fallback() {
        let cfg = config(&[("newBackground", "solid".into()), ("color", "#00ff00".into())]);
        assert_eq!(
            BackgroundParams::from_config(&cfg).background,
            Background::Solid(Rgba([0, 255, 0, 255]))
        );
        let cfg = config(&[("newBackground", "gradient".into()), ("color", "oops".into())]);
        assert_eq!(
            BackgroundParams::from_config(&cfg).background,
            Background::Gradient(INDIGO_600)
        );
        let cfg = config(&[("newBackground", "pattern".into())]);
        assert_eq!(BackgroundParams::from_config(&cfg).background, Background::None);
    }

    #[test]
    fn background_replace_keys_extremes_over_white() {
        let input = RasterBuffer::from_pixels(2, 2, &[WHITE, BLACK, GRAY, GRAY]).unwrap();
        let params = BackgroundParams {
            background: Background::Solid(WHITE),
        };
        let out = background_replace(&input, &params).unwrap();
        assert_eq!(out.pixel(0, 0), Rgba([255, 255, 255, 155]));
        assert_eq!(out.pixel(1, 0), Rgba([100, 100, 100, 155]));
        assert_eq!(out.pixel(0, 1), GRAY);
        assert_eq!(out.pixel(1, 1), GRAY);
    }

    #[test]
    fn background_replace_transparent_keeps_colour() {
        let input = RasterBuffer::from_pixels(2, 1, &[WHITE, Rgba([10, 10, 10, 60])]).unwrap();
        let params = BackgroundParams {
            background: Background::None,
        };
        let out = background_replace(&input, &params).unwrap();
        assert_eq!(out.pixel(0, 0), Rgba([255, 255, 255, 155]));
        // saturating: 60 - 100 floors at 0
        assert_eq!(out.pixel(1, 0)[3], 0);
    }

    #[test]
    fn sketch_inverts_extremes() {
        let input = RasterBuffer::from_pixels(2, 1, &[WHITE, BLACK]).unwrap();
        let out = sketch(&input, &SketchParams { intensity: 0.0 }).unwrap();
        assert_eq!(out.pixel(0, 0), BLACK);
        assert_eq!(out.pixel(1, 0), WHITE);
    }

    #[test]
    fn sketch_output_is_gray() {
        let out = sketch(&gradient_fixture(16, 8), &SketchParams { intensity: 30.0 }).unwrap();
        for p in out.image().pixels() {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
        }
    }

    #[test]
    fn mini_world_brightens_edges_more_than_middle() {
        let input = solid(8, 40, GRAY);
        let params = MiniWorldParams {
            saturation: 100.0,
            blur: 100.0,
            vignette: false,
        };
        let out = mini_world(&input, &params).unwrap();
        let top = out.pixel(4, 0)[0];
        let middle = out.pixel(4, 20)[0];
        assert!(top > middle, "top {top} middle {middle}");
        assert_eq!(out.dimensions(), input.dimensions());
    }

    #[test]
    fn mini_world_zero_blur_and_vignette_off_only_filters() {
        let input = gradient_fixture(12, 12);
        let params = MiniWorldParams {
            saturation: 150.0,
            blur: 0.0,
            vignette: false,
        };
        let expected = filtered(&input, &[FilterOp::Saturate(150.0), FilterOp::Contrast(120.0)]);
        assert_eq!(mini_world(&input, &params).unwrap(), expected);
    }

    fn assert_near(actual: Rgba<u8>, expected: Rgba<u8>, tolerance: u8) {
        for c in 0..4 {
            assert!(
                actual[c].abs_diff(expected[c]) <= tolerance,
                "{actual:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn mini_world_vignette_darkens_corners_only() {
        let input = solid(41, 41, GRAY);
        let params = MiniWorldParams {
            saturation: 100.0,
            blur: 0.0,
            vignette: true,
        };
        let out = mini_world(&input, &params).unwrap();
        assert_near(out.pixel(20, 20), GRAY, 1);
        // past the vignette radius: 40% black over gray
        let corner = out.pixel(0, 0);
        assert_near(corner, Rgba([77, 77, 77, 255]), 1);

        let plain = mini_world(&input, &MiniWorldParams { vignette: false, ..params }).unwrap();
        assert!(plain.pixel(0, 0)[0] > corner[0] + 40);
    }

    #[test]
    fn retouch_keeps_size_and_alpha() {
        let input = gradient_fixture(10, 6);
        let out = retouch(&input, &RetouchParams { smoothing: 30.0, glow: 20.0 }).unwrap();
        assert_eq!(out.dimensions(), (10, 6));
        assert!(out.image().pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn retouch_composites_the_original_back_at_half() {
        // flat 100 gray, glow 50: brightness 110%, contrast 105% gives 109.
        // 70% of that over 100 is 106, then the original at 50% gives 103.
        let input = solid(9, 9, Rgba([100, 100, 100, 255]));
        let out = retouch(&input, &RetouchParams { smoothing: 30.0, glow: 50.0 }).unwrap();
        // blur radius is 3, so the centre never sees past the border
        assert_near(out.pixel(4, 4), Rgba([103, 103, 103, 255]), 1);
    }

    #[test]
    fn retouch_survives_enormous_smoothing() {
        let input = gradient_fixture(4, 4);
        for smoothing in [3e6, 3e10] {
            let out = retouch(&input, &RetouchParams { smoothing, glow: 20.0 }).unwrap();
            assert_eq!(out.dimensions(), (4, 4));
            // the soft layer spreads to nothing, leaving the input
            for (a, b) in out.image().pixels().zip(input.image().pixels()) {
                assert_near(*a, *b, 1);
            }
        }
    }

    #[test]
    fn outpaint_dimensions_are_floor_one_and_a_half() {
        for (w, h) in [(4, 4), (5, 3), (1, 1), (7, 2)] {
            let out = outpaint(&solid(w, h, GRAY)).unwrap();
            assert_eq!(out.dimensions(), ((w * 3) / 2, (h * 3) / 2));
        }
    }

    #[test]
    fn outpaint_corners_stay_dark() {
        // 400 → 600: the halo spans 50..550, well clear of the corner
        let out = outpaint(&solid(400, 400, WHITE)).unwrap();
        let corner = out.pixel(0, 0);
        assert!(corner[0] < 0x30, "{corner:?}");
        let centre = out.pixel(300, 300);
        assert!(centre[0] > 200, "{centre:?}");
    }

    #[test]
    fn outpaint_halo_lightens_the_band_around_the_input() {
        // input at 100..500, halo drawn at 50..550 then blurred by 20px.
        // At x = 75 the halo is ~89% opaque white, blended at 50% over slate.
        let out = outpaint(&solid(400, 400, WHITE)).unwrap();
        let band = out.pixel(75, 300);
        assert!(band[0] > 110 && band[0] < 155, "{band:?}");
        assert!(band[0] > out.pixel(0, 0)[0] + 60);
        assert!(band[0] < out.pixel(300, 300)[0]);
        assert_eq!(band[3], 255);
    }

    #[test]
    fn magic_eraser_flat_image_is_unchanged() {
        // the blurred layer thins out towards the border, so only the
        // colour survives, within rounding
        let input = solid(12, 12, GRAY);
        let out = magic_eraser(&input).unwrap();
        for p in out.image().pixels() {
            assert_near(*p, GRAY, 1);
        }
    }

    #[test]
    fn magic_eraser_softens_hard_edges() {
        let input = checker(16, 16, 4);
        let out = magic_eraser(&input).unwrap();
        let corner = out.pixel(3, 3)[0];
        assert!(corner > 0 && corner < 255, "{corner}");
    }

    #[test]
    fn enhance_zero_intensity_is_identity() {
        let input = gradient_fixture(9, 9);
        let params = EnhanceParams {
            intensity: 0.0,
            enhancement: 80.0,
            color: 150.0,
        };
        assert_eq!(enhance(&input, &params).unwrap(), input);
    }

    #[test]
    fn enhance_full_intensity_is_the_filter_stack() {
        let input = gradient_fixture(9, 9);
        let params = EnhanceParams {
            intensity: 100.0,
            enhancement: 40.0,
            color: 100.0,
        };
        let expected = filtered(
            &input,
            &[
                FilterOp::Saturate(100.0),
                FilterOp::Contrast(120.0),
                FilterOp::Brightness(110.0),
            ],
        );
        assert_eq!(enhance(&input, &params).unwrap(), expected);
    }
}
