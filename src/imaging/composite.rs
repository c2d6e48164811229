//! Alpha compositing and buffer-onto-buffer drawing.
//!
//! All buffers hold straight (non-premultiplied) alpha. Blending is done in
//! normalized floats per pixel and rounded once at the end.
//!
//! - [`composite`]: same-size buffers, whole-buffer blend.
//! - [`draw_at`]: unscaled draw at an integer offset, clipped to the target.
//! - [`draw_scaled`]: resample to a rectangle, then [`draw_at`].
//! - [`draw_centered`]: fit-inside scaling centred in a target area.

use super::calculations::centered_placement;
use super::params::CompositeMode;
use super::raster::{RasterBuffer, RasterError};
use image::imageops::{self, FilterType};
use rayon::prelude::*;

/// Blend `src` into `dst` with `mode` at opacity `alpha` (clamped to `[0, 1]`).
pub fn composite(
    dst: &mut RasterBuffer,
    src: &RasterBuffer,
    mode: CompositeMode,
    alpha: f32,
) -> Result<(), RasterError> {
    dst.ensure_same_size(src)?;
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Ok(());
    }
    dst.as_raw_mut()
        .par_chunks_exact_mut(4)
        .zip(src.as_raw().par_chunks_exact(4))
        .for_each(|(d, s)| {
            let out = blend_pixel([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], mode, alpha);
            d.copy_from_slice(&out);
        });
    Ok(())
}

/// Source-over `src` onto `dst` with its top-left corner at `(x, y)`.
pub fn draw_at(dst: &mut RasterBuffer, src: &RasterBuffer, x: i64, y: i64, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let (dw, dh) = dst.dimensions();
    let (sw, sh) = src.dimensions();
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(sw)).min(i64::from(dw));
    let y1 = (y + i64::from(sh)).min(i64::from(dh));
    if alpha <= 0.0 || x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_row = dw as usize * 4;
    let src_row = sw as usize * 4;
    let src_raw = src.as_raw();
    dst.as_raw_mut()
        .par_chunks_exact_mut(dst_row)
        .enumerate()
        .skip(y0 as usize)
        .take((y1 - y0) as usize)
        .for_each(|(dy, row)| {
            let sy = (dy as i64 - y) as usize;
            for dx in x0..x1 {
                let sx = (dx - x) as usize;
                let di = dx as usize * 4;
                let si = sy * src_row + sx * 4;
                let d = &mut row[di..di + 4];
                let s = &src_raw[si..si + 4];
                let out = blend_pixel(
                    [d[0], d[1], d[2], d[3]],
                    [s[0], s[1], s[2], s[3]],
                    CompositeMode::SourceOver,
                    alpha,
                );
                d.copy_from_slice(&out);
            }
        });
}

/// Resample `src` to `width × height` and draw it at `(x, y)`.
///
/// Position and size are rounded to whole pixels.
pub fn draw_scaled(
    dst: &mut RasterBuffer,
    src: &RasterBuffer,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    alpha: f32,
) {
    let w = width.round().max(0.0) as u32;
    let h = height.round().max(0.0) as u32;
    if w == 0 || h == 0 {
        return;
    }
    let (x, y) = (x.round() as i64, y.round() as i64);
    if (w, h) == src.dimensions() {
        draw_at(dst, src, x, y, alpha);
        return;
    }
    let scaled = RasterBuffer::from(imageops::resize(src.image(), w, h, FilterType::Triangle));
    draw_at(dst, &scaled, x, y, alpha);
}

/// Scale `src` uniformly to fit `target_w × target_h` and centre it there.
///
/// The scale factor is `min(target_w / src_w, target_h / src_h)`.
pub fn draw_centered(dst: &mut RasterBuffer, src: &RasterBuffer, target_w: u32, target_h: u32) {
    let p = centered_placement(src.dimensions(), (target_w, target_h));
    draw_scaled(dst, src, p.x, p.y, p.width, p.height, 1.0);
}

/// Blend one straight-alpha pixel over another.
pub(crate) fn blend_pixel(dst: [u8; 4], src: [u8; 4], mode: CompositeMode, alpha: f32) -> [u8; 4] {
    let sa = f32::from(src[3]) / 255.0 * alpha;
    if sa <= 0.0 {
        return dst;
    }
    let da = f32::from(dst[3]) / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let cs = f32::from(src[i]) / 255.0;
        let cb = f32::from(dst[i]) / 255.0;
        let cs = match mode {
            CompositeMode::SourceOver => cs,
            CompositeMode::Overlay => (1.0 - da) * cs + da * overlay(cb, cs),
        };
        let oc = (cs * sa + cb * da * (1.0 - sa)) / oa;
        out[i] = (oc * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

fn overlay(backdrop: f32, source: f32) -> f32 {
    if backdrop <= 0.5 {
        2.0 * backdrop * source
    } else {
        1.0 - 2.0 * (1.0 - backdrop) * (1.0 - source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn over_opacity_0_is_noop() {
        let dst = [1, 2, 3, 4];
        assert_eq!(blend_pixel(dst, [200, 200, 200, 200], CompositeMode::SourceOver, 0.0), dst);
    }

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 40];
        assert_eq!(blend_pixel(dst, [255, 255, 255, 0], CompositeMode::SourceOver, 1.0), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let src = [255, 0, 0, 255];
        assert_eq!(blend_pixel([0, 0, 0, 255], src, CompositeMode::SourceOver, 1.0), src);
    }

    #[test]
    fn over_half_alpha_mixes_evenly() {
        let out = blend_pixel([0, 0, 0, 255], [255, 255, 255, 255], CompositeMode::SourceOver, 0.5);
        assert_eq!(out, [128, 128, 128, 255]);
    }

    #[test]
    fn over_transparent_dst_keeps_src_color() {
        let out = blend_pixel([0, 0, 0, 0], [100, 110, 120, 200], CompositeMode::SourceOver, 1.0);
        assert_eq!(out, [100, 110, 120, 200]);
    }

    #[test]
    fn overlay_with_transparent_white_is_noop() {
        let dst = [90, 140, 200, 255];
        assert_eq!(blend_pixel(dst, [255, 255, 255, 0], CompositeMode::Overlay, 1.0), dst);
    }

    #[test]
    fn overlay_white_lightens_and_keeps_black() {
        let light = blend_pixel([128, 128, 128, 255], [255, 255, 255, 255], CompositeMode::Overlay, 1.0);
        assert_eq!(light, [255, 255, 255, 255]);
        let dark = blend_pixel([0, 0, 0, 255], [255, 255, 255, 255], CompositeMode::Overlay, 1.0);
        assert_eq!(dark, [0, 0, 0, 255]);
    }

    #[test]
    fn composite_rejects_mismatched_sizes() {
        let mut dst = RasterBuffer::new(2, 2);
        let src = RasterBuffer::new(2, 3);
        let err = composite(&mut dst, &src, CompositeMode::SourceOver, 1.0).unwrap_err();
        assert!(matches!(err, RasterError::DimensionMismatch { .. }));
    }

    #[test]
    fn draw_at_clips_to_target() {
        let mut dst = RasterBuffer::filled(3, 3, Rgba([0, 0, 0, 255]));
        let src = RasterBuffer::filled(2, 2, Rgba([255, 255, 255, 255]));
        draw_at(&mut dst, &src, 2, -1, 1.0);
        assert_eq!(dst.pixel(2, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(dst.pixel(2, 1), Rgba([0, 0, 0, 255]));
        assert_eq!(dst.pixel(1, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn draw_at_fully_outside_is_noop() {
        let mut dst = RasterBuffer::new(2, 2);
        let src = RasterBuffer::filled(2, 2, Rgba([255, 0, 0, 255]));
        draw_at(&mut dst, &src, 5, 5, 1.0);
        assert_eq!(dst, RasterBuffer::new(2, 2));
    }

    #[test]
    fn draw_centered_letterboxes() {
        let mut dst = RasterBuffer::new(4, 4);
        let src = RasterBuffer::filled(4, 2, Rgba([255, 0, 0, 255]));
        draw_centered(&mut dst, &src, 4, 4);
        assert_eq!(dst.pixel(0, 0)[3], 0);
        assert_eq!(dst.pixel(0, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(dst.pixel(3, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(dst.pixel(3, 3)[3], 0);
    }

    #[test]
    fn draw_centered_upscales_small_source() {
        let mut dst = RasterBuffer::new(6, 6);
        let src = RasterBuffer::filled(1, 1, Rgba([0, 255, 0, 255]));
        draw_centered(&mut dst, &src, 6, 6);
        assert_eq!(dst.pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(dst.pixel(5, 5), Rgba([0, 255, 0, 255]));
    }
}
