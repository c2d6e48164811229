//! Per-pixel channel adjustments.
//!
//! Both operations touch RGB only; alpha is left as-is. Results are clamped
//! to `[0, 255]`, so any `delta` / `factor` is accepted.

use super::raster::RasterBuffer;
use rayon::prelude::*;

/// Luminance weights used by [`adjust_saturation`].
const LUMA: [f32; 3] = [0.2989, 0.5870, 0.1140];

/// Add `delta` to every colour channel.
pub fn adjust_brightness(buffer: &mut RasterBuffer, delta: i32) {
    if delta == 0 {
        return;
    }
    buffer.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        for c in &mut px[..3] {
            *c = (i32::from(*c) + delta).clamp(0, 255) as u8;
        }
    });
}

/// Interpolate each channel away from (factor > 1) or towards (factor < 1)
/// the pixel's luminance.
pub fn adjust_saturation(buffer: &mut RasterBuffer, factor: f32) {
    buffer.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        let l = luminance(px[0], px[1], px[2]);
        for c in &mut px[..3] {
            *c = to_u8(l + (f32::from(*c) - l) * factor);
        }
    });
}

pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMA[0] * f32::from(r) + LUMA[1] * f32::from(g) + LUMA[2] * f32::from(b)
}

pub(crate) fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RasterBuffer {
        RasterBuffer::from_pixels(
            2,
            2,
            &[
                Rgba([255, 0, 0, 255]),
                Rgba([12, 200, 90, 128]),
                Rgba([250, 250, 5, 0]),
                Rgba([0, 0, 0, 255]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn brightness_zero_is_identity() {
        let mut buf = sample();
        adjust_brightness(&mut buf, 0);
        assert_eq!(buf, sample());
    }

    #[test]
    fn brightness_clamps_and_keeps_alpha() {
        let mut buf = sample();
        adjust_brightness(&mut buf, 10);
        assert_eq!(buf.pixel(0, 0), Rgba([255, 10, 10, 255]));
        assert_eq!(buf.pixel(1, 0), Rgba([22, 210, 100, 128]));

        adjust_brightness(&mut buf, -300);
        assert_eq!(buf.pixel(1, 0), Rgba([0, 0, 0, 128]));
    }

    #[test]
    fn saturation_one_is_identity() {
        let mut buf = sample();
        adjust_saturation(&mut buf, 1.0);
        assert_eq!(buf, sample());
    }

    #[test]
    fn saturation_zero_is_grayscale_luminance() {
        let mut buf = sample();
        adjust_saturation(&mut buf, 0.0);
        let original = sample();
        for y in 0..2 {
            for x in 0..2 {
                let Rgba([r, g, b, a]) = buf.pixel(x, y);
                let o = original.pixel(x, y);
                assert_eq!(r, g);
                assert_eq!(g, b);
                assert_eq!(r, to_u8(luminance(o[0], o[1], o[2])));
                assert_eq!(a, o[3]);
            }
        }
    }

    #[test]
    fn saturation_boost_clamps() {
        let mut buf = sample();
        adjust_saturation(&mut buf, 4.0);
        let Rgba([r, g, b, _]) = buf.pixel(0, 0);
        assert_eq!((r, g, b), (255, 0, 0));
    }
}
