//! Pure calculation functions for canvas geometry.
//!
//! All functions here are pure and testable without any buffers.

/// Uniform scale factor that fits `source` inside `target`.
///
/// # Examples
/// ```
/// # use rasterkit::imaging::calculations::fit_scale;
/// // 400x200 into 200x200 → halve
/// assert_eq!(fit_scale((400, 200), (200, 200)), 0.5);
/// // 100x100 into 300x200 → height limits
/// assert_eq!(fit_scale((100, 100), (300, 200)), 2.0);
/// ```
pub fn fit_scale(source: (u32, u32), target: (u32, u32)) -> f64 {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    if src_w == 0 || src_h == 0 {
        return 0.0;
    }
    (tgt_w as f64 / src_w as f64).min(tgt_h as f64 / src_h as f64)
}

/// Placement of a scaled source inside a target area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fit `source` inside `target` preserving aspect ratio, centred.
///
/// The scaled size is `source * fit_scale`, and the leftover space is split
/// evenly on both sides of the short axis.
pub fn centered_placement(source: (u32, u32), target: (u32, u32)) -> Placement {
    let scale = fit_scale(source, target);
    let width = source.0 as f64 * scale;
    let height = source.1 as f64 * scale;
    Placement {
        x: (target.0 as f64 - width) / 2.0,
        y: (target.1 as f64 - height) / 2.0,
        width,
        height,
    }
}

/// Canvas size for outpainting: 1.5× on both axes, truncated.
pub fn expanded_dimensions(source: (u32, u32)) -> (u32, u32) {
    let (w, h) = source;
    ((w as f64 * 1.5).floor() as u32, (h as f64 * 1.5).floor() as u32)
}

/// Offset that centres `inner` inside `outer` along one axis.
///
/// Negative when `inner` is larger than `outer`.
pub fn center_offset(outer: u32, inner: u32) -> f64 {
    (outer as f64 - inner as f64) / 2.0
}
