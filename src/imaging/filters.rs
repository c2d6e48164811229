//! Ordered filter stacks.
//!
//! A stack is a `&[FilterOp]` applied front to back. Order matters:
//! `grayscale` then `contrast` is not the same image as `contrast` then
//! `grayscale`, and the listed order is always honoured.
//!
//! Colour operations follow the CSS Filter Effects definitions and are
//! clamped to `[0, 1]` after every step. Runs of consecutive colour
//! operations are fused into a single per-pixel pass; a `Blur` ends the run
//! and is applied as a separate Gaussian pass at its position in the stack.
//!
//! Stacks print and parse as CSS filter text:
//!
//! ```
//! # use rasterkit::imaging::{FilterOp, filters::{parse_filter_stack, to_css}};
//! let ops = parse_filter_stack("grayscale(100%) contrast(150%) blur(2px)").unwrap();
//! assert_eq!(ops[1], FilterOp::Contrast(150.0));
//! assert_eq!(to_css(&ops), "grayscale(100%) contrast(150%) blur(2px)");
//! ```

use super::adjust::to_u8;
use super::raster::RasterBuffer;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Invalid filter '{0}'")]
pub struct FilterParseError(pub String);

/// One step of a filter stack. Percentages are CSS percentages
/// (`100.0` = identity for `Contrast`, `Brightness`, `Saturate`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Grayscale(f32),
    Contrast(f32),
    Brightness(f32),
    Saturate(f32),
    /// Gaussian standard deviation in pixels.
    Blur(f32),
    Invert(f32),
}

impl FilterOp {
    fn is_spatial(&self) -> bool {
        matches!(self, FilterOp::Blur(_))
    }

    /// Apply a colour operation to normalized RGB. `Blur` is a no-op here.
    fn apply_color(&self, rgb: [f32; 3]) -> [f32; 3] {
        let [r, g, b] = rgb;
        let out = match *self {
            FilterOp::Grayscale(pct) => {
                let a = 1.0 - (pct / 100.0).clamp(0.0, 1.0);
                [
                    (0.2126 + 0.7874 * a) * r + (0.7152 - 0.7152 * a) * g + (0.0722 - 0.0722 * a) * b,
                    (0.2126 - 0.2126 * a) * r + (0.7152 + 0.2848 * a) * g + (0.0722 - 0.0722 * a) * b,
                    (0.2126 - 0.2126 * a) * r + (0.7152 - 0.7152 * a) * g + (0.0722 + 0.9278 * a) * b,
                ]
            }
            FilterOp::Saturate(pct) => {
                let s = (pct / 100.0).max(0.0);
                [
                    (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
                    (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
                    (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
                ]
            }
            FilterOp::Brightness(pct) => {
                let k = (pct / 100.0).max(0.0);
                [r * k, g * k, b * k]
            }
            FilterOp::Contrast(pct) => {
                let k = (pct / 100.0).max(0.0);
                let f = |c: f32| (c - 0.5) * k + 0.5;
                [f(r), f(g), f(b)]
            }
            FilterOp::Invert(pct) => {
                let a = (pct / 100.0).clamp(0.0, 1.0);
                let f = |c: f32| a + c * (1.0 - 2.0 * a);
                [f(r), f(g), f(b)]
            }
            FilterOp::Blur(_) => rgb,
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Grayscale(v) => write!(f, "grayscale({v}%)"),
            FilterOp::Contrast(v) => write!(f, "contrast({v}%)"),
            FilterOp::Brightness(v) => write!(f, "brightness({v}%)"),
            FilterOp::Saturate(v) => write!(f, "saturate({v}%)"),
            FilterOp::Blur(v) => write!(f, "blur({v}px)"),
            FilterOp::Invert(v) => write!(f, "invert({v}%)"),
        }
    }
}

impl FromStr for FilterOp {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FilterParseError(s.trim().to_string());
        let (name, arg) = s
            .trim()
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
            .ok_or_else(err)?;
        let arg = arg.trim();

        if name.trim() == "blur" {
            let px = arg.strip_suffix("px").unwrap_or(arg);
            return px.trim().parse().map(FilterOp::Blur).map_err(|_| err());
        }

        // `150%` and the unitless multiplier `1.5` are equivalent.
        let pct = match arg.strip_suffix('%') {
            Some(p) => p.trim().parse::<f32>().map_err(|_| err())?,
            None => arg.parse::<f32>().map_err(|_| err())? * 100.0,
        };
        match name.trim() {
            "grayscale" => Ok(FilterOp::Grayscale(pct)),
            "contrast" => Ok(FilterOp::Contrast(pct)),
            "brightness" => Ok(FilterOp::Brightness(pct)),
            "saturate" => Ok(FilterOp::Saturate(pct)),
            "invert" => Ok(FilterOp::Invert(pct)),
            _ => Err(err()),
        }
    }
}

/// Parse a whitespace-separated CSS filter list. `"none"` and `""` are empty.
pub fn parse_filter_stack(s: &str) -> Result<Vec<FilterOp>, FilterParseError> {
    let s = s.trim();
    if s.is_empty() || s == "none" {
        return Ok(Vec::new());
    }
    s.split_inclusive(')')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Render a stack as CSS filter text.
pub fn to_css(ops: &[FilterOp]) -> String {
    if ops.is_empty() {
        return "none".to_string();
    }
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply `ops` to `buffer` in order.
pub fn apply_filter_stack(buffer: &mut RasterBuffer, ops: &[FilterOp]) {
    let run = ops.iter().fold(Vec::new(), |mut run: Vec<FilterOp>, op| {
        if op.is_spatial() {
            apply_color_run(buffer, &run);
            run.clear();
            if let FilterOp::Blur(px) = *op {
                gaussian_blur(buffer, px);
            }
        } else {
            run.push(*op);
        }
        run
    });
    apply_color_run(buffer, &run);
}

/// Copy of `buffer` with `ops` applied.
pub fn filtered(buffer: &RasterBuffer, ops: &[FilterOp]) -> RasterBuffer {
    let mut out = buffer.clone();
    apply_filter_stack(&mut out, ops);
    out
}

fn apply_color_run(buffer: &mut RasterBuffer, run: &[FilterOp]) {
    if run.is_empty() {
        return;
    }
    buffer.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        let rgb = [px[0], px[1], px[2]].map(|c| f32::from(c) / 255.0);
        let out = run.iter().fold(rgb, |acc, op| op.apply_color(acc));
        for (c, v) in px[..3].iter_mut().zip(out) {
            *c = to_u8(v * 255.0);
        }
    });
}

/// Gaussian blur with standard deviation `sigma` pixels.
///
/// Runs on premultiplied colour so transparent neighbours fade edges out
/// instead of pulling colour towards black. Samples outside the buffer are
/// transparent black, so borders fade like a canvas `blur()` filter. Away
/// from the borders the Q16 kernel sums to exactly 1.0 and flat regions come
/// out unchanged.
pub fn gaussian_blur(buffer: &mut RasterBuffer, sigma: f32) {
    if !sigma.is_finite() || sigma <= 0.0 {
        return;
    }
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let kernel = gaussian_kernel_q16(sigma, width.max(height));

    premultiply(buffer);
    let mut tmp = vec![0u8; buffer.as_raw().len()];
    horizontal_pass(buffer.as_raw(), &mut tmp, width as usize, &kernel);
    vertical_pass(&tmp, buffer.as_raw_mut(), width as usize, height as usize, &kernel);
    unpremultiply(buffer);
}

/// Q16 weights for offsets `-r..=r`, where `r` is `ceil(3σ)` capped at
/// `extent`. Taps further out than the buffer extent only ever land outside
/// it, so dropping them leaves the result unchanged. A capped window is
/// normalized by the continuous Gaussian integral `σ·√(2π)` instead of its
/// own sum, so the missing tails still dilute the centre.
fn gaussian_kernel_q16(sigma: f32, extent: u32) -> Vec<u32> {
    let sigma = f64::from(sigma);
    let full_radius = (sigma * 3.0).ceil().max(1.0);
    let radius = full_radius.min(f64::from(extent.max(1)));
    let capped = radius < full_radius;
    let radius = radius as i64;

    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = if capped {
        sigma * (2.0 * std::f64::consts::PI).sqrt()
    } else {
        weights.iter().sum()
    };

    let mut q: Vec<u32> = weights
        .iter()
        .map(|w| ((w / sum) * 65536.0).round() as u32)
        .collect();
    if !capped {
        let acc: i64 = q.iter().map(|&v| i64::from(v)).sum();
        let mid = q.len() / 2;
        q[mid] = (i64::from(q[mid]) + 65536 - acc).clamp(0, 65536) as u32;
    }
    q
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: usize, kernel: &[u32]) {
    let radius = (kernel.len() / 2) as isize;
    let row_len = width * 4;
    dst.par_chunks_exact_mut(row_len)
        .zip(src.par_chunks_exact(row_len))
        .for_each(|(out_row, in_row)| {
            for x in 0..width {
                let mut acc = [0u64; 4];
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sx = x as isize + ki as isize - radius;
                    if sx < 0 || sx >= width as isize {
                        continue;
                    }
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(in_row[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &[u32]) {
    let radius = (kernel.len() / 2) as isize;
    let row_len = width * 4;
    dst.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width {
                let mut acc = [0u64; 4];
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sy = y as isize + ki as isize - radius;
                    if sy < 0 || sy >= height as isize {
                        continue;
                    }
                    let idx = sy as usize * row_len + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

fn premultiply(buffer: &mut RasterBuffer) {
    buffer.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        let a = u32::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * a + 127) / 255) as u8;
        }
    });
}

fn unpremultiply(buffer: &mut RasterBuffer) {
    buffer.as_raw_mut().par_chunks_exact_mut(4).for_each(|px| {
        let a = u32::from(px[3]);
        for c in &mut px[..3] {
            *c = if a == 0 {
                0
            } else {
                ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8
            };
        }
    });
}
