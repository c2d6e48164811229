//! Filling buffers: solid colours, gradient ramps, vignettes and shapes.
//!
//! Gradients and the vignette paint source-over, like a canvas `fillRect`
//! with a gradient fill style. Shape fills go through `imageproc` and replace
//! the pixels they cover.

use super::composite::blend_pixel;
use super::params::{ColorStop, CompositeMode, rgba};
use super::raster::{RasterBuffer, RasterError};
use image::Rgba;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use rayon::prelude::*;
use std::f32::consts::PI;

/// Overwrite every pixel with `color`.
pub fn fill(buffer: &mut RasterBuffer, color: Rgba<u8>) {
    buffer
        .as_raw_mut()
        .par_chunks_exact_mut(4)
        .for_each(|px| px.copy_from_slice(&color.0));
}

/// Reset every pixel to transparent black.
pub fn clear(buffer: &mut RasterBuffer) {
    buffer.as_raw_mut().fill(0);
}

/// Paint a linear ramp from `(x0, y0)` (offset 0) to `(x1, y1)` (offset 1).
///
/// Pixels are sampled at their centres. A zero-length line paints the last
/// stop everywhere.
pub fn linear_gradient(
    buffer: &mut RasterBuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    stops: &[ColorStop],
) -> Result<(), RasterError> {
    validate_stops(stops)?;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len_sq = dx * dx + dy * dy;
    paint_ramp(buffer, stops, |x, y| {
        if len_sq <= f32::EPSILON {
            1.0
        } else {
            ((x - x0) * dx + (y - y0) * dy) / len_sq
        }
    });
    Ok(())
}

/// Paint a radial ramp centred on `(cx, cy)`: offset 0 at radius `r0`,
/// offset 1 at radius `r1`.
pub fn radial_gradient(
    buffer: &mut RasterBuffer,
    cx: f32,
    cy: f32,
    r0: f32,
    r1: f32,
    stops: &[ColorStop],
) -> Result<(), RasterError> {
    if !(r0 >= 0.0 && r1 >= 0.0) {
        return Err(RasterError::InvalidGradient(format!(
            "radii must be non-negative, got {r0} and {r1}"
        )));
    }
    validate_stops(stops)?;
    paint_ramp(buffer, stops, radial_offset(cx, cy, r0, r1));
    Ok(())
}

/// Darken towards the edges: black at alpha 0 in the centre ramping to
/// alpha `intensity` at half the larger side.
pub fn vignette(buffer: &mut RasterBuffer, intensity: f32) {
    let (w, h) = buffer.dimensions();
    let stops = [
        ColorStop::new(0.0, rgba(0, 0, 0, 0.0)),
        ColorStop::new(1.0, rgba(0, 0, 0, intensity)),
    ];
    let radius = w.max(h) as f32 / 2.0;
    paint_ramp(
        buffer,
        &stops,
        radial_offset(w as f32 / 2.0, h as f32 / 2.0, 0.0, radius),
    );
}

fn radial_offset(cx: f32, cy: f32, r0: f32, r1: f32) -> impl Fn(f32, f32) -> f32 + Sync {
    move |x, y| {
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        if (r1 - r0).abs() <= f32::EPSILON {
            if d >= r1 { 1.0 } else { 0.0 }
        } else {
            (d - r0) / (r1 - r0)
        }
    }
}

fn validate_stops(stops: &[ColorStop]) -> Result<(), RasterError> {
    if stops.is_empty() {
        return Err(RasterError::InvalidGradient("no colour stops".into()));
    }
    let mut prev = 0.0f32;
    for stop in stops {
        if !(0.0..=1.0).contains(&stop.offset) {
            return Err(RasterError::InvalidGradient(format!(
                "offset {} outside [0, 1]",
                stop.offset
            )));
        }
        if stop.offset < prev {
            return Err(RasterError::InvalidGradient(format!(
                "offset {} follows {prev}",
                stop.offset
            )));
        }
        prev = stop.offset;
    }
    Ok(())
}

/// Source-over every pixel with the ramp colour at `offset_at(px, py)`.
fn paint_ramp<F>(buffer: &mut RasterBuffer, stops: &[ColorStop], offset_at: F)
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    let width = buffer.width() as usize;
    if width == 0 {
        return;
    }
    buffer
        .as_raw_mut()
        .par_chunks_exact_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f32 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let color = sample(stops, offset_at(x as f32 + 0.5, py));
                let out = blend_pixel(
                    [px[0], px[1], px[2], px[3]],
                    color,
                    CompositeMode::SourceOver,
                    1.0,
                );
                px.copy_from_slice(&out);
            }
        });
}

/// Colour of the ramp at `t`. Beyond the first or last stop the end colour pads.
fn sample(stops: &[ColorStop], t: f32) -> [u8; 4] {
    let first = stops[0];
    let last = stops[stops.len() - 1];
    if t.is_nan() || t <= first.offset {
        return first.color.0;
    }
    if t >= last.offset {
        return last.color.0;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t < b.offset {
            let span = b.offset - a.offset;
            let k = if span <= f32::EPSILON { 1.0 } else { (t - a.offset) / span };
            let mut out = [0u8; 4];
            for (i, o) in out.iter_mut().enumerate() {
                let (ca, cb) = (f32::from(a.color[i]), f32::from(b.color[i]));
                *o = (ca + (cb - ca) * k).round().clamp(0.0, 255.0) as u8;
            }
            return out;
        }
    }
    last.color.0
}

// ============================================================================
// Shapes
// ============================================================================

/// Primitive shapes the logo pipeline can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    /// Flat-sided hexagon with its first vertex on the positive x axis.
    Hexagon,
}

impl Shape {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(Shape::Circle),
            "square" => Some(Shape::Square),
            "hexagon" => Some(Shape::Hexagon),
            _ => None,
        }
    }

    /// Radius of the largest circle inside the shape of half-size `half`.
    fn inscribed_radius(self, half: f32) -> f32 {
        match self {
            Shape::Circle | Shape::Square => half,
            Shape::Hexagon => half * (PI / 6.0).cos(),
        }
    }
}

/// Fill `shape` of bounding size `size` centred on `(cx, cy)`.
///
/// A shape whose inscribed circle already contains the whole buffer is
/// painted as a plain fill, so drawing cost never grows with `size`.
pub fn fill_shape(buffer: &mut RasterBuffer, shape: Shape, cx: f32, cy: f32, size: f32, color: Rgba<u8>) {
    if size.is_nan() || size <= 0.0 {
        return;
    }
    let half = size / 2.0;
    if shape.inscribed_radius(half) >= farthest_corner(buffer, cx, cy) + 1.0 {
        fill(buffer, color);
        return;
    }
    let img = buffer.image_mut();
    match shape {
        Shape::Circle => {
            draw_filled_circle_mut(img, (cx.round() as i32, cy.round() as i32), half.round() as i32, color);
        }
        Shape::Square => {
            let side = size.round() as u32;
            if side > 0 {
                let rect = Rect::at((cx - half).round() as i32, (cy - half).round() as i32).of_size(side, side);
                draw_filled_rect_mut(img, rect, color);
            }
        }
        Shape::Hexagon => {
            let mut points: Vec<Point<i32>> = hexagon(cx, cy, half)
                .into_iter()
                .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32))
                .collect();
            points.dedup();
            if points.len() >= 3 && points.first() != points.last() {
                draw_polygon_mut(img, &points, color);
            }
        }
    }
}

/// Stroke the outline of `shape`, `width` pixels wide and centred on the edge.
pub fn stroke_shape(
    buffer: &mut RasterBuffer,
    shape: Shape,
    cx: f32,
    cy: f32,
    size: f32,
    width: f32,
    color: Rgba<u8>,
) {
    if size.is_nan() || size <= 0.0 || width.is_nan() || width <= 0.0 {
        return;
    }
    let half = size / 2.0;
    let reach = width / 2.0;
    // outline runs wholly outside the buffer
    if shape.inscribed_radius(half) - reach >= farthest_corner(buffer, cx, cy) + 1.0 {
        return;
    }
    match shape {
        Shape::Circle => paint_where(buffer, cx, cy, half + reach, color, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            (d - half).abs() <= reach
        }),
        Shape::Square => {
            let corners = [
                (cx - half, cy - half),
                (cx + half, cy - half),
                (cx + half, cy + half),
                (cx - half, cy + half),
            ];
            stroke_polygon(buffer, &corners, cx, cy, half, reach, color);
        }
        Shape::Hexagon => {
            let vertices = hexagon(cx, cy, half);
            stroke_polygon(buffer, &vertices, cx, cy, half, reach, color);
        }
    }
}

/// Distance from `(cx, cy)` to the buffer corner furthest from it.
fn farthest_corner(buffer: &RasterBuffer, cx: f32, cy: f32) -> f32 {
    let (w, h) = buffer.dimensions();
    let dx = cx.abs().max((w as f32 - cx).abs());
    let dy = cy.abs().max((h as f32 - cy).abs());
    dx.hypot(dy)
}

fn hexagon(cx: f32, cy: f32, radius: f32) -> [(f32, f32); 6] {
    std::array::from_fn(|i| {
        let angle = PI / 3.0 * i as f32;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    })
}

fn stroke_polygon(
    buffer: &mut RasterBuffer,
    vertices: &[(f32, f32)],
    cx: f32,
    cy: f32,
    half: f32,
    reach: f32,
    color: Rgba<u8>,
) {
    paint_where(buffer, cx, cy, half * 2f32.sqrt() + reach, color, |x, y| {
        (0..vertices.len()).any(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            segment_distance((x, y), a, b) <= reach
        })
    });
}

/// Overwrite pixels within `extent` of `(cx, cy)` whose centre satisfies `hit`.
fn paint_where<F>(buffer: &mut RasterBuffer, cx: f32, cy: f32, extent: f32, color: Rgba<u8>, hit: F)
where
    F: Fn(f32, f32) -> bool,
{
    let (w, h) = buffer.dimensions();
    let clamp = |v: f32, max: u32| v.floor().clamp(0.0, max as f32) as u32;
    let (x0, x1) = (clamp(cx - extent - 1.0, w), clamp(cx + extent + 1.0, w));
    let (y0, y1) = (clamp(cy - extent - 1.0, h), clamp(cy + extent + 1.0, h));
    for y in y0..y1 {
        for x in x0..x1 {
            if hit(x as f32 + 0.5, y as f32 + 0.5) {
                buffer.put_pixel(x, y, color);
            }
        }
    }
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (qx, qy) = (a.0 + abx * t, a.1 + aby * t);
    ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn fill_then_clear() {
        let mut buf = RasterBuffer::new(3, 3);
        fill(&mut buf, RED);
        assert!(buf.image().pixels().all(|p| *p == RED));
        clear(&mut buf);
        assert_eq!(buf, RasterBuffer::new(3, 3));
    }

    #[test]
    fn linear_gradient_interpolates_and_pads() {
        let mut buf = RasterBuffer::new(10, 1);
        let stops = [ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)];
        linear_gradient(&mut buf, 0.0, 0.0, 10.0, 0.0, &stops).unwrap();
        let first = buf.pixel(0, 0);
        let last = buf.pixel(9, 0);
        assert!(first[0] > 240 && first[2] < 15);
        assert!(last[2] > 240 && last[0] < 15);
        assert_eq!(first[3], 255);

        // a line shorter than the buffer pads with the end stops
        let mut padded = RasterBuffer::new(10, 1);
        linear_gradient(&mut padded, 4.0, 0.0, 6.0, 0.0, &stops).unwrap();
        assert_eq!(padded.pixel(0, 0), RED);
        assert_eq!(padded.pixel(9, 0), BLUE);
    }

    #[test]
    fn gradient_rejects_decreasing_offsets() {
        let mut buf = RasterBuffer::new(2, 2);
        let stops = [ColorStop::new(0.6, RED), ColorStop::new(0.4, BLUE)];
        let err = linear_gradient(&mut buf, 0.0, 0.0, 2.0, 2.0, &stops).unwrap_err();
        assert!(matches!(err, RasterError::InvalidGradient(_)));
        // nothing painted on failure
        assert_eq!(buf, RasterBuffer::new(2, 2));
    }

    #[test]
    fn gradient_rejects_empty_and_out_of_range() {
        let mut buf = RasterBuffer::new(2, 2);
        assert!(linear_gradient(&mut buf, 0.0, 0.0, 1.0, 1.0, &[]).is_err());
        let stops = [ColorStop::new(1.5, RED)];
        assert!(radial_gradient(&mut buf, 1.0, 1.0, 0.0, 1.0, &stops).is_err());
    }

    #[test]
    fn gradient_equal_offsets_make_a_hard_edge() {
        let mut buf = RasterBuffer::new(4, 1);
        let stops = [
            ColorStop::new(0.0, RED),
            ColorStop::new(0.5, RED),
            ColorStop::new(0.5, BLUE),
            ColorStop::new(1.0, BLUE),
        ];
        linear_gradient(&mut buf, 0.0, 0.0, 4.0, 0.0, &stops).unwrap();
        assert_eq!(buf.pixel(1, 0), RED);
        assert_eq!(buf.pixel(2, 0), BLUE);
    }

    #[test]
    fn radial_gradient_centre_to_edge() {
        let mut buf = RasterBuffer::new(21, 21);
        let stops = [ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)];
        radial_gradient(&mut buf, 10.5, 10.5, 0.0, 10.0, &stops).unwrap();
        assert_eq!(buf.pixel(10, 10), RED);
        assert_eq!(buf.pixel(0, 0), BLUE);
    }

    #[test]
    fn vignette_leaves_centre_and_darkens_corners() {
        let mut buf = RasterBuffer::filled(20, 20, Rgba([200, 200, 200, 255]));
        vignette(&mut buf, 0.4);
        let centre = buf.pixel(10, 10);
        assert!(centre[0] >= 195, "centre {centre:?}");
        // corners lie beyond the ramp radius and get the full 0.4 black
        assert_eq!(buf.pixel(0, 0), Rgba([120, 120, 120, 255]));
    }

    #[test]
    fn shape_names() {
        assert_eq!(Shape::parse("hexagon"), Some(Shape::Hexagon));
        assert_eq!(Shape::parse("badge"), None);
    }

    #[test]
    fn filled_shapes_cover_their_centre_only() {
        for shape in [Shape::Circle, Shape::Square, Shape::Hexagon] {
            let mut buf = RasterBuffer::new(40, 40);
            fill_shape(&mut buf, shape, 20.0, 20.0, 20.0, RED);
            assert_eq!(buf.pixel(20, 20), RED, "{shape:?}");
            assert_eq!(buf.pixel(1, 1)[3], 0, "{shape:?}");
        }
    }

    #[test]
    fn stroke_rings_the_outline_not_the_centre() {
        for shape in [Shape::Circle, Shape::Square, Shape::Hexagon] {
            let mut buf = RasterBuffer::new(40, 40);
            stroke_shape(&mut buf, shape, 20.0, 20.0, 20.0, 4.0, BLUE);
            assert_eq!(buf.pixel(20, 20)[3], 0, "{shape:?}");
            // the right-hand edge of every shape passes through (30, 20)
            assert_eq!(buf.pixel(30, 20), BLUE, "{shape:?}");
        }
    }

    #[test]
    fn enormous_shapes_cover_the_buffer_without_an_outline() {
        for shape in [Shape::Circle, Shape::Square, Shape::Hexagon] {
            let mut buf = RasterBuffer::new(30, 20);
            fill_shape(&mut buf, shape, 15.0, 10.0, 1e9, RED);
            stroke_shape(&mut buf, shape, 15.0, 10.0, 1e9, 4.0, BLUE);
            assert_eq!(buf, RasterBuffer::filled(30, 20, RED), "{shape:?}");
        }
    }

    #[test]
    fn non_positive_size_draws_nothing() {
        let mut buf = RasterBuffer::new(10, 10);
        fill_shape(&mut buf, Shape::Square, 5.0, 5.0, -4.0, RED);
        stroke_shape(&mut buf, Shape::Circle, 5.0, 5.0, 0.0, 4.0, RED);
        assert_eq!(buf, RasterBuffer::new(10, 10));
    }
}
