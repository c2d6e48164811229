//! Raster primitives: every pixel operation the pipelines are built from.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Encode** | `image` PNG / JPEG / WebP / AVIF encoders |
//! | **Resample** | `image::imageops::resize` (triangle filter) |
//! | **Shape fills** | `imageproc::drawing` |
//! | **Label text** | `imageproc::drawing::draw_text_mut` + `ab_glyph` |
//! | **Filters, blends, gradients** | hand-written, `rayon` per-pixel loops |
//!
//! The module is split into:
//! - **Raster**: [`RasterBuffer`], the straight-alpha RGBA8 grid, and [`RasterError`]
//! - **Calculations**: pure dimension math (unit testable)
//! - **Parameters**: formats, colour stops, compositing modes, hex colours
//! - **Codec**: bytes in, bytes out
//! - **Adjust / Filters / Composite / Paint / Text**: the pixel operations

pub mod adjust;
pub mod calculations;
pub mod codec;
pub mod composite;
pub mod filters;
pub mod paint;
mod params;
mod raster;
pub mod text;

pub use adjust::{adjust_brightness, adjust_saturation};
pub use codec::{encode, load_image};
pub use composite::{composite, draw_at, draw_centered, draw_scaled};
pub use filters::{FilterOp, FilterParseError, apply_filter_stack, parse_filter_stack};
pub use paint::{Shape, clear, fill, linear_gradient, radial_gradient, vignette};
pub use params::{ColorStop, CompositeMode, OutputFormat, Quality, parse_hex, rgba};
pub use raster::{RasterBuffer, RasterError};
pub use text::{LabelFont, draw_label};
