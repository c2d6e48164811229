//! # rasterkit
//!
//! A catalogue of image tools, each a fixed sequence of raster operations
//! driven by presets and user-tunable settings. A tool takes an optional
//! input image and returns one encoded output image.
//!
//! # Architecture: Resolve, Dispatch, Render
//!
//! ```text
//! 1. Resolve   tool + preset + overrides  →  ResolvedConfig     (settings)
//! 2. Dispatch  tool id                    →  ToolFamily          (pipeline)
//! 3. Render    input + typed params       →  RasterBuffer → bytes (pipeline::edit / generate)
//! ```
//!
//! Every stage is a pure function of its inputs. Registries and schemas are
//! built once and shared by `Arc`, and each call owns its buffers, so a single
//! [`pipeline::Engine`] can serve concurrent requests without locking.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | The 26 tools: id, name, category, input mode, route |
//! | [`settings`] | Setting definitions, presets, and resolution into a `ResolvedConfig` |
//! | [`pipeline`] | `Engine`: decode, dispatch by `ToolFamily`, render, encode |
//! | [`imaging`] | Raster primitives: filters, compositing, gradients, shapes, text, codecs |
//! | [`config`] | `rasterkit.toml` loading, merging over stock defaults, validation |
//! | [`project`] | Persistence hand-off record and download file names |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Parametric Effects, Not Models
//!
//! Background removal is a brightness threshold, magic eraser is a blur,
//! outpainting is a blurred enlargement. These are deliberate stand-ins and
//! are kept at exactly that fidelity: results are deterministic and cheap,
//! and the tests can assert exact pixels.
//!
//! ## Closed Dispatch
//!
//! Tool ids map onto a closed [`pipeline::ToolFamily`] enum. Anything without
//! a specialised pipeline, including ids the registry does not know, runs the
//! generic enhancement pipeline instead of failing.
//!
//! ## Permissive Overrides
//!
//! Presets are complete snapshots, gap-filled from setting defaults. User
//! overrides replace values key by key and are not clamped; out-of-range
//! values flow through to the pipelines. Front-ends that want validation use
//! [`settings::SettingDefinition::check`].
//!
//! ## Straight Alpha Everywhere
//!
//! Buffers store straight RGBA8. Only the Gaussian blur premultiplies, and
//! only for the duration of the pass, so transparent edges do not bleed dark.

pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod registry;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;
