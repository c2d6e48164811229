//! End-to-end scenarios through the public API: resolve a configuration,
//! run the engine on encoded bytes, inspect the decoded output.
//!
//! Run with: cargo test --test pipeline_scenarios

use image::Rgba;
use rasterkit::config::{self, EngineConfig};
use rasterkit::imaging::{OutputFormat, Quality, RasterBuffer, encode, load_image};
use rasterkit::pipeline::Engine;
use rasterkit::project::ProjectDraft;
use rasterkit::registry::ToolRegistry;
use rasterkit::settings::{ResolvedConfig, SchemaBook, SettingValue};
use std::collections::BTreeMap;
use tempfile::TempDir;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

fn engine() -> Engine {
    Engine::with_tables(
        ToolRegistry::builtin(),
        SchemaBook::builtin(),
        EngineConfig::default(),
        None,
    )
}

fn png(buffer: &RasterBuffer) -> Vec<u8> {
    encode(buffer, OutputFormat::Png, Quality::default()).unwrap()
}

fn overrides(pairs: &[(&str, SettingValue)]) -> BTreeMap<String, SettingValue> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn photo(width: u32, height: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (60 + (x * 140) / width) as u8;
            let g = (60 + (y * 140) / height) as u8;
            buf.put_pixel(x, y, Rgba([r, g, 120, 255]));
        }
    }
    buf
}

// =========================================================================
// Dispatch
// =========================================================================

#[test]
fn background_replace_over_white() {
    let input = RasterBuffer::from_pixels(2, 2, &[WHITE, BLACK, GRAY, GRAY]).unwrap();
    let cfg = SchemaBook::builtin().resolve(
        "background-removal",
        "",
        &overrides(&[("newBackground", "solid".into()), ("color", "#ffffff".into())]),
    );

    let result = engine()
        .process("background-removal", Some(&png(&input)), &cfg)
        .unwrap();
    let out = load_image(&result.encoded).unwrap();

    assert_eq!(out.pixel(0, 0), Rgba([255, 255, 255, 155]));
    assert_eq!(out.pixel(1, 0), Rgba([100, 100, 100, 155]));
    assert_eq!(out.pixel(0, 1), GRAY);
    assert_eq!(out.pixel(1, 1), GRAY);
}

#[test]
fn outpainting_grows_by_half() {
    let e = engine();
    let cfg = ResolvedConfig::default();
    for (w, h) in [(10, 10), (33, 17), (2, 3)] {
        let result = e.process("outpainting", Some(&png(&photo(w, h))), &cfg).unwrap();
        assert_eq!(result.buffer.dimensions(), ((w * 3) / 2, (h * 3) / 2), "{w}x{h}");
    }
}

#[test]
fn unknown_tool_runs_generic_enhancement() {
    let e = engine();
    let input = png(&photo(12, 12));
    let cfg: ResolvedConfig = [("intensity", 100.0), ("enhancement", 40.0), ("color", 100.0)]
        .into_iter()
        .collect();

    let unknown = e.process("unknown-tool-id", Some(&input), &cfg).unwrap();
    let generic = e.process("collage-maker", Some(&input), &cfg).unwrap();
    assert_eq!(unknown.buffer, generic.buffer);
    assert_ne!(unknown.buffer, photo(12, 12));
}

#[test]
fn no_input_renders_generated_canvases() {
    let e = engine();
    let book = SchemaBook::builtin();

    let logo = e
        .process("logo-maker", None, &book.defaults_for("logo-maker"))
        .unwrap();
    assert_eq!(logo.buffer.dimensions(), (800, 800));

    let placeholder = e
        .process("banner-design", None, &book.defaults_for("banner-design"))
        .unwrap();
    assert_eq!(placeholder.buffer.dimensions(), (1200, 800));
    let corner = placeholder.buffer.pixel(0, 0);
    assert_eq!(corner, Rgba([0x1f, 0x29, 0x37, 255]));
}

#[test]
fn every_registered_tool_processes_an_input() {
    let e = engine();
    let book = SchemaBook::builtin();
    let input = png(&photo(8, 6));
    for tool in e.registry().all() {
        let cfg = book.defaults_for(tool.id);
        let result = e.process(tool.id, Some(&input), &cfg);
        assert!(result.is_ok(), "{}: {:?}", tool.id, result.err());
    }
}

#[test]
fn processing_is_deterministic() {
    let e = engine();
    let cfg = SchemaBook::builtin().defaults_for("mini-world-generator");
    let input = png(&photo(20, 20));
    let a = e.process("mini-world-generator", Some(&input), &cfg).unwrap();
    let b = e.process("mini-world-generator", Some(&input), &cfg).unwrap();
    assert_eq!(a.encoded, b.encoded);
    assert_eq!(a.content_digest(), b.content_digest());
}

// =========================================================================
// Settings through the engine
// =========================================================================

#[test]
fn logo_preset_with_override() {
    let cfg = SchemaBook::builtin().resolve(
        "logo-maker",
        "bold-geometric",
        &overrides(&[("fontSize", 60.into())]),
    );
    assert_eq!(cfg.number("fontSize"), Some(60.0));
    assert_eq!(cfg.text("shape"), Some("square"));
    assert_eq!(cfg.flag("gradient"), Some(true));
    assert_eq!(cfg.number("spacing"), Some(15.0));

    let result = engine().process("logo-maker", None, &cfg).unwrap();
    // square of side 185 centred at 400: amber inside
    assert_eq!(result.buffer.pixel(400, 400), Rgba([0xf5, 0x9e, 0x0b, 255]));
}

#[test]
fn out_of_range_override_passes_through() {
    let cfg = SchemaBook::builtin().resolve(
        "sketch-pencil-art",
        "",
        &overrides(&[("intensity", 500.into())]),
    );
    assert_eq!(cfg.number("intensity"), Some(500.0));
    assert!(engine().process("sketch-pencil-art", Some(&png(&photo(4, 4))), &cfg).is_ok());
}

// =========================================================================
// Config file + hand-off
// =========================================================================

#[test]
fn config_file_changes_format_and_canvas() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(config::CONFIG_FILE_NAME),
        "[output]\nformat = \"webp\"\n\n[generation]\nplaceholder_width = 64\nplaceholder_height = 32\n",
    )
    .unwrap();
    let cfg = config::load_config(tmp.path()).unwrap();
    let e = Engine::with_tables(ToolRegistry::builtin(), SchemaBook::builtin(), cfg, None);

    let result = e.process("sketch-pencil-art", None, &ResolvedConfig::default()).unwrap();
    assert_eq!(result.format, OutputFormat::Webp);
    assert!(result.data_url().starts_with("data:image/webp;base64,"));
    assert_eq!(load_image(&result.encoded).unwrap().dimensions(), (64, 32));
}

#[test]
fn project_draft_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let e = engine();
    let cfg = SchemaBook::builtin().resolve("ai-retouch", "natural-enhancement", &BTreeMap::new());
    let result = e.process("ai-retouch", Some(&png(&photo(6, 6))), &cfg).unwrap();
    let tool = e.registry().by_id("ai-retouch").unwrap();

    let draft = ProjectDraft::new(tool, "natural-enhancement", &cfg, Some("face.jpg"), &result, "2026-10-17").unwrap();
    let path = tmp.path().join("project.json");
    std::fs::write(&path, draft.to_json().unwrap()).unwrap();

    let back: ProjectDraft = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, draft);
    assert_eq!(back.output_assets[0].asset_id, result.content_digest());
    let stored: ResolvedConfig = serde_json::from_str(&back.configuration).unwrap();
    assert_eq!(stored, cfg);
}
