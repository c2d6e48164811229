//! CLI output formatting.
//!
//! Every command has a `format_*` function that returns lines (pure, no I/O)
//! and a `print_*` wrapper that writes them to stdout. Entities print as a
//! header line with a 1-based, zero-padded index, followed by indented
//! context lines.
//!
//! ## Tools
//!
//! ```text
//! Create & Design
//! 001 Logo Maker (logo-maker)
//!     Mode: generation
//!     Create professional logos by selecting a style preset and customizing de...
//! ```
//!
//! ## Presets
//!
//! ```text
//! Logo Maker (logo-maker)
//! Presets
//! 001 Modern Minimal (modern-minimal) [default]
//!     Clean, contemporary design with simple shapes
//! 002 Bold Geometric (bold-geometric)
//!     Strong geometric shapes with vibrant colors
//! Settings
//! 001 Logo Style (style)
//!     select: minimal | geometric | script | tech | retro, default minimal
//! 002 Design Complexity (complexity)
//!     slider: 0 to 100 step 5, default 50
//! ```
//!
//! ## Process
//!
//! ```text
//! Logo Maker → logo.png
//!     Source: (generated)
//!     Output: 800x800 png, <bytes> bytes
//!     Digest: <sha-256 of the encoded bytes, hex>
//! ```

use crate::pipeline::ProcessingResult;
use crate::registry::{Category, ToolDescriptor, ToolRegistry};
use crate::settings::{SettingDefinition, SettingKind, ToolSchema};
use std::path::Path;

const DESCRIPTION_WIDTH: usize = 72;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Name (id)`
fn entity_header(index: usize, name: &str, id: &str) -> String {
    format!("{} {} ({})", format_index(index), name, id)
}

/// Truncate to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Whole numbers print without a fractional part.
fn number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn describe_kind(setting: &SettingDefinition) -> String {
    match &setting.kind {
        SettingKind::Slider {
            default,
            min,
            max,
            step,
        } => format!(
            "slider: {} to {} step {}, default {}",
            number(*min),
            number(*max),
            number(*step),
            number(*default)
        ),
        SettingKind::Select { default, options } => {
            let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
            format!("select: {}, default {}", values.join(" | "), default)
        }
        SettingKind::Toggle { default } => format!("toggle, default {}", default),
        SettingKind::Text { default } => format!("text, default \"{}\"", default),
        SettingKind::Color { default } => format!("color, default {}", default),
    }
}

// ============================================================================
// tools
// ============================================================================

/// Registry listing grouped by category, optionally limited to one.
pub fn format_tools(registry: &ToolRegistry, only: Option<Category>) -> Vec<String> {
    let mut lines = Vec::new();
    let categories = registry
        .categories()
        .into_iter()
        .filter(|c| only.is_none_or(|o| o == *c));
    for (i, category) in categories.enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(category.label().to_string());
        for (pos, tool) in registry.by_category(category).into_iter().enumerate() {
            lines.push(entity_header(pos + 1, tool.name, tool.id));
            lines.push(format!("{}Mode: {}", indent(1), tool.input_mode));
            if !tool.description.is_empty() {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    truncate_desc(tool.description, DESCRIPTION_WIDTH)
                ));
            }
        }
    }
    lines
}

pub fn print_tools(registry: &ToolRegistry, only: Option<Category>) {
    for line in format_tools(registry, only) {
        println!("{}", line);
    }
}

// ============================================================================
// presets
// ============================================================================

/// Presets and settings of one tool. Tools without a schema list neither.
pub fn format_presets(tool: &ToolDescriptor, schema: Option<&ToolSchema>) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", tool.name, tool.id)];
    let Some(schema) = schema else {
        lines.push(format!("{}No configurable settings", indent(1)));
        return lines;
    };

    lines.push("Presets".to_string());
    for (pos, preset) in schema.presets.iter().enumerate() {
        let mut header = entity_header(pos + 1, &preset.name, &preset.id);
        if preset.id == schema.default_preset {
            header.push_str(" [default]");
        }
        lines.push(header);
        if !preset.description.is_empty() {
            lines.push(format!("{}{}", indent(1), preset.description));
        }
    }

    lines.push("Settings".to_string());
    for (pos, setting) in schema.settings.iter().enumerate() {
        lines.push(entity_header(pos + 1, &setting.label, &setting.id));
        lines.push(format!("{}{}", indent(1), describe_kind(setting)));
    }
    lines
}

pub fn print_presets(tool: &ToolDescriptor, schema: Option<&ToolSchema>) {
    for line in format_presets(tool, schema) {
        println!("{}", line);
    }
}

// ============================================================================
// process
// ============================================================================

/// Summary of one processed image and where it was written.
pub fn format_process_output(
    tool: &ToolDescriptor,
    input: Option<&Path>,
    result: &ProcessingResult,
    output: &Path,
    project: Option<&Path>,
) -> Vec<String> {
    let (w, h) = result.buffer.dimensions();
    let source = input
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(generated)".to_string());
    let mut lines = vec![
        format!("{} → {}", tool.name, output.display()),
        format!("{}Source: {}", indent(1), source),
        format!(
            "{}Output: {}x{} {}, {} bytes",
            indent(1),
            w,
            h,
            result.format,
            result.encoded.len()
        ),
        format!("{}Digest: {}", indent(1), result.content_digest()),
    ];
    if let Some(project) = project {
        lines.push(format!("{}Project: {}", indent(1), project.display()));
    }
    lines
}

pub fn print_process_output(
    tool: &ToolDescriptor,
    input: Option<&Path>,
    result: &ProcessingResult,
    output: &Path,
    project: Option<&Path>,
) {
    for line in format_process_output(tool, input, result, output, project) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
