//! Per-tool setting schemas, presets, and configuration resolution.
//!
//! Every tool has a [`ToolSchema`]: an ordered list of [`SettingDefinition`]s
//! and a list of named [`Preset`]s, one of which is the default. Resolving a
//! configuration is a pure function of `(tool, preset, overrides)`:
//!
//! ```text
//! setting defaults  ←  preset snapshot  ←  per-key overrides
//! ```
//!
//! ## Resolution Rules
//!
//! - An empty or unknown preset id resolves the tool's default preset.
//! - Holes in a preset are filled from the setting's own default.
//! - Overrides for keys the schema does not define are dropped.
//! - Overrides for known keys are taken as given: no clamping, no type
//!   coercion. Use [`SettingDefinition::check`] to validate beforehand.
//! - Switching preset starts from that preset's full snapshot; nothing from a
//!   previous resolution carries over.
//!
//! ## Generic Schema
//!
//! Tools without a dedicated schema share an eight-setting layout
//! (`intensity`, `style`, `quality`, `enhancement`, `color`, `detail`,
//! `effect`, `mode`) with five presets named after the tool's theme:
//! `<tool>-preset-1` ("Classic") through `<tool>-preset-5` ("Dramatic").

use crate::imaging::parse_hex;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("preset '{preset}' sets unknown setting '{setting}'")]
    UnknownSettingInPreset { preset: String, setting: String },
    #[error("slider '{setting}' has invalid bounds (min {min}, max {max}, step {step})")]
    InvalidSlider {
        setting: String,
        min: f64,
        max: f64,
        step: f64,
    },
    #[error("'{value}' is not an option of select '{setting}'")]
    OptionNotInList { setting: String, value: String },
    #[error("default preset '{0}' does not exist")]
    MissingDefaultPreset(String),
}

// ============================================================================
// Values
// ============================================================================

/// A concrete setting value.
///
/// Deserializes from plain JSON scalars. Whole numbers serialize without a
/// fractional part, so a resolved configuration round-trips to the same
/// object shape a front-end stores (`{"fontSize":60,"shape":"square"}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            SettingValue::Number(n) => serializer.serialize_f64(*n),
            SettingValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Number(n) => write!(f, "{n}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Number(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Number(f64::from(v))
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

/// Parse a `key=value` override.
///
/// `true`/`false` become booleans, anything that parses as a finite number
/// becomes a number, everything else is text.
pub fn parse_override(s: &str) -> Result<(String, SettingValue), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    let raw = raw.trim();
    let value = match raw {
        "true" => SettingValue::Bool(true),
        "false" => SettingValue::Bool(false),
        _ => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => SettingValue::Number(n),
            _ => SettingValue::Text(raw.to_string()),
        },
    };
    Ok((key.to_string(), value))
}

// ============================================================================
// Definitions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// What kind of control a setting is, with its default and bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Slider {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Select {
        default: String,
        options: Vec<SelectOption>,
    },
    Toggle {
        default: bool,
    },
    Text {
        default: String,
    },
    Color {
        default: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDefinition {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: SettingKind,
}

impl SettingDefinition {
    pub fn default_value(&self) -> SettingValue {
        match &self.kind {
            SettingKind::Slider { default, .. } => SettingValue::Number(*default),
            SettingKind::Select { default, .. }
            | SettingKind::Text { default }
            | SettingKind::Color { default } => SettingValue::Text(default.clone()),
            SettingKind::Toggle { default } => SettingValue::Bool(*default),
        }
    }

    /// Whether `value` has the right type and lies within this setting's
    /// bounds or options.
    pub fn check(&self, value: &SettingValue) -> bool {
        match (&self.kind, value) {
            (SettingKind::Slider { min, max, .. }, SettingValue::Number(n)) => {
                (*min..=*max).contains(n)
            }
            (SettingKind::Select { options, .. }, SettingValue::Text(s)) => {
                options.iter().any(|o| &o.value == s)
            }
            (SettingKind::Toggle { .. }, SettingValue::Bool(_)) => true,
            (SettingKind::Text { .. }, SettingValue::Text(_)) => true,
            (SettingKind::Color { .. }, SettingValue::Text(s)) => parse_hex(s).is_some(),
            _ => false,
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        match &self.kind {
            SettingKind::Slider { min, max, step, .. } => {
                if !(min <= max && *step > 0.0) {
                    return Err(SchemaError::InvalidSlider {
                        setting: self.id.clone(),
                        min: *min,
                        max: *max,
                        step: *step,
                    });
                }
            }
            SettingKind::Select { default, .. } => {
                if !self.check(&SettingValue::Text(default.clone())) {
                    return Err(SchemaError::OptionNotInList {
                        setting: self.id.clone(),
                        value: default.clone(),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// A named, complete settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub values: BTreeMap<String, SettingValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub settings: Vec<SettingDefinition>,
    pub presets: Vec<Preset>,
    pub default_preset: String,
}

impl ToolSchema {
    pub fn setting(&self, id: &str) -> Option<&SettingDefinition> {
        self.settings.iter().find(|s| s.id == id)
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Check the structural invariants: slider bounds, select membership of
    /// defaults and preset values, preset keys, and the default preset.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for setting in &self.settings {
            setting.validate()?;
        }
        for preset in &self.presets {
            for (key, value) in &preset.values {
                let Some(def) = self.setting(key) else {
                    return Err(SchemaError::UnknownSettingInPreset {
                        preset: preset.id.clone(),
                        setting: key.clone(),
                    });
                };
                if matches!(def.kind, SettingKind::Select { .. }) && !def.check(value) {
                    return Err(SchemaError::OptionNotInList {
                        setting: key.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
        if self.preset(&self.default_preset).is_none() {
            return Err(SchemaError::MissingDefaultPreset(self.default_preset.clone()));
        }
        Ok(())
    }

    fn resolve(&self, preset_id: &str, overrides: &BTreeMap<String, SettingValue>) -> ResolvedConfig {
        let preset = self.preset(preset_id).or_else(|| {
            if !preset_id.is_empty() {
                tracing::debug!(preset = preset_id, "unknown preset, using default");
            }
            self.preset(&self.default_preset)
        });

        let mut values = BTreeMap::new();
        for setting in &self.settings {
            let value = preset
                .and_then(|p| p.values.get(&setting.id))
                .cloned()
                .unwrap_or_else(|| setting.default_value());
            values.insert(setting.id.clone(), value);
        }
        for (key, value) in overrides {
            if self.setting(key).is_some() {
                values.insert(key.clone(), value.clone());
            }
        }
        ResolvedConfig { values }
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// The parameter object handed to a pipeline. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: BTreeMap<String, SettingValue>,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Numeric value of `key`, if present and a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for ResolvedConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ============================================================================
// Schema book
// ============================================================================

/// All tool schemas, keyed by tool id.
#[derive(Debug, Default)]
pub struct SchemaBook {
    schemas: HashMap<String, ToolSchema>,
}

static BUILTIN: LazyLock<Arc<SchemaBook>> = LazyLock::new(|| Arc::new(SchemaBook::builtin_book()));

impl SchemaBook {
    /// The shared book of built-in schemas.
    pub fn builtin() -> Arc<SchemaBook> {
        Arc::clone(&BUILTIN)
    }

    pub fn insert(&mut self, tool_id: impl Into<String>, schema: ToolSchema) {
        self.schemas.insert(tool_id.into(), schema);
    }

    pub fn schema_for(&self, tool_id: &str) -> Option<&ToolSchema> {
        self.schemas.get(tool_id)
    }

    /// The default preset gap-filled from setting defaults. Empty for an
    /// unknown tool.
    pub fn defaults_for(&self, tool_id: &str) -> ResolvedConfig {
        self.resolve(tool_id, "", &BTreeMap::new())
    }

    /// Resolve `preset_id` (or the default preset) and apply `overrides`.
    pub fn resolve(
        &self,
        tool_id: &str,
        preset_id: &str,
        overrides: &BTreeMap<String, SettingValue>,
    ) -> ResolvedConfig {
        match self.schema_for(tool_id) {
            Some(schema) => schema.resolve(preset_id, overrides),
            None => ResolvedConfig::default(),
        }
    }

    /// Validate every schema, returning the first failure with its tool id.
    pub fn validate(&self) -> Result<(), (String, SchemaError)> {
        let mut ids: Vec<&String> = self.schemas.keys().collect();
        ids.sort();
        for id in ids {
            self.schemas[id].validate().map_err(|e| (id.clone(), e))?;
        }
        Ok(())
    }

    fn builtin_book() -> Self {
        let mut book = SchemaBook::default();
        book.insert("logo-maker", logo_maker());
        book.insert("mockup-creator", mockup_creator());
        book.insert("mini-world-generator", mini_world_generator());
        book.insert("background-removal", background_removal());
        book.insert("ai-retouch", ai_retouch());
        for (tool_id, theme) in GENERIC_TOOLS {
            book.insert(*tool_id, generic_schema(tool_id, theme));
        }
        book
    }
}

// ============================================================================
// Built-in schemas
// ============================================================================

fn slider(id: &str, label: &str, default: f64, min: f64, max: f64, step: f64) -> SettingDefinition {
    SettingDefinition {
        id: id.into(),
        label: label.into(),
        kind: SettingKind::Slider { default, min, max, step },
    }
}

fn select(id: &str, label: &str, default: &str, options: &[(&str, &str)]) -> SettingDefinition {
    SettingDefinition {
        id: id.into(),
        label: label.into(),
        kind: SettingKind::Select {
            default: default.into(),
            options: options
                .iter()
                .map(|(value, label)| SelectOption {
                    value: (*value).into(),
                    label: (*label).into(),
                })
                .collect(),
        },
    }
}

fn toggle(id: &str, label: &str, default: bool) -> SettingDefinition {
    SettingDefinition {
        id: id.into(),
        label: label.into(),
        kind: SettingKind::Toggle { default },
    }
}

fn color(id: &str, label: &str, default: &str) -> SettingDefinition {
    SettingDefinition {
        id: id.into(),
        label: label.into(),
        kind: SettingKind::Color { default: default.into() },
    }
}

fn preset(id: &str, name: &str, description: &str, values: Vec<(&str, SettingValue)>) -> Preset {
    Preset {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        values: values.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    }
}

macro_rules! values {
    ($($key:literal : $value:expr),* $(,)?) => {
        vec![$(($key, SettingValue::from($value))),*]
    };
}

fn logo_maker() -> ToolSchema {
    ToolSchema {
        default_preset: "modern-minimal".into(),
        presets: vec![
            preset("modern-minimal", "Modern Minimal", "Clean, contemporary design with simple shapes",
                values!{"style": "minimal", "complexity": 30, "colorScheme": "monochrome", "fontSize": 48, "spacing": 20, "shape": "circle", "gradient": false, "shadow": false}),
            preset("bold-geometric", "Bold Geometric", "Strong geometric shapes with vibrant colors",
                values!{"style": "geometric", "complexity": 70, "colorScheme": "vibrant", "fontSize": 56, "spacing": 15, "shape": "square", "gradient": true, "shadow": true}),
            preset("elegant-script", "Elegant Script", "Sophisticated typography with flowing elements",
                values!{"style": "script", "complexity": 50, "colorScheme": "elegant", "fontSize": 52, "spacing": 25, "shape": "custom", "gradient": false, "shadow": false}),
            preset("tech-futuristic", "Tech Futuristic", "Modern tech aesthetic with digital elements",
                values!{"style": "tech", "complexity": 80, "colorScheme": "neon", "fontSize": 44, "spacing": 10, "shape": "hexagon", "gradient": true, "shadow": true}),
            preset("vintage-retro", "Vintage Retro", "Classic retro style with nostalgic appeal",
                values!{"style": "retro", "complexity": 60, "colorScheme": "vintage", "fontSize": 50, "spacing": 18, "shape": "badge", "gradient": false, "shadow": true}),
        ],
        settings: vec![
            select("style", "Logo Style", "minimal", &[
                ("minimal", "Minimal"), ("geometric", "Geometric"), ("script", "Script"), ("tech", "Tech"), ("retro", "Retro"),
            ]),
            slider("complexity", "Design Complexity", 50.0, 0.0, 100.0, 5.0),
            select("colorScheme", "Color Scheme", "monochrome", &[
                ("monochrome", "Monochrome"), ("vibrant", "Vibrant"), ("elegant", "Elegant"), ("neon", "Neon"), ("vintage", "Vintage"),
            ]),
            slider("fontSize", "Text Size", 48.0, 24.0, 72.0, 2.0),
            slider("spacing", "Element Spacing", 20.0, 0.0, 50.0, 5.0),
            select("shape", "Primary Shape", "circle", &[
                ("circle", "Circle"), ("square", "Square"), ("hexagon", "Hexagon"), ("badge", "Badge"), ("custom", "Custom"),
            ]),
            toggle("gradient", "Use Gradient", false),
            toggle("shadow", "Add Shadow", false),
        ],
    }
}

fn mockup_creator() -> ToolSchema {
    ToolSchema {
        default_preset: "phone-mockup".into(),
        presets: vec![
            preset("phone-mockup", "Phone Mockup", "Display on modern smartphone screen",
                values!{"device": "phone", "angle": 0, "background": "gradient", "reflection": true, "shadow": true, "scale": 100, "rotation": 0, "perspective": 50}),
            preset("laptop-mockup", "Laptop Mockup", "Professional laptop display",
                values!{"device": "laptop", "angle": 15, "background": "solid", "reflection": false, "shadow": true, "scale": 90, "rotation": 0, "perspective": 60}),
            preset("tablet-mockup", "Tablet Mockup", "Tablet device presentation",
                values!{"device": "tablet", "angle": 10, "background": "image", "reflection": true, "shadow": true, "scale": 95, "rotation": 0, "perspective": 45}),
            preset("billboard-mockup", "Billboard Mockup", "Large outdoor billboard display",
                values!{"device": "billboard", "angle": 5, "background": "scene", "reflection": false, "shadow": false, "scale": 100, "rotation": 0, "perspective": 70}),
            preset("product-box", "Product Box", "3D product packaging mockup",
                values!{"device": "box", "angle": 25, "background": "studio", "reflection": true, "shadow": true, "scale": 85, "rotation": 15, "perspective": 80}),
        ],
        settings: vec![
            select("device", "Device Type", "phone", &[
                ("phone", "Phone"), ("laptop", "Laptop"), ("tablet", "Tablet"), ("billboard", "Billboard"), ("box", "Product Box"),
            ]),
            slider("angle", "View Angle", 0.0, -45.0, 45.0, 5.0),
            select("background", "Background Style", "gradient", &[
                ("gradient", "Gradient"), ("solid", "Solid Color"), ("image", "Image"), ("scene", "Scene"), ("studio", "Studio"),
            ]),
            toggle("reflection", "Show Reflection", true),
            toggle("shadow", "Add Shadow", true),
            slider("scale", "Device Scale", 100.0, 50.0, 150.0, 5.0),
            slider("rotation", "Rotation", 0.0, -180.0, 180.0, 15.0),
            slider("perspective", "Perspective Depth", 50.0, 0.0, 100.0, 10.0),
        ],
    }
}

fn mini_world_generator() -> ToolSchema {
    ToolSchema {
        default_preset: "tilt-shift-city".into(),
        presets: vec![
            preset("tilt-shift-city", "Tilt-Shift City", "Miniature city with toy-like appearance",
                values!{"effect": "tilt-shift", "saturation": 150, "blur": 80, "vignette": true, "contrast": 120, "brightness": 110, "scale": "tiny", "focus": "center"}),
            preset("miniature-landscape", "Miniature Landscape", "Tiny world landscape effect",
                values!{"effect": "miniature", "saturation": 140, "blur": 70, "vignette": false, "contrast": 110, "brightness": 105, "scale": "small", "focus": "top"}),
            preset("toy-world", "Toy World", "Playful toy-like world",
                values!{"effect": "toy", "saturation": 180, "blur": 90, "vignette": true, "contrast": 130, "brightness": 115, "scale": "micro", "focus": "center"}),
            preset("diorama-scene", "Diorama Scene", "Model diorama appearance",
                values!{"effect": "diorama", "saturation": 130, "blur": 60, "vignette": false, "contrast": 115, "brightness": 100, "scale": "small", "focus": "bottom"}),
            preset("fantasy-miniature", "Fantasy Miniature", "Magical miniature world",
                values!{"effect": "fantasy", "saturation": 160, "blur": 75, "vignette": true, "contrast": 125, "brightness": 120, "scale": "tiny", "focus": "center"}),
        ],
        settings: vec![
            select("effect", "Effect Type", "tilt-shift", &[
                ("tilt-shift", "Tilt-Shift"), ("miniature", "Miniature"), ("toy", "Toy"), ("diorama", "Diorama"), ("fantasy", "Fantasy"),
            ]),
            slider("saturation", "Color Saturation", 150.0, 100.0, 200.0, 10.0),
            slider("blur", "Blur Intensity", 80.0, 0.0, 100.0, 5.0),
            toggle("vignette", "Add Vignette", true),
            slider("contrast", "Contrast", 120.0, 80.0, 150.0, 5.0),
            slider("brightness", "Brightness", 110.0, 80.0, 140.0, 5.0),
            select("scale", "World Scale", "tiny", &[("micro", "Micro"), ("tiny", "Tiny"), ("small", "Small")]),
            select("focus", "Focus Area", "center", &[("top", "Top"), ("center", "Center"), ("bottom", "Bottom")]),
        ],
    }
}

fn background_removal() -> ToolSchema {
    ToolSchema {
        default_preset: "clean-removal".into(),
        presets: vec![
            preset("clean-removal", "Clean Removal", "Simple background removal with transparency",
                values!{"mode": "remove", "edge": "smooth", "feather": 2, "tolerance": 50, "newBackground": "transparent", "blur": 0, "color": "#ffffff", "pattern": "none"}),
            preset("white-background", "White Background", "Replace with clean white background",
                values!{"mode": "replace", "edge": "sharp", "feather": 1, "tolerance": 60, "newBackground": "solid", "blur": 0, "color": "#ffffff", "pattern": "none"}),
            preset("gradient-background", "Gradient Background", "Replace with smooth gradient",
                values!{"mode": "replace", "edge": "smooth", "feather": 3, "tolerance": 55, "newBackground": "gradient", "blur": 0, "color": "#4f46e5", "pattern": "none"}),
            preset("blur-background", "Blur Background", "Keep background but blur it",
                values!{"mode": "blur", "edge": "soft", "feather": 4, "tolerance": 45, "newBackground": "blur", "blur": 80, "color": "#000000", "pattern": "none"}),
            preset("studio-background", "Studio Background", "Professional studio backdrop",
                values!{"mode": "replace", "edge": "smooth", "feather": 2, "tolerance": 50, "newBackground": "pattern", "blur": 0, "color": "#1f2937", "pattern": "studio"}),
        ],
        settings: vec![
            select("mode", "Removal Mode", "remove", &[("remove", "Remove"), ("replace", "Replace"), ("blur", "Blur")]),
            select("edge", "Edge Quality", "smooth", &[("sharp", "Sharp"), ("smooth", "Smooth"), ("soft", "Soft")]),
            slider("feather", "Edge Feather", 2.0, 0.0, 10.0, 1.0),
            slider("tolerance", "Detection Tolerance", 50.0, 0.0, 100.0, 5.0),
            select("newBackground", "New Background", "transparent", &[
                ("transparent", "Transparent"), ("solid", "Solid Color"), ("gradient", "Gradient"), ("blur", "Blurred"), ("pattern", "Pattern"),
            ]),
            slider("blur", "Background Blur", 0.0, 0.0, 100.0, 5.0),
            color("color", "Background Color", "#ffffff"),
            select("pattern", "Pattern Style", "none", &[("none", "None"), ("studio", "Studio"), ("texture", "Texture")]),
        ],
    }
}

fn ai_retouch() -> ToolSchema {
    ToolSchema {
        default_preset: "natural-enhancement".into(),
        presets: vec![
            preset("natural-enhancement", "Natural Enhancement", "Subtle improvements maintaining natural look",
                values!{"smoothing": 30, "blemishRemoval": 70, "eyeEnhancement": 40, "teethWhitening": 20, "skinTone": 10, "sharpness": 15, "glow": 20, "warmth": 5}),
            preset("glamour-retouch", "Glamour Retouch", "Professional glamour photography style",
                values!{"smoothing": 60, "blemishRemoval": 90, "eyeEnhancement": 70, "teethWhitening": 50, "skinTone": 30, "sharpness": 25, "glow": 50, "warmth": 15}),
            preset("magazine-quality", "Magazine Quality", "High-end magazine editorial look",
                values!{"smoothing": 50, "blemishRemoval": 85, "eyeEnhancement": 60, "teethWhitening": 40, "skinTone": 25, "sharpness": 30, "glow": 40, "warmth": 10}),
            preset("subtle-touch", "Subtle Touch", "Minimal retouching for authentic feel",
                values!{"smoothing": 20, "blemishRemoval": 50, "eyeEnhancement": 30, "teethWhitening": 15, "skinTone": 5, "sharpness": 10, "glow": 15, "warmth": 0}),
            preset("beauty-portrait", "Beauty Portrait", "Enhanced beauty portrait style",
                values!{"smoothing": 70, "blemishRemoval": 95, "eyeEnhancement": 80, "teethWhitening": 60, "skinTone": 40, "sharpness": 20, "glow": 60, "warmth": 20}),
        ],
        settings: vec![
            slider("smoothing", "Skin Smoothing", 30.0, 0.0, 100.0, 5.0),
            slider("blemishRemoval", "Blemish Removal", 70.0, 0.0, 100.0, 5.0),
            slider("eyeEnhancement", "Eye Enhancement", 40.0, 0.0, 100.0, 5.0),
            slider("teethWhitening", "Teeth Whitening", 20.0, 0.0, 100.0, 5.0),
            slider("skinTone", "Skin Tone Even", 10.0, 0.0, 100.0, 5.0),
            slider("sharpness", "Detail Sharpness", 15.0, 0.0, 100.0, 5.0),
            slider("glow", "Skin Glow", 20.0, 0.0, 100.0, 5.0),
            slider("warmth", "Warmth", 5.0, -50.0, 50.0, 5.0),
        ],
    }
}

/// Tools that share the generic schema, with the theme their presets are named after.
const GENERIC_TOOLS: &[(&str, &str)] = &[
    ("product-photographer", "Product"),
    ("sketch-pencil-art", "Sketch"),
    ("wedding-prewedding-editor", "Wedding"),
    ("id-photo-booth", "ID Photo"),
    ("architectural-design-visualizer", "Architecture"),
    ("maternity-photo-editor", "Maternity"),
    ("big-head-caricature-generator", "Caricature"),
    ("infographic-poster-creator", "Infographic"),
    ("photo-restoration", "Restoration"),
    ("fashion-model-generator", "Fashion"),
    ("banner-design", "Banner"),
    ("baby-kids-photo-editor", "Kids"),
    ("religious-event-photo-editor", "Religious"),
    ("graduation-photo-editor", "Graduation"),
    ("age-transformation-filter", "Age"),
    ("magic-eraser", "Eraser"),
    ("collage-maker", "Collage"),
    ("filter-usia-age-filter", "Age Filter"),
    ("barbershop-stylist", "Hairstyle"),
    ("outpainting", "Outpaint"),
    ("pov-hand-creator", "POV Hand"),
];

fn generic_schema(tool_id: &str, theme: &str) -> ToolSchema {
    let p = |n: u32, name: &str, description: String, values| {
        preset(&format!("{tool_id}-preset-{n}"), &format!("{theme} {name}"), &description, values)
    };
    ToolSchema {
        default_preset: format!("{tool_id}-preset-1"),
        presets: vec![
            p(1, "Classic", format!("Traditional {theme} style"),
                values!{"intensity": 50, "style": "classic", "quality": 80, "enhancement": 40, "color": 100, "detail": 60, "effect": "standard", "mode": "balanced"}),
            p(2, "Modern", format!("Contemporary {theme} approach"),
                values!{"intensity": 70, "style": "modern", "quality": 90, "enhancement": 60, "color": 120, "detail": 70, "effect": "enhanced", "mode": "creative"}),
            p(3, "Artistic", format!("Artistic {theme} interpretation"),
                values!{"intensity": 80, "style": "artistic", "quality": 85, "enhancement": 70, "color": 140, "detail": 80, "effect": "artistic", "mode": "expressive"}),
            p(4, "Subtle", format!("Gentle {theme} effect"),
                values!{"intensity": 30, "style": "subtle", "quality": 75, "enhancement": 30, "color": 90, "detail": 50, "effect": "light", "mode": "natural"}),
            p(5, "Dramatic", format!("Bold {theme} impact"),
                values!{"intensity": 90, "style": "dramatic", "quality": 95, "enhancement": 85, "color": 150, "detail": 90, "effect": "intense", "mode": "bold"}),
        ],
        settings: vec![
            slider("intensity", "Effect Intensity", 50.0, 0.0, 100.0, 5.0),
            select("style", "Style Type", "classic", &[
                ("classic", "Classic"), ("modern", "Modern"), ("artistic", "Artistic"), ("subtle", "Subtle"), ("dramatic", "Dramatic"),
            ]),
            slider("quality", "Output Quality", 80.0, 50.0, 100.0, 5.0),
            slider("enhancement", "Enhancement Level", 40.0, 0.0, 100.0, 5.0),
            slider("color", "Color Intensity", 100.0, 50.0, 200.0, 10.0),
            slider("detail", "Detail Preservation", 60.0, 0.0, 100.0, 5.0),
            select("effect", "Effect Mode", "standard", &[
                ("light", "Light"), ("standard", "Standard"), ("enhanced", "Enhanced"), ("artistic", "Artistic"), ("intense", "Intense"),
            ]),
            select("mode", "Processing Mode", "balanced", &[
                ("natural", "Natural"), ("balanced", "Balanced"), ("creative", "Creative"), ("expressive", "Expressive"), ("bold", "Bold"),
            ]),
        ],
    }
}
