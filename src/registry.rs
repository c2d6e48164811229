//! The tool registry: every tool the engine knows, keyed by id.
//!
//! The table is built once and never mutated. Lookup order and category
//! listings follow registration order, which is also the order tools are
//! presented in.
//!
//! ## Input Modes
//!
//! | Mode | Meaning |
//! |------|---------|
//! | `generation` | Starts from a blank canvas; an upload is optional |
//! | `edit` | Needs an input image |
//! | `hybrid` | Works either way |

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Navigation group a tool is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    CreateDesign,
    PhotoEffects,
    PortraitPeople,
    EditingTools,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::CreateDesign,
        Category::PhotoEffects,
        Category::PortraitPeople,
        Category::EditingTools,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::CreateDesign => "Create & Design",
            Category::PhotoEffects => "Photo Effects",
            Category::PortraitPeople => "Portrait & People",
            Category::EditingTools => "Editing Tools",
        }
    }

    /// Match a label or a loose spelling of it ("photo effects", "photo-effects").
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL.into_iter().find(|c| {
            let label: String = c
                .label()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            label == key
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Generation,
    Edit,
    Hybrid,
}

impl InputMode {
    pub fn requires_input(self) -> bool {
        self == InputMode::Edit
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputMode::Generation => "generation",
            InputMode::Edit => "edit",
            InputMode::Hybrid => "hybrid",
        })
    }
}

/// Immutable metadata for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub icon: &'static str,
    pub input_mode: InputMode,
    pub route: String,
    pub description: &'static str,
}

/// Read-only lookup table over [`ToolDescriptor`]s.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

static BUILTIN: LazyLock<Arc<ToolRegistry>> =
    LazyLock::new(|| Arc::new(ToolRegistry::from_descriptors(builtin_descriptors())));

impl ToolRegistry {
    /// The shared table of built-in tools.
    pub fn builtin() -> Arc<ToolRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Build a registry from descriptors. A repeated id keeps its first entry.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> Self {
        let mut tools = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::with_capacity(descriptors.len());
        for d in descriptors {
            if index.contains_key(d.id) {
                continue;
            }
            index.insert(d.id, tools.len());
            tools.push(d);
        }
        Self { tools, index }
    }

    pub fn by_id(&self, id: &str) -> Option<&ToolDescriptor> {
        self.index.get(id).map(|&i| &self.tools[i])
    }

    /// Tools in `category`, in registration order.
    pub fn by_category(&self, category: Category) -> Vec<&ToolDescriptor> {
        self.tools.iter().filter(|t| t.category == category).collect()
    }

    /// Categories that have at least one tool, in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for t in &self.tools {
            if !seen.contains(&t.category) {
                seen.push(t.category);
            }
        }
        seen
    }

    pub fn all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn tool(
    id: &'static str,
    name: &'static str,
    category: Category,
    icon: &'static str,
    input_mode: InputMode,
    description: &'static str,
) -> ToolDescriptor {
    ToolDescriptor {
        id,
        name,
        category,
        icon,
        input_mode,
        route: format!("/tools/{id}"),
        description,
    }
}

fn builtin_descriptors() -> Vec<ToolDescriptor> {
    use Category::*;
    use InputMode::*;
    vec![
        // Create & Design
        tool("logo-maker", "Logo Maker", CreateDesign, "Sparkles", Generation,
            "Create professional logos by selecting a style preset and customizing design elements. Start from a blank canvas and adjust complexity, colors, shapes, and typography."),
        tool("mockup-creator", "Mockup Creator", CreateDesign, "Box", Hybrid,
            "Place your designs on realistic device and product mockups. Upload your design image, select a device type, and adjust viewing angles and backgrounds."),
        tool("pov-hand-creator", "POV Hand Creator", CreateDesign, "Hand", Hybrid,
            "Add first-person perspective hands to your scenes. Upload a background image or start blank, then adjust positioning and perspective to create POV shots."),
        tool("infographic-poster-creator", "Infographic & Poster Creator", CreateDesign, "BarChart3", Generation,
            "Design engaging infographics and posters. Start from a blank canvas or upload elements, then apply preset layouts and color schemes."),
        tool("banner-design", "Banner Design", CreateDesign, "Layout", Generation,
            "Create eye-catching banners for web and social media. Start from a blank canvas and use preset layouts, text, graphics, and backgrounds."),
        tool("fashion-model-generator", "Fashion Model Generator", CreateDesign, "User", Generation,
            "Generate fashion model poses and clothing visualizations. Start from blank or upload fashion items and adjust styling."),
        tool("architectural-design-visualizer", "Architectural Design Visualizer", CreateDesign, "Building2", Edit,
            "Visualize architectural designs and interior concepts. Upload sketches or photos and apply rendering, lighting, and material adjustments."),
        tool("collage-maker", "Collage Maker", CreateDesign, "Grid3x3", Edit,
            "Create photo collages with preset layouts, adjustable spacing, borders, and backgrounds."),
        // Photo Effects
        tool("mini-world-generator", "Mini World Generator", PhotoEffects, "Globe", Edit,
            "Transform photos into miniature world scenes with tilt-shift effects: blur gradients, enhanced saturation, and a vignette for a toy-like appearance."),
        tool("sketch-pencil-art", "Sketch & Pencil Art", PhotoEffects, "Pencil", Edit,
            "Convert photos into pencil sketches using grayscale conversion, high contrast, and inversion."),
        tool("outpainting", "Outpainting", PhotoEffects, "Maximize2", Edit,
            "Extend images beyond their original boundaries. The canvas grows by half on each axis and a blurred copy blends the new area with the original."),
        tool("product-photographer", "Product Photographer", PhotoEffects, "Camera", Edit,
            "Create professional product photos by applying lighting and color adjustments that simulate a studio setup."),
        tool("photo-restoration", "Photo Restoration", PhotoEffects, "ImagePlus", Edit,
            "Restore old and faded photos with color correction and contrast recovery."),
        // Portrait & People
        tool("ai-retouch", "AI Retouch", PortraitPeople, "Wand2", Edit,
            "Enhance portraits with smoothing, glow, and tone adjustments while blending back original detail."),
        tool("barbershop-stylist", "Barbershop Stylist", PortraitPeople, "Scissors", Edit,
            "Try different hairstyle looks on portrait photos with preset color and contrast treatments."),
        tool("wedding-prewedding-editor", "Wedding & Prewedding Editor", PortraitPeople, "Heart", Edit,
            "Enhance wedding and prewedding photos with soft color grading and lighting adjustments for a romantic aesthetic."),
        tool("id-photo-booth", "ID Photo Booth", PortraitPeople, "IdCard", Edit,
            "Prepare portraits for official documents with clean, even color and contrast."),
        tool("maternity-photo-editor", "Maternity Photo Editor", PortraitPeople, "Sparkle", Edit,
            "Enhance maternity photography with soft lighting and warm color adjustments."),
        tool("big-head-caricature-generator", "Big Head Caricature", PortraitPeople, "Smile", Edit,
            "Create playful caricature looks from portraits with bold color treatments."),
        tool("baby-kids-photo-editor", "Baby & Kids Photo Editor", PortraitPeople, "Baby", Edit,
            "Enhance photos of babies and children with soft filters and color enhancements."),
        tool("religious-event-photo-editor", "Religious Event Photo Editor", PortraitPeople, "Church", Edit,
            "Enhance photos from religious ceremonies with respectful color grading and lighting adjustments."),
        tool("graduation-photo-editor", "Graduation Photo Editor", PortraitPeople, "GraduationCap", Edit,
            "Perfect graduation photos with color correction and formal portrait adjustments."),
        tool("age-transformation-filter", "Age Transformation", PortraitPeople, "Clock", Edit,
            "Apply aging or de-aging looks to portraits through tone and texture adjustments."),
        tool("filter-usia-age-filter", "Filter Usia (Age Filter)", PortraitPeople, "Timer", Edit,
            "Apply age-range looks to portraits to preview different life stages."),
        // Editing Tools
        tool("background-removal", "Background Removal", EditingTools, "Trash2", Edit,
            "Remove or replace image backgrounds. Very bright and very dark areas are treated as background and made partly transparent, then optionally placed over a solid color or gradient."),
        tool("magic-eraser", "Magic Eraser", EditingTools, "Eraser", Edit,
            "Soften unwanted details with a uniform blur over the whole image."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_26_unique_tools() {
        let reg = ToolRegistry::builtin();
        assert_eq!(reg.len(), 26);
        for t in reg.all() {
            assert_eq!(reg.by_id(t.id), Some(t));
            assert_eq!(t.route, format!("/tools/{}", t.id));
        }
    }

    #[test]
    fn by_id_unknown_is_none() {
        assert!(ToolRegistry::builtin().by_id("unknown-tool-id").is_none());
    }

    #[test]
    fn by_category_keeps_registration_order() {
        let reg = ToolRegistry::builtin();
        let ids: Vec<&str> = reg
            .by_category(Category::EditingTools)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["background-removal", "magic-eraser"]);
    }

    #[test]
    fn categories_are_ordered_and_complete() {
        assert_eq!(ToolRegistry::builtin().categories(), Category::ALL.to_vec());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let reg = ToolRegistry::from_descriptors(vec![
            tool("a", "First", Category::PhotoEffects, "Box", InputMode::Edit, ""),
            tool("a", "Second", Category::EditingTools, "Box", InputMode::Edit, ""),
        ]);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.by_id("a").map(|t| t.name), Some("First"));
    }

    #[test]
    fn category_parse_is_loose() {
        assert_eq!(Category::parse("photo-effects"), Some(Category::PhotoEffects));
        assert_eq!(Category::parse("Create & Design"), Some(Category::CreateDesign));
        assert_eq!(Category::parse("nope"), None);
    }

    #[test]
    fn logo_is_generation_and_edit_tools_need_input() {
        let reg = ToolRegistry::builtin();
        assert_eq!(reg.by_id("logo-maker").map(|t| t.input_mode), Some(InputMode::Generation));
        assert!(InputMode::Edit.requires_input());
        assert!(!InputMode::Hybrid.requires_input());
    }
}
