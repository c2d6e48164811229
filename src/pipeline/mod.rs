//! Tool dispatch: from a tool id, optional input bytes and a resolved
//! configuration to an encoded output.
//!
//! ```text
//! process(tool, bytes?, config)
//!   ├─ no input ─┬─ logo-maker → generate::logo
//!   │            └─ otherwise  → generate::placeholder
//!   └─ input ──── decode → ToolFamily::for_tool → edit::* → encode
//! ```
//!
//! The [`Engine`] owns only immutable tables behind `Arc` plus the engine
//! configuration and label font, so one engine can serve concurrent calls.
//! Every call works on its own buffers.

pub mod edit;
pub mod generate;

use crate::config::EngineConfig;
use crate::imaging::{LabelFont, OutputFormat, RasterBuffer, RasterError, encode, load_image};
use crate::registry::ToolRegistry;
use crate::settings::{ResolvedConfig, SchemaBook};
use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub use edit::{
    Background, BackgroundParams, EnhanceParams, MiniWorldParams, RetouchParams, SketchParams,
};
pub use generate::LogoParams;

const LOGO_TOOL: &str = "logo-maker";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Which edit pipeline a tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    BackgroundReplace,
    Sketch,
    MiniWorld,
    Retouch,
    Outpainting,
    MagicEraser,
    /// Saturate/contrast/brightness enhancement shared by every other tool.
    Generic,
}

impl ToolFamily {
    pub fn for_tool(id: &str) -> Self {
        match id {
            "background-removal" => ToolFamily::BackgroundReplace,
            "sketch-pencil-art" => ToolFamily::Sketch,
            "mini-world-generator" => ToolFamily::MiniWorld,
            "ai-retouch" => ToolFamily::Retouch,
            "outpainting" => ToolFamily::Outpainting,
            "magic-eraser" => ToolFamily::MagicEraser,
            _ => ToolFamily::Generic,
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolFamily::BackgroundReplace => "background-replace",
            ToolFamily::Sketch => "sketch",
            ToolFamily::MiniWorld => "mini-world",
            ToolFamily::Retouch => "retouch",
            ToolFamily::Outpainting => "outpainting",
            ToolFamily::MagicEraser => "magic-eraser",
            ToolFamily::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Output of one [`Engine::process`] call.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub encoded: Vec<u8>,
    pub format: OutputFormat,
    pub buffer: RasterBuffer,
}

impl ProcessingResult {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:<mime>;base64,<payload>`, ready for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            general_purpose::STANDARD.encode(&self.encoded)
        )
    }

    /// SHA-256 of the encoded bytes, lowercase hex.
    pub fn content_digest(&self) -> String {
        format!("{:x}", Sha256::digest(&self.encoded))
    }
}

pub struct Engine {
    registry: Arc<ToolRegistry>,
    schemas: Arc<SchemaBook>,
    config: EngineConfig,
    font: Option<LabelFont>,
}

impl Engine {
    /// Engine over the built-in tables. Looks up the label font once.
    pub fn new(config: EngineConfig) -> Self {
        let font = LabelFont::discover(config.fonts.label.as_deref());
        Self::with_tables(ToolRegistry::builtin(), SchemaBook::builtin(), config, font)
    }

    pub fn with_tables(
        registry: Arc<ToolRegistry>,
        schemas: Arc<SchemaBook>,
        config: EngineConfig,
        font: Option<LabelFont>,
    ) -> Self {
        Self {
            registry,
            schemas,
            config,
            font,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn schemas(&self) -> &SchemaBook {
        &self.schemas
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Family for a registered tool.
    pub fn family(&self, tool_id: &str) -> Result<ToolFamily, ProcessError> {
        match self.registry.by_id(tool_id) {
            Some(_) => Ok(ToolFamily::for_tool(tool_id)),
            None => Err(ProcessError::UnknownTool(tool_id.to_string())),
        }
    }

    /// Run `tool_id` and encode the result in the configured output format.
    #[tracing::instrument(skip(self, input, config), fields(has_input = input.is_some()))]
    pub fn process(
        &self,
        tool_id: &str,
        input: Option<&[u8]>,
        config: &ResolvedConfig,
    ) -> Result<ProcessingResult, ProcessError> {
        self.process_as(tool_id, input, config, self.config.output.format)
    }

    /// [`Engine::process`] with an explicit output format.
    pub fn process_as(
        &self,
        tool_id: &str,
        input: Option<&[u8]>,
        config: &ResolvedConfig,
        format: OutputFormat,
    ) -> Result<ProcessingResult, ProcessError> {
        let decoded = input.map(load_image).transpose()?;
        let buffer = self.render(tool_id, decoded.as_ref(), config)?;
        let encoded = encode(&buffer, format, self.config.quality())?;
        tracing::info!(
            tool = tool_id,
            width = buffer.width(),
            height = buffer.height(),
            bytes = encoded.len(),
            %format,
            "processed"
        );
        Ok(ProcessingResult {
            encoded,
            format,
            buffer,
        })
    }

    /// Produce the output raster without encoding it.
    pub fn render(
        &self,
        tool_id: &str,
        input: Option<&RasterBuffer>,
        config: &ResolvedConfig,
    ) -> Result<RasterBuffer, ProcessError> {
        let generation = &self.config.generation;
        let font = self.font.as_ref();
        let Some(input) = input else {
            let out = if tool_id == LOGO_TOOL {
                generate::logo(&LogoParams::from_config(config), generation, font)?
            } else {
                generate::placeholder(generation, font)?
            };
            return Ok(out);
        };

        let family = self.family(tool_id).unwrap_or_else(|err| {
            tracing::debug!("{err}, using generic pipeline");
            ToolFamily::Generic
        });
        tracing::debug!(%family, "dispatch");

        let out = match family {
            ToolFamily::BackgroundReplace => {
                edit::background_replace(input, &BackgroundParams::from_config(config))?
            }
            ToolFamily::Sketch => edit::sketch(input, &SketchParams::from_config(config))?,
            ToolFamily::MiniWorld => edit::mini_world(input, &MiniWorldParams::from_config(config))?,
            ToolFamily::Retouch => edit::retouch(input, &RetouchParams::from_config(config))?,
            ToolFamily::Outpainting => edit::outpaint(input)?,
            ToolFamily::MagicEraser => edit::magic_eraser(input)?,
            ToolFamily::Generic => edit::enhance(input, &EnhanceParams::from_config(config))?,
        };
        Ok(out)
    }
}
