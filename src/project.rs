//! Hand-off record for saving a processed result as a project.
//!
//! The engine never talks to a store. It builds a [`ProjectDraft`] that a
//! front-end can post as-is; field names serialize in camelCase.
//!
//! ```json
//! {
//!   "projectName": "Logo Maker - 2026-10-17",
//!   "toolType": "logo-maker",
//!   "preset": "bold-geometric",
//!   "configuration": "{\"fontSize\":60,...}",
//!   "inputAssets": [],
//!   "outputAssets": [{ "assetId": "<sha256>", "assetType": "image", "description": "Generated output" }]
//! }
//! ```

use crate::pipeline::ProcessingResult;
use crate::registry::ToolDescriptor;
use crate::settings::ResolvedConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    pub asset_id: String,
    pub asset_type: String,
    pub description: String,
}

impl AssetMetadata {
    fn image(asset_id: impl Into<String>, description: &str) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_type: "image".to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub project_name: String,
    pub tool_type: String,
    pub preset: String,
    /// The resolved configuration as a JSON object string.
    pub configuration: String,
    pub input_assets: Vec<AssetMetadata>,
    pub output_assets: Vec<AssetMetadata>,
}

impl ProjectDraft {
    /// Draft for `result`, named `"<tool name> - <date>"`.
    ///
    /// `input_name` is the uploaded file's name, if there was one; the output
    /// asset is identified by the digest of its encoded bytes.
    pub fn new(
        tool: &ToolDescriptor,
        preset: &str,
        config: &ResolvedConfig,
        input_name: Option<&str>,
        result: &ProcessingResult,
        date: &str,
    ) -> Result<Self, ProjectError> {
        Ok(Self {
            project_name: format!("{} - {}", tool.name, date),
            tool_type: tool.id.to_string(),
            preset: preset.to_string(),
            configuration: config.to_json()?,
            input_assets: input_name
                .map(|name| AssetMetadata::image(name, "Input image"))
                .into_iter()
                .collect(),
            output_assets: vec![AssetMetadata::image(
                result.content_digest(),
                "Generated output",
            )],
        })
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// File name offered when a result is downloaded.
pub fn download_file_name(tool_id: &str, millis: i64) -> String {
    format!("{tool_id}-{millis}.png")
}
