//! Chart configuration shared with the renderer.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Segment palette, applied in order.
    pub colors: Vec<String>,
    pub default_font: String,
    /// Labels whose selection also shows the preprocessor flow diagram.
    pub special_sections: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            colors: [
                "#333", "#ea3323", "#ff8b00", "#febb26", "#1eb253", "#017cf3", "#9c78fe",
                "#5f0bcb",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            default_font: "Roboto, sans-serif".into(),
            special_sections: [
                "Preprocessors",
                "Composition",
                "Conditional control",
                "ControlNet",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl ChartConfig {
    /// Parse a config JSON object. Blank input gives the defaults; missing
    /// keys fall back to their defaults individually.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        if json.trim().is_empty() {
            return Ok(ChartConfig::default());
        }
        serde_json::from_str(json).map_err(|e| {
            SheetError::config("P001", format!("Failed to parse chart config JSON: {}", e))
        })
    }

    pub fn is_special_section(&self, label: &str) -> bool {
        self.special_sections.iter().any(|s| s == label)
    }
}
