//! Image Configuration

use serde::{Deserialize, Serialize};
use simg_canvas::Smoothing;
use simg_codec::ExportFormat;

/// Options shared by every surface an image creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter used when content is drawn at a different size
    pub smoothing: Smoothing,

    /// Format produced by `to_data_url`
    pub export: ExportFormat,

    /// Largest accepted width or height, in pixels
    pub max_dimension: u32,
}

impl Config {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::default(),
            export: ExportFormat::default(),
            max_dimension: 16_384,
        }
    }
}
