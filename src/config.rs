//! Run-time chart settings, loadable from a JSON file.
//!
//! ```json
//! { "title": "Woodwinds", "tiling": { "margin": 20.0 } }
//! ```
//!
//! Every field is optional; missing ones take their default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::renderer::constants::{A4, PX_PER_CM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub tiling: TilingConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Instrument Ranges".to_string(),
            tiling: TilingConfig::default(),
        }
    }
}

/// Page format for printing a chart on several sheets, in pixels at
/// 96 px per inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub min_overlap: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            page_width: A4.0,
            page_height: A4.1,
            margin: PX_PER_CM,
            min_overlap: 2.0 * PX_PER_CM,
        }
    }
}

impl TilingConfig {
    pub fn page(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded chart config from {}", path.display());
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ChartConfig::from_json(r#"{ "tiling": { "margin": 20.0 } }"#).unwrap();
        assert_eq!(config.title, "Instrument Ranges");
        assert_eq!(config.tiling.margin, 20.0);
        assert_eq!(config.tiling.page(), A4);
        assert_eq!(config.tiling.min_overlap, 2.0 * PX_PER_CM);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ChartConfig::from_json("{}").unwrap(), ChartConfig::default());
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            ChartConfig::from_json("{ \"title\": 3 }"),
            Err(ChartError::Config(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = ChartConfig::from_json_file("/nonexistent/chart.json").unwrap_err();
        assert!(matches!(err, ChartError::Io { .. }));
    }
}
