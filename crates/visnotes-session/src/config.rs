//! Editor settings

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::manager::DEFAULT_MAX_HISTORY;

/// Tunables for an editor session. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Undo entries kept before the oldest is dropped
    pub max_history: usize,
    /// Resize handle hit radius in canvas units
    pub handle_hit_radius: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Freehand stroke defaults
    pub drawing: DrawingConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            handle_hit_radius: visnotes_core::HANDLE_HIT_RADIUS,
            min_zoom: 0.1,
            max_zoom: 5.0,
            drawing: DrawingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawingConfig {
    pub color: String,
    pub stroke_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            stroke_width: 3.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfig =
            serde_json::from_str(json).context("Failed to parse editor config")?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize editor config")
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            bail!("maxHistory must be at least 1");
        }
        if !(self.handle_hit_radius > 0.0 && self.handle_hit_radius.is_finite()) {
            bail!("handleHitRadius must be positive, got {}", self.handle_hit_radius);
        }
        if !(self.min_zoom > 0.0 && self.min_zoom.is_finite() && self.max_zoom.is_finite()) {
            bail!("zoom limits must be positive and finite");
        }
        if self.min_zoom > self.max_zoom {
            bail!(
                "minZoom ({}) is greater than maxZoom ({})",
                self.min_zoom,
                self.max_zoom
            );
        }
        if self.drawing.stroke_width < 0.0 {
            bail!("drawing.strokeWidth must not be negative");
        }
        Ok(())
    }
}
