//! Editor configuration.

use crate::error::{EditorError, Result};
use crate::shapes::{FILL, STROKE, ShapeColor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default zoom step: each zoom-in doubles, each zoom-out halves.
pub const DEFAULT_SCALE_STEP: f64 = 0.5;

fn default_fill_color() -> ShapeColor {
    FILL
}

fn default_stroke_color() -> ShapeColor {
    STROKE
}

fn default_scale_step() -> f64 {
    DEFAULT_SCALE_STEP
}

/// Settings for one editing session.
///
/// Every field may be omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Initial pending fill color.
    #[serde(default = "default_fill_color")]
    pub default_fill_color: ShapeColor,
    /// Initial pending stroke color.
    #[serde(default = "default_stroke_color")]
    pub default_stroke_color: ShapeColor,
    /// Zoom factor step. Zero selects the default.
    #[serde(default = "default_scale_step")]
    pub scale_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_fill_color: FILL,
            default_stroke_color: STROKE,
            scale_step: DEFAULT_SCALE_STEP,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Check invariants, normalising a zero scale step to the default.
    pub fn validated(mut self) -> Result<Self> {
        if self.scale_step == 0.0 {
            self.scale_step = DEFAULT_SCALE_STEP;
        }
        if !self.scale_step.is_finite() || self.scale_step < 0.0 {
            return Err(EditorError::Config(format!(
                "scaleStep must be a positive number, got {}",
                self.scale_step
            )));
        }
        Ok(self)
    }

    /// Scale step safe to zoom with, whether or not the config was validated.
    ///
    /// Zero means the default. Negative or non-finite steps are replaced by
    /// the default with a warning.
    pub fn effective_scale_step(&self) -> f64 {
        let step = self.scale_step;
        if step.is_finite() && step > 0.0 {
            return step;
        }
        if step != 0.0 {
            log::warn!("Ignoring invalid scale step {}, using {}", step, DEFAULT_SCALE_STEP);
        }
        DEFAULT_SCALE_STEP
    }
}
