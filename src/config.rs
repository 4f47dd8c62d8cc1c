//! Editor tunables: zoom limits, snapping, handle geometry, creation defaults.
//!
//! Every field has a default so a host may pass a partial JSON object (or
//! nothing at all). [`EditorConfig::from_json`] validates the result.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{HANDLE_SIZE, ROTATE_HANDLE_OFFSET, RULER_SIZE};

/// Error returned by [`EditorConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid editor config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("zoom range is empty: min {min} must be > 0 and < max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Lower zoom clamp.
    pub zoom_min: f64,
    /// Upper zoom clamp.
    pub zoom_max: f64,
    /// Fractional zoom change per wheel notch.
    pub zoom_step: f64,
    /// Zoom at startup.
    pub initial_zoom: f64,
    /// Snap tolerance in screen pixels; divided by zoom before use.
    pub snap_threshold_px: f64,
    /// Ruler thickness in canvas pixels.
    pub ruler_size: f64,
    /// Resize handle side length in local units.
    pub handle_size: f64,
    /// Rotation handle distance above the top edge in local units.
    pub rotate_handle_offset: f64,
    /// Smallest width/height a resize may produce, in world units.
    pub min_object_size: f64,
    /// Smallest font size a text resize may produce.
    pub min_font_size: f64,
    /// Offset applied to pasted copies on both axes.
    pub paste_offset: f64,
    /// Arrow-key nudge distance.
    pub nudge: f64,
    /// Arrow-key nudge distance with Shift held.
    pub nudge_large: f64,
    pub default_text: String,
    pub default_font_size: f64,
    pub default_font_family: String,
    pub default_rect_width: f64,
    pub default_rect_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 20.0,
            zoom_step: 0.1,
            initial_zoom: 0.5,
            snap_threshold_px: 10.0,
            ruler_size: RULER_SIZE,
            handle_size: HANDLE_SIZE,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET,
            min_object_size: 20.0,
            min_font_size: 10.0,
            paste_offset: 20.0,
            nudge: 1.0,
            nudge_large: 10.0,
            default_text: "Editable text".to_owned(),
            default_font_size: 48.0,
            default_font_family: "Arial".to_owned(),
            default_rect_width: 200.0,
            default_rect_height: 150.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config object and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the other
    /// variants for values that would break the camera or geometry math.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that the camera, snapping, and resize math rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom_min > 0.0 && self.zoom_min < self.zoom_max) {
            return Err(ConfigError::ZoomRange { min: self.zoom_min, max: self.zoom_max });
        }
        let positive = [
            ("zoomStep", self.zoom_step),
            ("initialZoom", self.initial_zoom),
            ("snapThresholdPx", self.snap_threshold_px),
            ("handleSize", self.handle_size),
            ("minObjectSize", self.min_object_size),
            ("minFontSize", self.min_font_size),
            ("defaultFontSize", self.default_font_size),
            ("defaultRectWidth", self.default_rect_width),
            ("defaultRectHeight", self.default_rect_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// Initial zoom clamped into the configured range. An inverted range
    /// settles on `zoom_max`.
    #[must_use]
    pub fn clamped_initial_zoom(&self) -> f64 {
        self.initial_zoom.max(self.zoom_min).min(self.zoom_max)
    }
}
