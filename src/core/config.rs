//! Configuration for the viewer's transform engine and gesture handling
//!
//! All tuning constants are supplied at construction through [`ViewConfig`];
//! nothing in the engine reads [`crate::core::constants`] directly.

use crate::core::constants::{
    BASE_MARKER_PX, CLICK_TOLERANCE_PX, MAX_SCALE, MIN_MARKER_PX, MIN_SCALE, ZOOM_SENSITIVITY,
    ZOOM_STEP,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Lower zoom bound, must be strictly positive
    pub min_scale: f64,
    /// Upper zoom bound
    pub max_scale: f64,
    /// Scale change per unit of wheel delta
    pub zoom_sensitivity: f64,
    /// Factor applied by the zoom in/out buttons
    pub zoom_step: f64,
    /// Marker size at scale 1.0
    pub base_marker_px: f64,
    /// Marker size floor at high zoom
    pub min_marker_px: f64,
    /// Pointer travel still classified as a click
    pub click_tolerance_px: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_step: ZOOM_STEP,
            base_marker_px: BASE_MARKER_PX,
            min_marker_px: MIN_MARKER_PX,
            click_tolerance_px: CLICK_TOLERANCE_PX,
        }
    }
}

impl ViewConfig {
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_zoom_sensitivity(mut self, sensitivity: f64) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    pub fn with_marker_sizes(mut self, base_px: f64, min_px: f64) -> Self {
        self.base_marker_px = base_px;
        self.min_marker_px = min_px;
        self
    }

    pub fn with_click_tolerance(mut self, tolerance_px: f64) -> Self {
        self.click_tolerance_px = tolerance_px;
        self
    }

    /// Checks the invariants the transform engine relies on.
    ///
    /// `min_scale` must be positive so the inverse transform never divides
    /// by zero, and every value must be finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("zoom_step", self.zoom_step),
            ("base_marker_px", self.base_marker_px),
            ("min_marker_px", self.min_marker_px),
            ("click_tolerance_px", self.click_tolerance_px),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MapError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min_scale <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(MapError::InvalidConfig(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(MapError::InvalidConfig(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if self.base_marker_px <= 0.0 || self.min_marker_px <= 0.0 {
            return Err(MapError::InvalidConfig(
                "marker sizes must be positive".to_string(),
            ));
        }
        if self.zoom_sensitivity < 0.0 || self.click_tolerance_px < 0.0 {
            return Err(MapError::InvalidConfig(
                "zoom_sensitivity and click_tolerance_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamps a requested scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
