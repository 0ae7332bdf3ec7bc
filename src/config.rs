use serde::Deserialize;

use crate::constants;
use crate::error::{PickerError, PickerResult};

/// Sizing knobs for the picker, in layout pixels.
///
/// Every field is optional when deserializing; missing fields take the
/// values from [`crate::constants`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Outer radius divided by ring thickness.
    pub thickness_ratio: f64,
    pub padding: f64,
    pub slider_thumb_radius: f64,
    pub sat_val_thumb_radius: f64,
    pub mirror_thumb_radius: f64,
    /// The frame's height/width ratio is clamped to this range.
    pub min_aspect: f64,
    pub max_aspect: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            thickness_ratio: constants::RING_THICKNESS_RATIO,
            padding: constants::PADDING,
            slider_thumb_radius: constants::SLIDER_THUMB_RADIUS,
            sat_val_thumb_radius: constants::SAT_VAL_THUMB_RADIUS,
            mirror_thumb_radius: constants::MIRROR_THUMB_RADIUS,
            min_aspect: constants::MIN_ASPECT,
            max_aspect: constants::MAX_ASPECT,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> PickerResult<()> {
        if !(self.thickness_ratio.is_finite() && self.thickness_ratio > 1.0) {
            return Err(PickerError::InvalidConfig("thickness_ratio must be greater than 1"));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(PickerError::InvalidConfig("padding must be non-negative"));
        }
        let radii = [
            self.slider_thumb_radius,
            self.sat_val_thumb_radius,
            self.mirror_thumb_radius,
        ];
        if radii.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(PickerError::InvalidConfig("thumb radii must be positive"));
        }
        // The panel below the ring needs height, so the frame must be taller than wide.
        if !(self.min_aspect > 1.0
            && self.min_aspect <= self.max_aspect
            && self.max_aspect.is_finite())
        {
            return Err(PickerError::InvalidConfig(
                "aspect bounds must satisfy 1 < min_aspect <= max_aspect",
            ));
        }
        Ok(())
    }
}
