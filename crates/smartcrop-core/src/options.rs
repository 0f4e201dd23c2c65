//! Analysis options: detector thresholds, scoring weights and the candidate
//! search grid.

use crate::error::CropError;
use serde::{Deserialize, Serialize};

/// Filter type for the prescale resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Immutable configuration for one analysis run.
///
/// An options value is validated once, when a
/// [`SmartCropper`](crate::cropper::SmartCropper) is built from it; analysis
/// itself never re-checks individual fields. The defaults are the
/// conventionally tuned values for photographic input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Weight of the detail component in the total score.
    pub detail_weight: f32,

    /// Reference skin color as an (approximately) unit-length RGB direction.
    pub skin_color: [f32; 3],
    /// Added to the detail factor when weighting skin contributions.
    pub skin_bias: f32,
    /// Lower bound of the skin brightness band, in [0, 1].
    pub skin_brightness_min: f32,
    /// Upper bound of the skin brightness band, in [0, 1].
    pub skin_brightness_max: f32,
    /// Minimum hue similarity for a pixel to count as skin, in [0, 1).
    pub skin_threshold: f32,
    /// Weight of the skin component in the total score.
    pub skin_weight: f32,

    /// Lower bound of the saturation brightness band, in [0, 1].
    pub saturation_brightness_min: f32,
    /// Upper bound of the saturation brightness band, in [0, 1].
    pub saturation_brightness_max: f32,
    /// Minimum HSL saturation for a pixel to count as saturated, in [0, 1).
    pub saturation_threshold: f32,
    /// Added to the detail factor when weighting saturation contributions.
    pub saturation_bias: f32,
    /// Weight of the saturation component in the total score.
    pub saturation_weight: f32,

    /// Weight of the user-boost component in the total score.
    pub boost_weight: f32,

    /// Block-reduction factor applied to the analysis buffer before scoring.
    pub score_downsample: u32,
    /// Grid step, in pixels, between candidate positions.
    pub search_step: u32,
    /// Decrement between candidate scales.
    pub scale_step: f32,
    /// Smallest candidate scale.
    pub min_scale: f32,
    /// Largest candidate scale.
    pub max_scale: f32,

    /// Width of the border band, as a fraction of the folded crop
    /// coordinate, within which the edge term falls off.
    pub edge_radius: f32,
    /// Weight of the border-band importance term; only positive values
    /// enable the term, and it is disabled by default.
    pub edge_weight: f32,
    /// Importance assigned to every point outside a candidate, typically
    /// negative.
    pub outside_importance: f32,
    /// Weight of the rule-of-thirds importance term; only positive values
    /// enable the term.
    pub rule_of_thirds_weight: f32,

    /// Downscale large images before analysis.
    pub prescale: bool,
    /// Target for the larger image dimension when prescaling.
    pub prescale_size: u32,
    /// Interpolation used by the prescale resize.
    pub prescale_filter: FilterType,

    /// Attach a rendering of the feature channels to the result.
    pub debug: bool,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            detail_weight: 0.2,
            skin_color: [0.78, 0.57, 0.44],
            skin_bias: 0.01,
            skin_brightness_min: 0.2,
            skin_brightness_max: 1.0,
            skin_threshold: 0.4,
            skin_weight: 1.8,
            saturation_brightness_min: 0.05,
            saturation_brightness_max: 0.9,
            saturation_threshold: 0.4,
            saturation_bias: 0.2,
            saturation_weight: 0.1,
            boost_weight: 100.0,
            score_downsample: 8,
            search_step: 8,
            scale_step: 0.1,
            min_scale: 0.8,
            max_scale: 1.0,
            edge_radius: 0.4,
            edge_weight: 0.0,
            outside_importance: -0.5,
            rule_of_thirds_weight: 5.0,
            prescale: true,
            prescale_size: 256,
            prescale_filter: FilterType::Bilinear,
            debug: false,
        }
    }
}

impl CropOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field against its domain.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidParameter`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), CropError> {
        for (name, value) in [
            ("detail_weight", self.detail_weight),
            ("skin_bias", self.skin_bias),
            ("skin_weight", self.skin_weight),
            ("saturation_bias", self.saturation_bias),
            ("saturation_weight", self.saturation_weight),
            ("boost_weight", self.boost_weight),
            ("edge_weight", self.edge_weight),
            ("outside_importance", self.outside_importance),
            ("rule_of_thirds_weight", self.rule_of_thirds_weight),
        ] {
            if !value.is_finite() {
                return Err(CropError::invalid(format!("{} must be finite", name)));
            }
        }

        for (name, value) in [
            ("skin_color red", self.skin_color[0]),
            ("skin_color green", self.skin_color[1]),
            ("skin_color blue", self.skin_color[2]),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CropError::invalid(format!("{} must be in [0, 1]", name)));
            }
        }

        for (name, value) in [
            ("skin_threshold", self.skin_threshold),
            ("saturation_threshold", self.saturation_threshold),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(CropError::invalid(format!("{} must be in [0, 1)", name)));
            }
        }

        for (name, min, max) in [
            (
                "skin brightness band",
                self.skin_brightness_min,
                self.skin_brightness_max,
            ),
            (
                "saturation brightness band",
                self.saturation_brightness_min,
                self.saturation_brightness_max,
            ),
        ] {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max > 1.0 || min > max {
                return Err(CropError::invalid(format!(
                    "{} [{}, {}] must be an interval within [0, 1]",
                    name, min, max
                )));
            }
        }

        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(CropError::invalid("min_scale must be positive"));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(CropError::invalid(format!(
                "min_scale {} must not exceed max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !self.scale_step.is_finite() || self.scale_step <= 0.0 {
            return Err(CropError::invalid("scale_step must be positive"));
        }
        if self.search_step == 0 {
            return Err(CropError::invalid("search_step must be positive"));
        }
        if self.score_downsample == 0 {
            return Err(CropError::invalid("score_downsample must be positive"));
        }
        if !self.edge_radius.is_finite() || self.edge_radius <= 0.0 {
            return Err(CropError::invalid("edge_radius must be positive"));
        }
        if self.prescale_size == 0 {
            return Err(CropError::invalid("prescale_size must be positive"));
        }

        Ok(())
    }
}
