//! Manual emphasis regions, because sometimes the heuristics need help.

use crate::buffer::{Channel, PixelBuffer};
use crate::crop::Crop;
use crate::error::CropError;
use serde::{Deserialize, Serialize};

/// A user-supplied emphasis region: a rectangle plus a weight in [0, 1],
/// independent of any detected feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBoost {
    region: Crop,
    weight: f32,
}

impl CropBoost {
    /// Create a boost.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidParameter`] if `weight` is not in [0, 1].
    pub fn new(region: Crop, weight: f32) -> Result<Self, CropError> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(CropError::invalid(format!(
                "boost weight must be in [0, 1], got {}",
                weight
            )));
        }
        Ok(Self { region, weight })
    }

    /// The boosted rectangle.
    #[inline]
    pub fn region(&self) -> Crop {
        self.region
    }

    /// Emphasis weight in [0, 1].
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Rescale the region by `factor`, e.g. into prescaled coordinates.
    /// Regions that collapse to zero size are dropped.
    pub(crate) fn scaled(&self, factor: f32) -> Option<CropBoost> {
        let region = Crop::new(
            (self.region.x() as f32 * factor) as u32,
            (self.region.y() as f32 * factor) as u32,
            (self.region.width() as f32 * factor) as u32,
            (self.region.height() as f32 * factor) as u32,
        )
        .ok()?;
        Some(CropBoost {
            region,
            weight: self.weight,
        })
    }
}

/// Write the given boosts into the boost channel of the analysis buffer.
///
/// The boost channel is first reset to 0 for every pixel, so stale values
/// from a reused buffer can never leak into scoring. Each boost then adds
/// `weight * 255` to every pixel of its rectangle (clipped to the buffer),
/// clamping the running sum to [0, 255]. Overlapping boosts accumulate up to
/// the clamp, which makes application order-independent.
pub fn apply_boosts(output: &mut PixelBuffer, boosts: &[CropBoost]) {
    output.fill_channel(Channel::Boost, 0.0);

    for boost in boosts {
        apply_boost(output, boost);
    }
}

fn apply_boost(output: &mut PixelBuffer, boost: &CropBoost) {
    let region = boost.region();
    let x0 = region.x().min(output.width());
    let y0 = region.y().min(output.height());
    let x1 = (region.x() + region.width()).min(output.width());
    let y1 = (region.y() + region.height()).min(output.height());
    let added = boost.weight() * 255.0;

    for y in y0..y1 {
        for x in x0..x1 {
            let current = output.get(x, y, Channel::Boost);
            output.set(x, y, Channel::Boost, (current + added).clamp(0.0, 255.0));
        }
    }
}
