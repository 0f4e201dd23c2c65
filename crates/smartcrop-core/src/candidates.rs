//! Candidate crop enumeration over a scale and position grid.

use crate::crop::Crop;
use crate::error::CropError;

/// Enumerate candidate crops for an `image_width x image_height` image.
///
/// Scales run from `max_scale` down to `min_scale` in decrements of
/// `scale_step` (float accumulation decides whether the lower endpoint is
/// reached). For each scale the base crop is shrunk to
/// `floor(base * scale)`; scales collapsing a dimension to zero are skipped.
/// Positions are walked row-major in increments of `search_step`, keeping
/// only rectangles that lie fully inside the image.
///
/// The returned order — scale-major, largest scale first, then row-major —
/// is load-bearing: selection breaks score ties in favor of the earliest
/// candidate.
///
/// # Errors
///
/// - [`CropError::InvalidParameter`] if the base crop exceeds the image, the
///   scale interval is inverted, or any scale/step parameter is not positive.
/// - [`CropError::DegenerateInput`] if no candidate fits the image.
pub fn generate_candidates(
    image_width: u32,
    image_height: u32,
    base_width: u32,
    base_height: u32,
    min_scale: f32,
    max_scale: f32,
    scale_step: f32,
    search_step: u32,
) -> Result<Vec<Crop>, CropError> {
    if base_width == 0 || base_height == 0 {
        return Err(CropError::invalid("base crop dimensions must be positive"));
    }
    if base_width > image_width || base_height > image_height {
        return Err(CropError::invalid(format!(
            "base crop {}x{} exceeds image {}x{}",
            base_width, base_height, image_width, image_height
        )));
    }
    if !min_scale.is_finite() || !max_scale.is_finite() || min_scale <= 0.0 {
        return Err(CropError::invalid("scales must be positive and finite"));
    }
    if max_scale < min_scale {
        return Err(CropError::invalid(format!(
            "min scale {} exceeds max scale {}",
            min_scale, max_scale
        )));
    }
    if !scale_step.is_finite() || scale_step <= 0.0 {
        return Err(CropError::invalid("scale step must be positive and finite"));
    }
    if search_step == 0 {
        return Err(CropError::invalid("search step must be positive"));
    }

    let mut crops = Vec::new();
    let mut scale = max_scale;
    while scale >= min_scale {
        let crop_width = (base_width as f32 * scale) as u32;
        let crop_height = (base_height as f32 * scale) as u32;

        if crop_width > 0 && crop_height > 0 {
            let mut y = 0;
            while y + crop_height <= image_height {
                let mut x = 0;
                while x + crop_width <= image_width {
                    crops.push(Crop::new(x, y, crop_width, crop_height)?);
                    x += search_step;
                }
                y += search_step;
            }
        }

        scale -= scale_step;
    }

    if crops.is_empty() {
        return Err(CropError::DegenerateInput(format!(
            "no crop of base {}x{} at scales [{}, {}] fits a {}x{} image",
            base_width, base_height, min_scale, max_scale, image_width, image_height
        )));
    }

    Ok(crops)
}
