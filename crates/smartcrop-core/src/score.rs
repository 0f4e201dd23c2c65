//! Candidate scoring against the downsampled analysis buffer.

use crate::buffer::{Channel, PixelBuffer};
use crate::compose::importance;
use crate::crop::{Crop, CropScore, ScoredCrop};
use crate::error::CropError;
use crate::options::CropOptions;

/// Score one candidate crop against the downsampled analysis buffer.
///
/// `crop` stays in the coordinate space the candidates were generated in;
/// each buffer cell is mapped back to that space through
/// `downsample_factor` before its importance is evaluated. Feature values
/// are normalized out of [0, 255], weighted by importance, and accumulated;
/// the total is the weighted component sum divided by the crop area, so
/// larger crops are not automatically favored.
pub fn score_crop(
    buffer: &PixelBuffer,
    crop: &Crop,
    downsample_factor: u32,
    options: &CropOptions,
) -> CropScore {
    let mut detail_sum = 0.0f32;
    let mut saturation_sum = 0.0f32;
    let mut skin_sum = 0.0f32;
    let mut boost_sum = 0.0f32;

    for cell_y in 0..buffer.height() {
        for cell_x in 0..buffer.width() {
            let x = cell_x * downsample_factor;
            let y = cell_y * downsample_factor;

            let weight = importance(
                crop,
                x,
                y,
                options.outside_importance,
                options.edge_radius,
                options.edge_weight,
                options.rule_of_thirds_weight,
            );

            let detail = buffer.get(cell_x, cell_y, Channel::Detail) / 255.0;

            skin_sum += buffer.get(cell_x, cell_y, Channel::Skin) / 255.0
                * (detail + options.skin_bias)
                * weight;
            detail_sum += detail * weight;
            saturation_sum += buffer.get(cell_x, cell_y, Channel::Saturation) / 255.0
                * (detail + options.saturation_bias)
                * weight;
            boost_sum += buffer.get(cell_x, cell_y, Channel::Boost) / 255.0 * weight;
        }
    }

    let area = crop.width() as f32 * crop.height() as f32;
    let total = (detail_sum * options.detail_weight
        + skin_sum * options.skin_weight
        + saturation_sum * options.saturation_weight
        + boost_sum * options.boost_weight)
        / area;

    CropScore {
        detail: detail_sum,
        saturation: saturation_sum,
        skin: skin_sum,
        boost: boost_sum,
        total,
    }
}

/// Score every candidate, preserving candidate order.
///
/// Candidates are independent, so with the `parallel` feature the map runs
/// on the rayon pool; `collect` keeps the input order either way, which the
/// tie-break in [`select_best`] relies on.
#[cfg(feature = "parallel")]
pub fn score_candidates(
    buffer: &PixelBuffer,
    candidates: &[Crop],
    downsample_factor: u32,
    options: &CropOptions,
) -> Vec<ScoredCrop> {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .map(|crop| ScoredCrop {
            crop: *crop,
            score: score_crop(buffer, crop, downsample_factor, options),
        })
        .collect()
}

/// Score every candidate, preserving candidate order.
#[cfg(not(feature = "parallel"))]
pub fn score_candidates(
    buffer: &PixelBuffer,
    candidates: &[Crop],
    downsample_factor: u32,
    options: &CropOptions,
) -> Vec<ScoredCrop> {
    candidates
        .iter()
        .map(|crop| ScoredCrop {
            crop: *crop,
            score: score_crop(buffer, crop, downsample_factor, options),
        })
        .collect()
}

/// Pick the candidate with the highest total score.
///
/// Ties go to the earliest candidate in generation order (scale-major,
/// then row-major).
///
/// # Errors
///
/// Returns [`CropError::NoCandidates`] if `scored` is empty.
pub fn select_best(scored: &[ScoredCrop]) -> Result<ScoredCrop, CropError> {
    let mut best: Option<&ScoredCrop> = None;
    for candidate in scored {
        match best {
            Some(current) if candidate.score.total <= current.score.total => {}
            _ => best = Some(candidate),
        }
    }
    best.copied().ok_or(CropError::NoCandidates)
}
