//! Block reduction of analysis buffers ahead of scoring.

use crate::buffer::{Channel, PixelBuffer, PIXEL_STRIDE};
use crate::error::CropError;

/// Reduce `buffer` by an integer `factor`, producing a
/// `max(floor(w/factor), 1) x max(floor(h/factor), 1)` buffer.
///
/// Each output cell aggregates its `factor x factor` input block (clipped to
/// the buffer edge) per channel. Pure averaging would wash out small
/// high-value features when a large block collapses into one cell, so the
/// skin and detail channels blend the block maximum back in:
///
/// - skin: `mean * 0.5 + max * 0.5`
/// - detail: `mean * 0.7 + max * 0.3`
/// - saturation, boost: `mean`
///
/// A factor of 1 returns the buffer unchanged.
///
/// # Errors
///
/// Returns [`CropError::InvalidParameter`] if `factor` is zero.
pub fn downsample(buffer: &PixelBuffer, factor: u32) -> Result<PixelBuffer, CropError> {
    if factor == 0 {
        return Err(CropError::invalid("downsample factor must be positive"));
    }
    if factor == 1 {
        return Ok(buffer.clone());
    }

    let in_width = buffer.width();
    let in_height = buffer.height();
    let out_width = (in_width / factor).max(1);
    let out_height = (in_height / factor).max(1);

    let skin = Channel::Skin.offset();
    let detail = Channel::Detail.offset();
    let saturation = Channel::Saturation.offset();
    let boost = Channel::Boost.offset();

    let data = buffer.data();
    let mut out = Vec::with_capacity(out_width as usize * out_height as usize * PIXEL_STRIDE);

    for y in 0..out_height {
        for x in 0..out_width {
            let mut sums = [0.0f32; PIXEL_STRIDE];
            let mut max_skin = 0.0f32;
            let mut max_detail = 0.0f32;
            let mut samples = 0u32;

            for v in 0..factor {
                let sy = y * factor + v;
                if sy >= in_height {
                    break;
                }
                for u in 0..factor {
                    let sx = x * factor + u;
                    if sx >= in_width {
                        break;
                    }
                    let i = (sy as usize * in_width as usize + sx as usize) * PIXEL_STRIDE;
                    sums[skin] += data[i + skin];
                    sums[detail] += data[i + detail];
                    sums[saturation] += data[i + saturation];
                    sums[boost] += data[i + boost];
                    max_skin = max_skin.max(data[i + skin]);
                    max_detail = max_detail.max(data[i + detail]);
                    samples += 1;
                }
            }

            let inverse = 1.0 / samples as f32;
            let mut cell = [0.0f32; PIXEL_STRIDE];
            cell[skin] = sums[skin] * inverse * 0.5 + max_skin * 0.5;
            cell[detail] = sums[detail] * inverse * 0.7 + max_detail * 0.3;
            cell[saturation] = sums[saturation] * inverse;
            cell[boost] = sums[boost] * inverse;
            out.extend_from_slice(&cell);
        }
    }

    PixelBuffer::from_data(out_width, out_height, out)
}
