//! Edge/detail detection, because good crops do not split objects.

use super::ensure_same_dimensions;
use crate::buffer::{Channel, PixelBuffer};
use crate::colorspace;
use crate::error::CropError;

/// Detect edges in the input image and write the response to the detail
/// channel of the output buffer.
///
/// Interior pixels get a 4-neighbor Laplacian of brightness,
/// `4*Y(c) - Y(up) - Y(left) - Y(right) - Y(down)`, which may be negative.
/// Border pixels get their raw brightness; there is no Laplacian at the
/// image boundary.
///
/// # Errors
///
/// Returns [`CropError::DimensionMismatch`] if the buffers differ in size.
pub fn edge_detect(input: &PixelBuffer, output: &mut PixelBuffer) -> Result<(), CropError> {
    ensure_same_dimensions(input, output)?;

    let w = input.width();
    let h = input.height();

    for y in 0..h {
        for x in 0..w {
            let center = luma(input, x, y);
            let detail = if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
                center
            } else {
                center * 4.0
                    - luma(input, x, y - 1)
                    - luma(input, x - 1, y)
                    - luma(input, x + 1, y)
                    - luma(input, x, y + 1)
            };
            output.set(x, y, Channel::Detail, detail);
        }
    }

    Ok(())
}

#[inline]
fn luma(buffer: &PixelBuffer, x: u32, y: u32) -> f32 {
    let [r, g, b, _] = buffer.rgba(x, y);
    colorspace::brightness(r, g, b)
}
