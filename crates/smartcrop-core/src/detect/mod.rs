//! Per-pixel feature detectors.
//!
//! Each detector reads the RGBA input buffer and writes exactly one channel
//! of the analysis output buffer, so the three may run in any order. All
//! detectors require input and output buffers of identical dimensions.

pub mod edge;
pub mod saturation;
pub mod skin;

pub use edge::edge_detect;
pub use saturation::saturation_detect;
pub use skin::skin_detect;

use crate::buffer::PixelBuffer;
use crate::error::CropError;

/// Check the detector dimension contract.
pub(crate) fn ensure_same_dimensions(
    input: &PixelBuffer,
    output: &PixelBuffer,
) -> Result<(), CropError> {
    if input.width() != output.width() || input.height() != output.height() {
        return Err(CropError::DimensionMismatch {
            input_width: input.width(),
            input_height: input.height(),
            output_width: output.width(),
            output_height: output.height(),
        });
    }
    Ok(())
}
