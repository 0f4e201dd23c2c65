//! Error types for crop analysis.

use thiserror::Error;

/// Error types for crop recommendation operations.
///
/// All errors are terminal for the current analysis call: no partial results
/// are produced and nothing is retried internally.
#[derive(Debug, Error)]
pub enum CropError {
    /// A parameter is outside its valid domain (non-positive dimension,
    /// weight outside a finite range, inverted scale interval, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A detector was handed input and output buffers of different sizes.
    #[error("dimension mismatch: input is {input_width}x{input_height}, output is {output_width}x{output_height}")]
    DimensionMismatch {
        input_width: u32,
        input_height: u32,
        output_width: u32,
        output_height: u32,
    },

    /// The requested configuration cannot produce any candidate crop,
    /// e.g. the target crop is larger than the analyzed image.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Selection was attempted over an empty candidate list.
    #[error("no candidate crops to select from")]
    NoCandidates,
}

impl CropError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CropError::InvalidParameter(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CropError::invalid("minScale must not exceed maxScale");
        assert_eq!(
            err.to_string(),
            "invalid parameter: minScale must not exceed maxScale"
        );

        let err = CropError::DimensionMismatch {
            input_width: 10,
            input_height: 20,
            output_width: 10,
            output_height: 21,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: input is 10x20, output is 10x21"
        );

        assert_eq!(
            CropError::NoCandidates.to_string(),
            "no candidate crops to select from"
        );
    }
}
