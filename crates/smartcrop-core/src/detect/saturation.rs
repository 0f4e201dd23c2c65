//! Saturation detection, because humans find vivid colors interesting.

use super::ensure_same_dimensions;
use crate::buffer::{Channel, PixelBuffer};
use crate::colorspace;
use crate::error::CropError;

/// Compute the saturation of each pixel and write the result to the
/// saturation channel of the output buffer.
///
/// A pixel qualifies when its HSL saturation exceeds `threshold` and its
/// brightness (in [0, 255]) normalized to [0, 1] lies within
/// `[brightness_min, brightness_max]`. Qualifying pixels get the excess over
/// the threshold rescaled linearly to [0, 255]; all others get 0.
///
/// # Errors
///
/// Returns [`CropError::DimensionMismatch`] if the buffers differ in size.
pub fn saturation_detect(
    input: &PixelBuffer,
    output: &mut PixelBuffer,
    threshold: f32,
    brightness_min: f32,
    brightness_max: f32,
) -> Result<(), CropError> {
    ensure_same_dimensions(input, output)?;

    let scale = 255.0 / (1.0 - threshold);

    for y in 0..input.height() {
        for x in 0..input.width() {
            let [r, g, b, _] = input.rgba(x, y);

            let brightness = colorspace::brightness(r, g, b) / 255.0;
            let saturation = colorspace::saturation(r, g, b);

            let is_saturated = saturation > threshold;
            let is_lit = brightness >= brightness_min && brightness <= brightness_max;

            let saturatedness = if is_saturated && is_lit {
                (saturation - threshold) * scale
            } else {
                0.0
            };

            output.set(x, y, Channel::Saturation, saturatedness);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_of(pixels: &[[f32; 3]], width: u32, height: u32) -> PixelBuffer {
        assert_eq!(pixels.len(), (width * height) as usize);
        let mut data = Vec::with_capacity(pixels.len() * 4);
        for p in pixels {
            data.extend_from_slice(&[p[0], p[1], p[2], 255.0]);
        }
        PixelBuffer::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let input = PixelBuffer::new(2, 3);
        let mut output = PixelBuffer::new(2, 2);
        assert!(matches!(
            saturation_detect(&input, &mut output, 0.4, 0.05, 0.9),
            Err(CropError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_pure_red_scores_full() {
        let input = input_of(&[[255.0, 0.0, 0.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        saturation_detect(&input, &mut output, 0.4, 0.05, 0.9).unwrap();

        // Saturation 1.0, brightness ~0.21: rescales to the channel maximum.
        let v = output.get(0, 0, Channel::Saturation);
        assert!((v - 255.0).abs() < 1e-2, "expected ~255, got {}", v);
    }

    #[test]
    fn test_gray_scores_zero() {
        let input = input_of(&[[128.0, 128.0, 128.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        saturation_detect(&input, &mut output, 0.4, 0.0, 1.0).unwrap();
        assert_eq!(output.get(0, 0, Channel::Saturation), 0.0);
    }

    #[test]
    fn test_brightness_band_applies() {
        // Pure blue has brightness ~0.072.
        let input = input_of(&[[0.0, 0.0, 255.0]], 1, 1);

        let mut output = PixelBuffer::new(1, 1);
        saturation_detect(&input, &mut output, 0.4, 0.05, 0.9).unwrap();
        assert!(output.get(0, 0, Channel::Saturation) > 0.0);

        // Raise the floor above blue's brightness; it must be excluded.
        let mut output = PixelBuffer::new(1, 1);
        saturation_detect(&input, &mut output, 0.4, 0.1, 0.9).unwrap();
        assert_eq!(output.get(0, 0, Channel::Saturation), 0.0);
    }

    #[test]
    fn test_threshold_rescale_is_linear() {
        // A half-saturated dark color: max 0.6, min 0.2 => sat = 0.5.
        let input = input_of(&[[0.6 * 255.0, 0.2 * 255.0, 0.2 * 255.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        saturation_detect(&input, &mut output, 0.4, 0.0, 1.0).unwrap();

        let expected = (0.5 - 0.4) * (255.0 / 0.6);
        let v = output.get(0, 0, Channel::Saturation);
        assert!((v - expected).abs() < 0.5, "expected ~{}, got {}", expected, v);
    }

    #[test]
    fn test_only_saturation_channel_is_written() {
        let input = input_of(&[[255.0, 0.0, 0.0]; 4], 2, 2);
        let mut output = PixelBuffer::new(2, 2);
        output.set(1, 0, Channel::Detail, 5.0);
        saturation_detect(&input, &mut output, 0.4, 0.05, 0.9).unwrap();

        assert_eq!(output.get(1, 0, Channel::Detail), 5.0);
        assert_eq!(output.get(1, 0, Channel::Skin), 0.0);
        assert_eq!(output.get(1, 0, Channel::Boost), 0.0);
    }
}
