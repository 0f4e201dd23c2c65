//! Skin-tone detection, because humans find human skin interesting.

use super::ensure_same_dimensions;
use crate::buffer::{Channel, PixelBuffer};
use crate::colorspace;
use crate::error::CropError;

/// Compute the similarity of each pixel's hue to a reference skin color and
/// write the result to the skin channel of the output buffer.
///
/// A pixel qualifies when its similarity exceeds `threshold` and its
/// normalized brightness lies within `[brightness_min, brightness_max]`.
/// Qualifying pixels get the excess over the threshold rescaled linearly to
/// [0, 255]; all others get 0.
///
/// `skin_color` is an (approximately) unit-length reference vector and
/// `threshold` must lie in [0, 1); both are validated at the options
/// boundary, not here.
///
/// # Errors
///
/// Returns [`CropError::DimensionMismatch`] if the buffers differ in size.
pub fn skin_detect(
    input: &PixelBuffer,
    output: &mut PixelBuffer,
    skin_color: [f32; 3],
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
            let similarity = colorspace::similarity(skin_color, r, g, b);

            let is_skin_color = similarity > threshold;
            let is_skin_brightness = brightness >= brightness_min && brightness <= brightness_max;

            let likeness = if is_skin_color && is_skin_brightness {
                (similarity - threshold) * scale
            } else {
                0.0
            };

            output.set(x, y, Channel::Skin, likeness);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN: [f32; 3] = [0.78, 0.57, 0.44];

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
        let input = PixelBuffer::new(2, 2);
        let mut output = PixelBuffer::new(3, 2);
        assert!(matches!(
            skin_detect(&input, &mut output, SKIN, 0.4, 0.2, 1.0),
            Err(CropError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_exact_skin_tone_scores_near_full() {
        // A positive multiple of the reference vector. The reference is only
        // approximately unit length, so similarity peaks at ~0.938 and the
        // rescaled likeness at ~(0.938 - 0.4) * 255 / 0.6.
        let input = input_of(&[[0.78 * 200.0, 0.57 * 200.0, 0.44 * 200.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.2, 1.0).unwrap();

        let likeness = output.get(0, 0, Channel::Skin);
        let expected = (0.9384 - 0.4) * (255.0 / 0.6);
        assert!(
            (likeness - expected).abs() < 1.0,
            "matching tone should rescale to ~{}, got {}",
            expected,
            likeness
        );
    }

    #[test]
    fn test_dissimilar_hue_scores_zero() {
        let input = input_of(&[[0.0, 0.0, 255.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.0, 1.0).unwrap();
        assert_eq!(output.get(0, 0, Channel::Skin), 0.0);
    }

    #[test]
    fn test_brightness_band_excludes_dark_and_bright() {
        // Same hue at three intensities; the dark one falls below the band.
        let dim = [0.78 * 40.0, 0.57 * 40.0, 0.44 * 40.0];
        let mid = [0.78 * 200.0, 0.57 * 200.0, 0.44 * 200.0];
        let input = input_of(&[dim, mid], 2, 1);
        let mut output = PixelBuffer::new(2, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.2, 0.7).unwrap();

        assert_eq!(output.get(0, 0, Channel::Skin), 0.0, "too dark");
        assert!(output.get(1, 0, Channel::Skin) > 0.0, "in band");

        // Tighten the band's top edge below the mid tone; it must drop out.
        let mut output = PixelBuffer::new(2, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.2, 0.5).unwrap();
        assert_eq!(output.get(1, 0, Channel::Skin), 0.0, "too bright for band");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Gray scores similarity ~0.755 against the default reference.
        let input = input_of(&[[128.0, 128.0, 128.0]], 1, 1);

        let mut output = PixelBuffer::new(1, 1);
        skin_detect(&input, &mut output, SKIN, 0.9, 0.0, 1.0).unwrap();
        assert_eq!(output.get(0, 0, Channel::Skin), 0.0);

        let mut output = PixelBuffer::new(1, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.0, 1.0).unwrap();
        let likeness = output.get(0, 0, Channel::Skin);
        let expected = (0.7551 - 0.4) * (255.0 / 0.6);
        assert!(
            (likeness - expected).abs() < 1.0,
            "expected ~{}, got {}",
            expected,
            likeness
        );
    }

    #[test]
    fn test_black_pixel_scores_zero() {
        let input = input_of(&[[0.0, 0.0, 0.0]], 1, 1);
        let mut output = PixelBuffer::new(1, 1);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.0, 1.0).unwrap();
        assert_eq!(output.get(0, 0, Channel::Skin), 0.0);
    }

    #[test]
    fn test_only_skin_channel_is_written() {
        let input = input_of(&[[200.0, 150.0, 120.0]; 4], 2, 2);
        let mut output = PixelBuffer::new(2, 2);
        output.set(0, 0, Channel::Detail, 31.0);
        skin_detect(&input, &mut output, SKIN, 0.4, 0.2, 1.0).unwrap();

        assert_eq!(output.get(0, 0, Channel::Detail), 31.0);
        assert_eq!(output.get(0, 0, Channel::Saturation), 0.0);
        assert_eq!(output.get(0, 0, Channel::Boost), 0.0);
    }
}
