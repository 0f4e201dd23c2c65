//! Colorspace math shared by the feature detectors.
//!
//! All functions take channel values in the [0, 255] domain of the analysis
//! buffers and are pure; brightness preserves the input magnitude, so it can
//! equally be used on [0, 1] values.

/// ITU-R BT.709 coefficient for red channel in luma calculation.
pub const LUMA_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luma calculation.
pub const LUMA_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luma calculation.
pub const LUMA_B: f32 = 0.0722;

/// Compute luma, or brightness, of an RGB color using the Rec. 709
/// coefficients: `Y = 0.2126 R + 0.7152 G + 0.0722 B`.
///
/// The output magnitude matches the input magnitude: [0, 255] inputs produce
/// a [0, 255] result, [0, 1] inputs produce a [0, 1] result.
#[inline]
pub fn brightness(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Similarity of a sample color's hue to a unit-length reference color.
///
/// The sample is normalized to unit length and compared to the reference by
/// Euclidean distance; the score is `1 - distance`, so 1.0 means identical
/// hue and values near (or below) 0 mean dissimilar hues.
///
/// `reference` must be a unit-length vector.
#[inline]
pub fn similarity(reference: [f32; 3], r: f32, g: f32, b: f32) -> f32 {
    let magnitude = (r * r + g * g + b * b).sqrt();
    if magnitude == 0.0 {
        // A zero vector has no hue to compare.
        return 0.0;
    }
    let rd = r / magnitude - reference[0];
    let gd = g / magnitude - reference[1];
    let bd = b / magnitude - reference[2];
    1.0 - (rd * rd + gd * gd + bd * bd).sqrt()
}

/// Standard HSL saturation of an RGB color.
///
/// Channel values are expected in [0, 255] and are normalized internally;
/// the result is in [0, 1], with 0 for achromatic colors.
#[inline]
pub fn saturation(r: f32, g: f32, b: f32) -> f32 {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let maximum = r.max(g).max(b);
    let minimum = r.min(g).min(b);

    if maximum == minimum {
        return 0.0;
    }

    let lightness = (maximum + minimum) / 2.0;
    let delta = maximum - minimum;

    if lightness > 0.5 {
        delta / (2.0 - maximum - minimum)
    } else {
        delta / (maximum + minimum)
    }
}
