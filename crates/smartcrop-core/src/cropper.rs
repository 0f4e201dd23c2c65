//! End-to-end crop recommendation.
//!
//! [`SmartCropper`] ties the pipeline together: fit the target aspect ratio,
//! optionally prescale large images, run the feature detectors, apply user
//! boosts, downsample, then score candidate rectangles and return the best
//! one in original image coordinates.

use crate::boost::{apply_boosts, CropBoost};
use crate::buffer::PixelBuffer;
use crate::candidates::generate_candidates;
use crate::crop::{Crop, ScoredCrop};
use crate::detect::{edge_detect, saturation_detect, skin_detect};
use crate::downsample::downsample;
use crate::error::CropError;
use crate::options::CropOptions;
use crate::score::{score_candidates, select_best};

use image::RgbaImage;
use std::borrow::Cow;

/// Result of a crop recommendation.
#[derive(Debug, Clone)]
pub struct CropResult {
    /// The winning crop, in original image coordinates.
    pub crop: ScoredCrop,
    /// Rendering of the analysis feature channels, present when
    /// [`CropOptions::debug`] is set. In prescaled coordinates.
    pub debug_image: Option<RgbaImage>,
}

/// A reusable crop recommender.
///
/// Options are validated once at construction and shared read-only across
/// any number of [`recommend`](SmartCropper::recommend) calls.
#[derive(Debug, Clone)]
pub struct SmartCropper {
    options: CropOptions,
}

impl SmartCropper {
    /// Create a cropper from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidParameter`] if any option is outside its
    /// domain.
    pub fn new(options: CropOptions) -> Result<Self, CropError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options this cropper was built with.
    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    /// Recommend the best crop of `image` with the given aspect ratio.
    ///
    /// The crop is the largest rectangle of aspect
    /// `aspect_width : aspect_height` that fits the image, searched over the
    /// configured scale and position grid. Boost rectangles are in original
    /// image coordinates, as is the returned crop.
    ///
    /// # Errors
    ///
    /// - [`CropError::InvalidParameter`] for a zero aspect component or an
    ///   empty image.
    /// - [`CropError::DegenerateInput`] when no crop of the requested aspect
    ///   fits the (possibly prescaled) image.
    pub fn recommend(
        &self,
        image: &RgbaImage,
        aspect_width: u32,
        aspect_height: u32,
        boosts: &[CropBoost],
    ) -> Result<CropResult, CropError> {
        if aspect_width == 0 || aspect_height == 0 {
            return Err(CropError::invalid(format!(
                "aspect ratio components must be positive, got {}:{}",
                aspect_width, aspect_height
            )));
        }
        let (image_width, image_height) = image.dimensions();
        if image_width == 0 || image_height == 0 {
            return Err(CropError::invalid("image must not be empty"));
        }

        // Largest crop of the requested aspect that fits the image.
        let fit = (image_width as f32 / aspect_width as f32)
            .min(image_height as f32 / aspect_height as f32);
        let base_width = (aspect_width as f32 * fit) as u32;
        let base_height = (aspect_height as f32 * fit) as u32;
        if base_width == 0 || base_height == 0 {
            return Err(CropError::DegenerateInput(format!(
                "aspect {}:{} collapses to an empty crop within a {}x{} image",
                aspect_width, aspect_height, image_width, image_height
            )));
        }

        // Analysis cost is bounded by working on a downscaled copy; the
        // candidate grid and boosts move into the same coordinate space.
        let prescale = self.prescale_factor(image_width, image_height);
        let (analysis, crop_width, crop_height, scaled_boosts) = if prescale < 1.0 {
            let scaled_width = (image_width as f32 * prescale) as u32;
            let scaled_height = (image_height as f32 * prescale) as u32;
            let resized = image::imageops::resize(
                image,
                scaled_width,
                scaled_height,
                self.options.prescale_filter.to_image_filter(),
            );
            let crop_width = (base_width as f32 * prescale) as u32;
            let crop_height = (base_height as f32 * prescale) as u32;
            if crop_width == 0 || crop_height == 0 {
                return Err(CropError::DegenerateInput(format!(
                    "crop of aspect {}:{} vanishes at prescale {}",
                    aspect_width, aspect_height, prescale
                )));
            }
            let boosts = boosts.iter().filter_map(|b| b.scaled(prescale)).collect();
            (Cow::Owned(resized), crop_width, crop_height, boosts)
        } else {
            (
                Cow::Borrowed(image),
                base_width,
                base_height,
                boosts.to_vec(),
            )
        };

        let input = PixelBuffer::from_rgba_image(&analysis);
        let mut output = PixelBuffer::new(input.width(), input.height());

        edge_detect(&input, &mut output)?;
        skin_detect(
            &input,
            &mut output,
            self.options.skin_color,
            self.options.skin_threshold,
            self.options.skin_brightness_min,
            self.options.skin_brightness_max,
        )?;
        saturation_detect(
            &input,
            &mut output,
            self.options.saturation_threshold,
            self.options.saturation_brightness_min,
            self.options.saturation_brightness_max,
        )?;
        apply_boosts(&mut output, &scaled_boosts);

        let reduced = downsample(&output, self.options.score_downsample)?;

        let candidates = generate_candidates(
            input.width(),
            input.height(),
            crop_width,
            crop_height,
            self.options.min_scale,
            self.options.max_scale,
            self.options.scale_step,
            self.options.search_step,
        )?;

        let scored = score_candidates(
            &reduced,
            &candidates,
            self.options.score_downsample,
            &self.options,
        );
        let best = select_best(&scored)?;

        let crop = unscale_crop(&best.crop, prescale, image_width, image_height)?;

        let debug_image = self.options.debug.then(|| output.to_feature_image());

        Ok(CropResult {
            crop: ScoredCrop {
                crop,
                score: best.score,
            },
            debug_image,
        })
    }

    fn prescale_factor(&self, image_width: u32, image_height: u32) -> f32 {
        if !self.options.prescale {
            return 1.0;
        }
        let size = self.options.prescale_size as f32;
        (size / image_width as f32)
            .max(size / image_height as f32)
            .min(1.0)
    }
}

impl Default for SmartCropper {
    fn default() -> Self {
        // The default options are always valid.
        Self {
            options: CropOptions::default(),
        }
    }
}

/// Recommend a crop in one call.
///
/// Convenience wrapper building a [`SmartCropper`] for a single
/// recommendation and discarding any debug image.
pub fn recommend_crop(
    image: &RgbaImage,
    aspect_width: u32,
    aspect_height: u32,
    boosts: &[CropBoost],
    options: &CropOptions,
) -> Result<ScoredCrop, CropError> {
    let cropper = SmartCropper::new(options.clone())?;
    let result = cropper.recommend(image, aspect_width, aspect_height, boosts)?;
    Ok(result.crop)
}

/// Map a crop selected in prescaled coordinates back to the original image.
fn unscale_crop(
    crop: &Crop,
    prescale: f32,
    image_width: u32,
    image_height: u32,
) -> Result<Crop, CropError> {
    if prescale >= 1.0 {
        return Ok(*crop);
    }
    let x = ((crop.x() as f32 / prescale) as u32).min(image_width - 1);
    let y = ((crop.y() as f32 / prescale) as u32).min(image_height - 1);
    let width = ((crop.width() as f32 / prescale) as u32)
        .min(image_width - x)
        .max(1);
    let height = ((crop.height() as f32 / prescale) as u32)
        .min(image_height - y)
        .max(1);
    Crop::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Uniform image of the given color.
    fn uniform_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    /// Paint a filled rectangle.
    fn paint_rect(image: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: [u8; 4]) {
        for y in y0..(y0 + h).min(image.height()) {
            for x in x0..(x0 + w).min(image.width()) {
                image.put_pixel(x, y, Rgba(color));
            }
        }
    }

    const GRAY: [u8; 4] = [128, 128, 128, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];
    /// A tone matching the reference skin color direction.
    const SKIN_TONE: [u8; 4] = [199, 145, 112, 255];

    #[test]
    fn test_invalid_aspect_is_rejected() {
        let image = uniform_image(100, 100, GRAY);
        let cropper = SmartCropper::default();
        assert!(matches!(
            cropper.recommend(&image, 0, 1, &[]),
            Err(CropError::InvalidParameter(_))
        ));
        assert!(matches!(
            cropper.recommend(&image, 1, 0, &[]),
            Err(CropError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = RgbaImage::new(0, 0);
        let cropper = SmartCropper::default();
        assert!(matches!(
            cropper.recommend(&image, 1, 1, &[]),
            Err(CropError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_options_are_rejected_at_construction() {
        let options = CropOptions {
            min_scale: 2.0,
            max_scale: 1.0,
            ..CropOptions::default()
        };
        assert!(matches!(
            SmartCropper::new(options),
            Err(CropError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_extreme_aspect_is_degenerate() {
        let image = uniform_image(10, 10, GRAY);
        let cropper = SmartCropper::default();
        assert!(matches!(
            cropper.recommend(&image, 1000, 1, &[]),
            Err(CropError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_crop_has_requested_fit_and_stays_in_bounds() {
        let image = uniform_image(400, 300, GRAY);
        let cropper = SmartCropper::default();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();

        let crop = result.crop.crop;
        assert!(crop.x() + crop.width() <= 400);
        assert!(crop.y() + crop.height() <= 300);
        // Square-ish: prescale rounding may cost a few pixels.
        let ratio = crop.width() as f32 / crop.height() as f32;
        assert!((0.95..=1.05).contains(&ratio), "ratio {}", ratio);
        // The search floor keeps the crop near the fitted base size.
        assert!(crop.height() >= 230);
    }

    #[test]
    fn test_salient_square_attracts_the_crop() {
        // Uniform gray field with one bright saturated square near the
        // top-right corner.
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 300, 10, 50, 50, RED);

        let cropper = SmartCropper::default();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();

        assert!(
            result.crop.crop.contains(325, 35),
            "winning crop {:?} must cover the salient square",
            result.crop.crop
        );
    }

    #[test]
    fn test_salient_square_attracts_the_crop_without_prescale() {
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 300, 10, 50, 50, RED);

        let options = CropOptions {
            prescale: false,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(options).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();

        assert!(
            result.crop.crop.contains(325, 35),
            "winning crop {:?} must cover the salient square",
            result.crop.crop
        );
    }

    #[test]
    fn test_heavy_boost_overrides_detected_features() {
        // Same salient square, but an overwhelming boost in the opposite
        // corner pulls the crop away from it.
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 300, 10, 50, 50, RED);

        let boost = CropBoost::new(Crop::new(0, 0, 50, 50).unwrap(), 1.0).unwrap();
        let options = CropOptions {
            boost_weight: 10_000.0,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(options).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[boost]).unwrap();

        let crop = result.crop.crop;
        assert!(
            crop.contains(10, 10),
            "winning crop {:?} must cover the boosted corner",
            crop
        );
        assert!(
            !crop.contains(325, 35),
            "winning crop {:?} must abandon the salient square",
            crop
        );
    }

    #[test]
    fn test_skin_weight_extremes_attract_and_repel() {
        // A skin-toned patch on a neutral field.
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 300, 10, 50, 50, SKIN_TONE);

        let attract = CropOptions {
            skin_weight: 1000.0,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(attract).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();
        assert!(
            result.crop.crop.contains(325, 35),
            "extreme positive skin weight must pull the crop onto the patch, got {:?}",
            result.crop.crop
        );

        let repel = CropOptions {
            skin_weight: -1000.0,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(repel).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();
        assert!(
            !result.crop.crop.contains(325, 35),
            "extreme negative skin weight must push the crop off the patch, got {:?}",
            result.crop.crop
        );
    }

    #[test]
    fn test_recommendation_is_deterministic() {
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 120, 80, 60, 40, RED);

        let cropper = SmartCropper::default();
        let a = cropper.recommend(&image, 4, 3, &[]).unwrap();
        let b = cropper.recommend(&image, 4, 3, &[]).unwrap();

        assert_eq!(a.crop.crop, b.crop.crop);
        assert_eq!(a.crop.score.total.to_bits(), b.crop.score.total.to_bits());
    }

    #[test]
    fn test_debug_image_is_attached_on_request() {
        let image = uniform_image(100, 80, GRAY);

        let cropper = SmartCropper::default();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();
        assert!(result.debug_image.is_none());

        let options = CropOptions {
            debug: true,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(options).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[]).unwrap();

        // 100x80 is below the prescale threshold, so the analysis buffer has
        // the image's own dimensions.
        let debug = result.debug_image.expect("debug image requested");
        assert_eq!(debug.dimensions(), (100, 80));
        assert!(debug.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_small_image_skips_prescale() {
        let image = uniform_image(120, 90, GRAY);
        let cropper = SmartCropper::default();
        let result = cropper.recommend(&image, 4, 3, &[]).unwrap();

        let crop = result.crop.crop;
        // Exact fit at scale 1.0 exists; no prescale rounding applies.
        assert_eq!((crop.width(), crop.height()), (120, 90));
    }

    #[test]
    fn test_recommend_crop_convenience_matches_cropper() {
        let mut image = uniform_image(400, 300, GRAY);
        paint_rect(&mut image, 300, 10, 50, 50, RED);

        let options = CropOptions::default();
        let direct = recommend_crop(&image, 1, 1, &[], &options).unwrap();
        let via_cropper = SmartCropper::new(options)
            .unwrap()
            .recommend(&image, 1, 1, &[])
            .unwrap();

        assert_eq!(direct.crop, via_cropper.crop.crop);
    }

    #[test]
    fn test_boosts_survive_prescale_coordinate_mapping() {
        // Boost in original coordinates on an image large enough to trigger
        // prescaling; the winner must land on the boosted region.
        let image = uniform_image(1024, 768, GRAY);
        let boost = CropBoost::new(Crop::new(900, 80, 100, 100).unwrap(), 1.0).unwrap();

        let options = CropOptions {
            boost_weight: 10_000.0,
            ..CropOptions::default()
        };
        let cropper = SmartCropper::new(options).unwrap();
        let result = cropper.recommend(&image, 1, 1, &[boost]).unwrap();

        assert!(
            result.crop.crop.contains(950, 130),
            "boost must act in original coordinates, got {:?}",
            result.crop.crop
        );
    }
}
