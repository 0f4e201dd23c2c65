//! WASM bindings for crop recommendation.
//!
//! This module exposes the core analysis pipeline to JavaScript: pass an
//! RGBA image, a target aspect ratio, and optionally boost rectangles and
//! options; get back the best-scoring crop.

use crate::types::JsSourceImage;
use serde::{Deserialize, Serialize};
use smartcrop_core::{Crop, CropBoost, CropError, CropOptions, SmartCropper};
use wasm_bindgen::prelude::*;

/// A boost rectangle as plain JavaScript data.
///
/// Coordinates are in original image pixels; `weight` is the emphasis in
/// [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsCropBoost {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub weight: f32,
}

/// Build validated core boosts from the deserialized JS values.
fn convert_boosts(boosts: &[JsCropBoost]) -> Result<Vec<CropBoost>, CropError> {
    boosts
        .iter()
        .map(|b| CropBoost::new(Crop::new(b.x, b.y, b.width, b.height)?, b.weight))
        .collect()
}

/// Deserialize the optional boost array; `null`/`undefined` means none.
fn parse_boosts(boosts: JsValue) -> Result<Vec<CropBoost>, JsValue> {
    if boosts.is_null() || boosts.is_undefined() {
        return Ok(Vec::new());
    }
    let parsed: Vec<JsCropBoost> =
        serde_wasm_bindgen::from_value(boosts).map_err(|e| JsValue::from_str(&e.to_string()))?;
    convert_boosts(&parsed).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Deserialize the optional options object; `null`/`undefined` means
/// defaults. Field-level validation happens in the core.
fn parse_options(options: JsValue) -> Result<CropOptions, JsValue> {
    if options.is_null() || options.is_undefined() {
        return Ok(CropOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Recommend the best crop of an image for a target aspect ratio.
///
/// # Arguments
///
/// * `image` - Source image (RGBA)
/// * `aspect_width` - Target aspect ratio width component (e.g. 16)
/// * `aspect_height` - Target aspect ratio height component (e.g. 9)
/// * `boosts` - Optional array of `{x, y, width, height, weight}` objects
///   emphasizing regions the heuristics should favor; pass `null` for none
/// * `options` - Optional options object overriding the default heuristics;
///   pass `null` for defaults
///
/// # Returns
///
/// The winning crop with its score components, in original image
/// coordinates:
/// `{crop: {x, y, width, height}, score: {detail, saturation, skin, boost, total}}`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const image = new JsSourceImage(imageData.width, imageData.height,
///                                 new Uint8Array(imageData.data.buffer));
/// const result = recommend_crop(image, 1, 1, null, null);
/// ctx.drawImage(source,
///               result.crop.x, result.crop.y,
///               result.crop.width, result.crop.height,
///               0, 0, canvas.width, canvas.height);
/// ```
#[wasm_bindgen]
pub fn recommend_crop(
    image: &JsSourceImage,
    aspect_width: u32,
    aspect_height: u32,
    boosts: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let source = image.to_image().map_err(|e| JsValue::from_str(&e))?;
    let boosts = parse_boosts(boosts)?;
    let options = parse_options(options)?;

    let cropper = SmartCropper::new(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result = cropper
        .recommend(&source, aspect_width, aspect_height, &boosts)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result.crop).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the analysis feature channels for a crop recommendation.
///
/// Runs the same analysis as [`recommend_crop`] and returns the feature
/// buffer as an image (skin in red, detail in green, saturation in blue,
/// opaque alpha) for overlaying in a debugging UI. The image has the
/// dimensions of the analyzed (possibly prescaled) buffer.
#[wasm_bindgen]
pub fn feature_preview(
    image: &JsSourceImage,
    aspect_width: u32,
    aspect_height: u32,
    boosts: JsValue,
    options: JsValue,
) -> Result<JsSourceImage, JsValue> {
    let source = image.to_image().map_err(|e| JsValue::from_str(&e))?;
    let boosts = parse_boosts(boosts)?;
    let options = CropOptions {
        debug: true,
        ..parse_options(options)?
    };

    let cropper = SmartCropper::new(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result = cropper
        .recommend(&source, aspect_width, aspect_height, &boosts)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // debug is set above, so the image is always present.
    let debug_image = result
        .debug_image
        .ok_or_else(|| JsValue::from_str("analysis produced no feature image"))?;
    Ok(JsSourceImage::from_image(debug_image))
}
