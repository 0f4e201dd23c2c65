//! WASM-compatible wrapper types for image data.
//!
//! This module provides the JavaScript-friendly image type the crop bindings
//! operate on, handling the conversion between JS byte arrays and the core's
//! `image::RgbaImage`.

use image::RgbaImage;
use wasm_bindgen::prelude::*;

/// An RGBA source image for JavaScript.
///
/// Pixel data is row-major, 4 bytes per pixel (`[r, g, b, a]`), the layout
/// produced by a canvas `ImageData` object.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// JavaScript `Uint8Array`; for large images prefer keeping the image on the
/// WASM side and only extracting pixels when needed. wasm-bindgen's
/// finalizer releases the memory automatically.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    /// Convert to a core `RgbaImage`, validating the buffer length.
    pub(crate) fn to_image(&self) -> Result<RgbaImage, String> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            format!(
                "pixel buffer for {}x{} must hold {} bytes, got {}",
                self.width,
                self.height,
                self.width as usize * self.height as usize * 4,
                self.pixels.len()
            )
        })
    }

    /// Wrap a core `RgbaImage` produced on the Rust side.
    pub(crate) fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}
