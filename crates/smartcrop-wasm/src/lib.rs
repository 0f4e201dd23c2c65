//! Smartcrop WASM - WebAssembly bindings for smartcrop
//!
//! This crate exposes the smartcrop-core crop recommendation engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `crop` - Crop recommendation bindings (best crop + feature preview)
//!
//! # Usage
//!
//! ```typescript
//! import init, { recommend_crop, JsSourceImage } from '@smartcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Recommend a square crop
//! const image = new JsSourceImage(width, height, rgbaBytes);
//! const result = recommend_crop(image, 1, 1, null, null);
//! console.log(`Best crop at (${result.crop.x}, ${result.crop.y})`);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod types;

// Re-export public types
pub use crop::{feature_preview, recommend_crop, JsCropBoost};
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
