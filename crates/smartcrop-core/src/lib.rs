//! Smartcrop Core - Content-aware crop recommendation
//!
//! This crate finds the best-scoring rectangular crop of an image for a
//! requested aspect ratio. Instead of naive center-cropping it analyzes the
//! pixels with fixed heuristics — edge density, skin-color likelihood,
//! saturation, user boosts and rule-of-thirds composition — and picks the
//! candidate rectangle with the highest score density.
//!
//! The pipeline: build a [`PixelBuffer`] from RGBA pixels, run the three
//! feature detectors (each writing one [`Channel`] of an analysis buffer),
//! apply user [`CropBoost`] regions, block-reduce the result once, enumerate
//! candidate rectangles over a scale and position grid, score each against
//! the reduced buffer with the positional importance model, and return the
//! arg-max. [`SmartCropper`] ties all of that together behind a single
//! entry point.

pub mod boost;
pub mod buffer;
pub mod candidates;
pub mod colorspace;
pub mod compose;
pub mod crop;
pub mod cropper;
pub mod detect;
pub mod downsample;
pub mod error;
pub mod options;
pub mod score;

pub use boost::{apply_boosts, CropBoost};
pub use buffer::{Channel, PixelBuffer};
pub use candidates::generate_candidates;
pub use compose::importance;
pub use crop::{Crop, CropScore, ScoredCrop};
pub use cropper::{recommend_crop, CropResult, SmartCropper};
pub use detect::{edge_detect, saturation_detect, skin_detect};
pub use downsample::downsample;
pub use error::CropError;
pub use options::{CropOptions, FilterType};
pub use score::{score_candidates, score_crop, select_best};
