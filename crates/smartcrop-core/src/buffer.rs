//! Dense float pixel buffer used by the analysis pipeline.
//!
//! A [`PixelBuffer`] holds four `f32` channels per pixel in row-major order.
//! The meaning of the channels depends on the pipeline stage: a buffer built
//! from source pixels carries RGBA in [0, 255]; the analysis output buffer
//! carries one feature per channel, addressed through [`Channel`] so the
//! channel-to-offset mapping lives in exactly one place.

use crate::error::CropError;
use image::RgbaImage;

/// Number of `f32` values per pixel.
pub const PIXEL_STRIDE: usize = 4;

/// Feature channels of an analysis buffer.
///
/// In a raw input buffer the same offsets hold R, G, B and A; the detectors
/// read those through [`PixelBuffer::rgba`] and write their feature through
/// this enum, so a transposed channel index cannot slip in silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Skin-likeness, [0, 255].
    Skin,
    /// Edge/detail magnitude. Interior values may be negative (signed
    /// Laplacian response).
    Detail,
    /// Saturation-likeness, [0, 255].
    Saturation,
    /// Accumulated user boost, [0, 255].
    Boost,
}

impl Channel {
    /// Offset of this channel within a pixel.
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Channel::Skin => 0,
            Channel::Detail => 1,
            Channel::Saturation => 2,
            Channel::Boost => 3,
        }
    }
}

/// A `width x height` buffer of four `f32` channels per pixel.
///
/// The length invariant `data.len() == width * height * 4` holds for every
/// constructed buffer; [`PixelBuffer::from_data`] rejects mismatched input.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * PIXEL_STRIDE;
        Self {
            width,
            height,
            data: vec![0.0; len],
        }
    }

    /// Create a buffer from existing channel data.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidParameter`] if `data` does not hold
    /// exactly `width * height * 4` values.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self, CropError> {
        let expected = width as usize * height as usize * PIXEL_STRIDE;
        if data.len() != expected {
            return Err(CropError::invalid(format!(
                "pixel buffer for {}x{} must hold {} values, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an RGBA input buffer from a decoded image, widening each byte
    /// channel to `f32` in [0, 255].
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image.as_raw().iter().map(|&v| v as f32).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw channel data, row-major, four values per pixel.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Index of the first channel of pixel `(x, y)`.
    #[inline]
    pub fn base_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * PIXEL_STRIDE
    }

    /// All four channels of pixel `(x, y)`.
    #[inline]
    pub fn rgba(&self, x: u32, y: u32) -> [f32; 4] {
        let i = self.base_index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Read one channel of pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: Channel) -> f32 {
        self.data[self.base_index(x, y) + channel.offset()]
    }

    /// Write one channel of pixel `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: f32) {
        let i = self.base_index(x, y) + channel.offset();
        self.data[i] = value;
    }

    /// Set one channel to `value` for every pixel.
    pub fn fill_channel(&mut self, channel: Channel, value: f32) {
        let offset = channel.offset();
        for pixel in self.data.chunks_exact_mut(PIXEL_STRIDE) {
            pixel[offset] = value;
        }
    }

    /// Render the skin, detail and saturation channels as an RGB image for
    /// human inspection, with alpha forced to opaque.
    ///
    /// Values are clamped to [0, 255]; negative detail responses render as 0.
    pub fn to_feature_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width, self.height);
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let i = self.base_index(x, y);
            pixel.0 = [
                clamp_u8(self.data[i + Channel::Skin.offset()]),
                clamp_u8(self.data[i + Channel::Detail.offset()]),
                clamp_u8(self.data[i + Channel::Saturation.offset()]),
                255,
            ];
        }
        out
    }
}

#[inline]
fn clamp_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}
