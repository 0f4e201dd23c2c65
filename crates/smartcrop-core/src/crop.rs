//! Crop rectangles and their scores.

use crate::error::CropError;
use serde::{Deserialize, Serialize};

/// An axis-aligned crop rectangle in the coordinate space of the image it
/// was generated against.
///
/// Width and height are always positive; a zero-area rectangle cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crop {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Crop {
    /// Create a crop rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidParameter`] if `width` or `height` is zero.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::invalid(format!(
                "crop dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Left edge.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Width in pixels, always positive.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, always positive.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Half-open containment test: `x <= px < x + width` and
    /// `y <= py < y + height`.
    #[inline]
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Per-feature score sums for one candidate crop.
///
/// The component sums are unbounded; `total` is the weighted combination
/// normalized by crop area (a density), and is the only field used for
/// ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropScore {
    /// Edge/detail contribution.
    pub detail: f32,
    /// Saturation contribution.
    pub saturation: f32,
    /// Skin-likeness contribution.
    pub skin: f32,
    /// User-boost contribution.
    pub boost: f32,
    /// Area-normalized weighted total used for ranking.
    pub total: f32,
}

/// A candidate crop together with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredCrop {
    pub crop: Crop,
    pub score: CropScore,
}
