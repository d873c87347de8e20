//! Units and formats shared by the deck builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// A length in English Metric Units, the unit used by OOXML drawing markup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU, truncating toward zero.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64) as i64)
    }

    /// Convert a pixel count at the given resolution to EMU.
    pub fn from_pixels(pixels: u32, dpi: f64) -> Self {
        Self::from_inches(pixels as f64 / dpi)
    }

    /// This length in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    /// Scale this length by `num / den`, rounding to the nearest EMU.
    pub fn scale(self, num: u32, den: u32) -> Self {
        if den == 0 {
            return self;
        }
        Self((self.0 as f64 * num as f64 / den as f64).round() as i64)
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raster image formats that can be embedded in a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// MIME type used in `[Content_Types].xml`.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Extension used for media part names.
    pub fn part_extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }
}
