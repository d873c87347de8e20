//! Image metadata needed to place a picture: bytes, format and pixel size.

use image::ImageReader;
use imgdeck_core::{Emu, Error, ImageFormat, Result};
use std::io::Cursor;
use std::path::Path;

/// Resolution assumed for native picture size.
pub const DEFAULT_DPI: f64 = 72.0;

/// An image file read into memory with its header decoded.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// File bytes, embedded unchanged in the package.
    pub data: Vec<u8>,
    /// Detected format.
    pub format: ImageFormat,
    /// Width in pixels.
    pub px_width: u32,
    /// Height in pixels.
    pub px_height: u32,
    /// File name used as the picture description.
    pub filename: String,
}

impl ImageInfo {
    /// Read an image file and decode its header.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(data, filename)
    }

    /// Decode the header of in-memory image bytes.
    pub fn from_bytes(data: Vec<u8>, filename: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        let unsupported = |reason: String| Error::UnsupportedImage {
            path: filename.clone(),
            reason,
        };

        let reader = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| unsupported(e.to_string()))?;

        let format = match reader.format() {
            Some(image::ImageFormat::Png) => ImageFormat::Png,
            Some(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Some(image::ImageFormat::Gif) => ImageFormat::Gif,
            Some(image::ImageFormat::Bmp) => ImageFormat::Bmp,
            Some(image::ImageFormat::Tiff) => ImageFormat::Tiff,
            Some(other) => {
                return Err(unsupported(format!("{:?} cannot be embedded in a slide", other)))
            }
            None => return Err(unsupported("unrecognized image format".to_string())),
        };

        let (px_width, px_height) = reader
            .into_dimensions()
            .map_err(|e| unsupported(e.to_string()))?;

        if px_width == 0 || px_height == 0 {
            return Err(unsupported("image has no pixels".to_string()));
        }

        Ok(Self {
            data,
            format,
            px_width,
            px_height,
            filename,
        })
    }

    /// Picture size for optional target width and height.
    ///
    /// With one side given the other follows the aspect ratio; with neither
    /// the native size at [`DEFAULT_DPI`] is used.
    pub fn scaled_size(&self, width: Option<Emu>, height: Option<Emu>) -> (Emu, Emu) {
        match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w.scale(self.px_height, self.px_width)),
            (None, Some(h)) => (h.scale(self.px_width, self.px_height), h),
            (None, None) => (
                Emu::from_pixels(self.px_width, DEFAULT_DPI),
                Emu::from_pixels(self.px_height, DEFAULT_DPI),
            ),
        }
    }
}
