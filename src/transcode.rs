//! Image transcoding: palette-indexed rasters to descriptors and PNG.

use crate::types::{Area, Bitmap, Palette};
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;

/// Palette index rendered fully transparent.
pub const TRANSPARENT_INDEX: u8 = 0;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Formats a raster can be transcoded into on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 1] = [ImageFormat::Png];

    /// Path segment and relation name of the format.
    pub fn tag(self) -> &'static str {
        match self {
            ImageFormat::Png => crate::protocol::rel::PNG,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
        }
    }
}

/// Hotspot rectangle and available formats; no pixels are decoded.
pub fn describe(bitmap: &Bitmap) -> (Area, &'static [ImageFormat]) {
    (bitmap.hotspot, &ImageFormat::ALL)
}

/// Map every index through `palette` into a true-color raster.
pub fn to_rgba(bitmap: &Bitmap, palette: &Palette) -> RgbaImage {
    RgbaImage::from_fn(bitmap.width, bitmap.height, |x, y| {
        let index = bitmap.index_at(x, y);
        let [r, g, b] = palette.rgb(index);
        let alpha = if index == TRANSPARENT_INDEX { 0 } else { 255 };
        Rgba([r, g, b, alpha])
    })
}

/// Encode a fully resolved raster. The whole image is produced in memory so
/// a failure never leaves a partial body behind.
pub fn render_png(bitmap: &Bitmap, palette: &Palette) -> Result<Vec<u8>, TranscodeError> {
    let rgba = to_rgba(bitmap, palette);
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}
