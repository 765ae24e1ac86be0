use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

/// A decoded raster image held entirely in memory.
///
/// Fields:
/// - `width`  — pixel columns
/// - `height` — pixel rows
/// - `data`   — interleaved RGBA bytes, row-major, 8 bits per channel;
///              always exactly `width * height * 4` bytes long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Builds a bitmap from raw RGBA bytes.
    ///
    /// Panics if `data` does not hold exactly `width * height * 4` bytes;
    /// callers constructing bitmaps by hand (tests, converters) own that
    /// invariant.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Bitmap {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 4,
            "RGBA buffer length must match dimensions"
        );
        Bitmap { width, height, data }
    }

    /// Converts any decoded `image` crate value into an RGBA bitmap.
    pub fn from_dynamic(img: &DynamicImage) -> Bitmap {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Bitmap { width, height, data: rgba.into_raw() }
    }

    /// Returns the `(r, g, b, a)` channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        (self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Encodes the bitmap as PNG bytes, e.g. for embedding in a data URI.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, image::ImageError> {
        let img = RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }
}
