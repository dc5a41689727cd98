//! Image decoder for various formats
//!
//! Supports PNG, JPEG, GIF, WebP via the image crate.

use std::io::Cursor;

use image::DynamicImage;

use crate::{CodecError, ImageFormat};

/// A decoded image as straight (non-premultiplied) RGBA8.
///
/// `pixels().len()` is always `width * height * 4`.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl DecodedImage {
    /// Create from raw RGBA data
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CodecError::DecodeFailed(format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
            format: ImageFormat::Unknown,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format the bytes were decoded from
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// RGBA pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Image decoder
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode image from bytes, sniffing the format
    pub fn decode(data: &[u8]) -> Result<DecodedImage, CodecError> {
        Self::decode_with_hint(data, ImageFormat::Unknown)
    }

    /// Decode image from bytes, falling back to `hint` when sniffing fails
    pub fn decode_with_hint(data: &[u8], hint: ImageFormat) -> Result<DecodedImage, CodecError> {
        let format = match ImageFormat::from_bytes(data) {
            ImageFormat::Unknown => hint,
            sniffed => sniffed,
        };
        Self::decode_with_format(data, format)
    }

    /// Decode with known format
    pub fn decode_with_format(data: &[u8], format: ImageFormat) -> Result<DecodedImage, CodecError> {
        let img_format = format.to_image_format()
            .ok_or(CodecError::UnsupportedFormat)?;

        let img = image::load(Cursor::new(data), img_format)
            .map_err(|e| CodecError::DecodeFailed(e.to_string()))?;

        let decoded = Self::image_to_decoded(img, format);
        tracing::debug!(
            ?format,
            width = decoded.width,
            height = decoded.height,
            "decoded image"
        );
        Ok(decoded)
    }

    /// Convert DynamicImage to DecodedImage
    fn image_to_decoded(img: DynamicImage, format: ImageFormat) -> DecodedImage {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();

        DecodedImage {
            pixels: rgba.into_raw(),
            width,
            height,
            format,
        }
    }
}
