//! Image encoder
//!
//! Serializes RGBA8 buffers to PNG or JPEG, optionally wrapped in a data URL.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder as _};
use serde::{Deserialize, Serialize};

use crate::{CodecError, DataUrl};

/// JPEG quality used when none (or an out-of-range one) is requested
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Output format for exported images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg {
        /// 1..=100
        quality: u8,
    },
}

impl ExportFormat {
    /// Resolve a requested MIME type and quality.
    ///
    /// Unknown types fall back to PNG; quality is a fraction in `0.0..=1.0`
    /// and only applies to JPEG.
    pub fn from_mime(mime: &str, quality: Option<f64>) -> Self {
        if mime.trim().eq_ignore_ascii_case("image/jpeg") {
            let quality = quality
                .filter(|q| (0.0..=1.0).contains(q))
                .map(|q| ((q * 100.0).round() as u8).max(1))
                .unwrap_or(DEFAULT_JPEG_QUALITY);
            Self::Jpeg { quality }
        } else {
            Self::Png
        }
    }

    /// MIME type written into data URLs
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Image encoder
pub struct ImageEncoder;

impl ImageEncoder {
    /// Encode straight RGBA8 pixels
    pub fn encode(
        pixels: &[u8],
        width: u32,
        height: u32,
        format: ExportFormat,
    ) -> Result<Vec<u8>, CodecError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CodecError::EncodeFailed(format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                pixels.len()
            )));
        }

        let mut out = Vec::new();
        match format {
            ExportFormat::Png => {
                PngEncoder::new(&mut out)
                    .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| CodecError::EncodeFailed(e.to_string()))?;
            }
            ExportFormat::Jpeg { quality } => {
                // JPEG has no alpha: composite onto opaque black
                let rgb: Vec<u8> = pixels
                    .chunks_exact(4)
                    .flat_map(|p| {
                        let a = p[3] as u32;
                        [0, 1, 2].map(|i| ((p[i] as u32 * a + 127) / 255) as u8)
                    })
                    .collect();
                JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                    .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| CodecError::EncodeFailed(e.to_string()))?;
            }
        }

        tracing::trace!(?format, width, height, bytes = out.len(), "encoded image");
        Ok(out)
    }

    /// Encode straight RGBA8 pixels into a `data:` URL
    pub fn encode_data_url(
        pixels: &[u8],
        width: u32,
        height: u32,
        format: ExportFormat,
    ) -> Result<String, CodecError> {
        let bytes = Self::encode(pixels, width, height, format)?;
        Ok(DataUrl::new(format.mime_type(), bytes).to_string())
    }
}
