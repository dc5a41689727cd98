//! Image formats
//!
//! Detection from magic bytes, file extensions and MIME types.

use image::ImageFormat as ImgFormat;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Unknown,
}

impl ImageFormat {
    /// Sniff the format from leading magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        image::guess_format(data).map_or(Self::Unknown, Self::from_image_format)
    }

    /// Format for a file extension, without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        ImgFormat::from_extension(ext.to_ascii_lowercase()).map_or(Self::Unknown, Self::from_image_format)
    }

    /// Format for a MIME type such as `image/png`; parameters are ignored
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            // Non-standard alias some encoders emit
            "image/jpg" => Self::Jpeg,
            other => ImgFormat::from_mime_type(other).map_or(Self::Unknown, Self::from_image_format),
        }
    }

    /// MIME type for this format
    pub fn mime_type(self) -> &'static str {
        match self.to_image_format() {
            Some(format) => format.to_mime_type(),
            None => "application/octet-stream",
        }
    }

    /// Narrow an `image` crate format to the ones this codec decodes
    fn from_image_format(format: ImgFormat) -> Self {
        match format {
            ImgFormat::Png => Self::Png,
            ImgFormat::Jpeg => Self::Jpeg,
            ImgFormat::Gif => Self::Gif,
            ImgFormat::WebP => Self::WebP,
            _ => Self::Unknown,
        }
    }

    pub(crate) fn to_image_format(self) -> Option<ImgFormat> {
        Some(match self {
            Self::Png => ImgFormat::Png,
            Self::Jpeg => ImgFormat::Jpeg,
            Self::Gif => ImgFormat::Gif,
            Self::WebP => ImgFormat::WebP,
            Self::Unknown => return None,
        })
    }
}
