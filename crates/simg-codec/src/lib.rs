//! simg Codec
//!
//! Encoding and decoding primitives shared by the simg crates.
//!
//! Features:
//! - Base64 (standard alphabet, padded)
//! - `data:` URL parsing and formatting
//! - Image format sniffing
//! - Decoding to RGBA8 and encoding to PNG/JPEG via the `image` crate

pub mod base64;
pub mod data_url;
pub mod format;
pub mod decoder;
pub mod encoder;

pub use data_url::{DataUrl, is_data_url};
pub use format::ImageFormat;
pub use decoder::{DecodedImage, ImageDecoder};
pub use encoder::{ExportFormat, ImageEncoder};

/// Codec error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid base64 byte {byte:#04x} at offset {offset}")]
    InvalidBase64 { byte: u8, offset: usize },

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}
