//! Error types

use simg_canvas::CanvasError;
use simg_codec::CodecError;

use crate::file::FileReaderError;

/// Errors raised by image construction, access and export
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImageError {
    #[error("Width must be greater than 0, got {0}")]
    InvalidWidth(f64),

    #[error("Height must be provided")]
    MissingHeight,

    #[error("Height must be greater than 0, got {0}")]
    InvalidHeight(f64),

    #[error("Unrecognized values used to create a SimpleImage: {0}")]
    UnrecognizedSource(String),

    #[error("Cannot set size to {width}x{height}: width and height must be greater than 0")]
    InvalidSize { width: f64, height: f64 },

    #[error("Image size {width}x{height} exceeds the maximum dimension {max}")]
    TooLarge { width: u64, height: u64, max: u32 },

    #[error("Image is not ready")]
    NotReady,

    #[error("Pixel ({x}, {y}) is outside the image")]
    OutOfBounds { x: f64, y: f64 },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error(transparent)]
    File(#[from] FileReaderError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

impl ImageError {
    pub(crate) fn read(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
