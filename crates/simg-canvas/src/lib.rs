//! simg Canvas
//!
//! An in-memory 2D drawing surface for the simg object model.
//!
//! Features:
//! - Canvas (owned RGBA raster)
//! - ImageData
//! - Scaled image drawing with optional smoothing
//! - Source-over and copy compositing
//! - Export to data URLs

pub mod canvas;
pub mod compositing;
pub mod drawing;
pub mod image_data;

pub use canvas::Canvas;
pub use compositing::{CompositeOperation, blend_colors, premultiply, unpremultiply};
pub use drawing::{CanvasImageSource, ImageDrawing, Smoothing};
pub use image_data::ImageData;

pub use simg_codec::ExportFormat;

/// Canvas error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    #[error("Index size error: {0}")]
    IndexSize(String),

    #[error("Unknown composite operation: {0}")]
    UnknownCompositeOperation(String),

    #[error(transparent)]
    Codec(#[from] simg_codec::CodecError),
}
