//! simg
//!
//! Pixel-level image manipulation.
//!
//! Build a [`SimpleImage`] from a size, a data URL, a path, a [`File`], a
//! decoded [`ImageHandle`], a [`Canvas`] or another image. Then read and write
//! channels per pixel, resize it, and export it as a data URL or draw it onto
//! another canvas.
//!
//! # Example
//! ```rust,ignore
//! use simg::SimpleImage;
//!
//! smol::block_on(async {
//!     let image = SimpleImage::load("photo.png").await?;
//!     for pixel in image.pixels()? {
//!         pixel.set_red(255 - pixel.red()?)?;
//!     }
//!     let url = image.to_data_url()?;
//!     Ok::<_, simg::ImageError>(())
//! });
//! ```

mod config;
mod error;
pub mod file;
mod image;
pub mod loader;
mod pixel;
mod source;

pub use config::Config;
pub use error::ImageError;
pub use file::File;
pub use image::SimpleImage;
pub use loader::{ImageHandle, make_image, make_image_from_file, make_image_from_size};
pub use pixel::{Channel, SimplePixel};
pub use source::ImageSource;

// Re-export sub-crates for advanced usage
pub use simg_canvas as canvas;
pub use simg_codec as codec;

pub use simg_canvas::{Canvas, ExportFormat, ImageData, Smoothing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
