//! Image sources
//!
//! Everything a [`SimpleImage`](crate::SimpleImage) can be built from.

use std::path::{Path, PathBuf};

use simg_canvas::Canvas;
use url::Url;

use crate::file::File;
use crate::image::SimpleImage;
use crate::loader::ImageHandle;

/// Source of a new image
#[derive(Debug)]
pub enum ImageSource {
    /// Blank image of the given size; both dimensions must be positive
    Size { width: f64, height: Option<f64> },
    /// Already decoded image
    Image(ImageHandle),
    /// Data URL, `file:` URL or filesystem path
    Url(String),
    /// File contents
    File(File),
    /// Another ready image; its surface is taken over
    SimpleImage(Box<SimpleImage>),
    /// Existing drawing surface
    Canvas(Canvas),
}

impl ImageSource {
    /// Size source without a height, which is rejected at construction
    pub fn width_only(width: f64) -> Self {
        Self::Size { width, height: None }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Size { .. } => "size",
            Self::Image(_) => "image",
            Self::Url(_) => "url",
            Self::File(_) => "file",
            Self::SimpleImage(_) => "simple-image",
            Self::Canvas(_) => "canvas",
        }
    }
}

impl From<(u32, u32)> for ImageSource {
    fn from((width, height): (u32, u32)) -> Self {
        Self::Size { width: width as f64, height: Some(height as f64) }
    }
}

impl From<(i32, i32)> for ImageSource {
    fn from((width, height): (i32, i32)) -> Self {
        Self::Size { width: width as f64, height: Some(height as f64) }
    }
}

impl From<(f64, f64)> for ImageSource {
    fn from((width, height): (f64, f64)) -> Self {
        Self::Size { width, height: Some(height) }
    }
}

impl From<ImageHandle> for ImageSource {
    fn from(image: ImageHandle) -> Self {
        Self::Image(image)
    }
}

impl From<&str> for ImageSource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for ImageSource {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Url(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl From<Url> for ImageSource {
    fn from(url: Url) -> Self {
        Self::Url(url.into())
    }
}

impl From<File> for ImageSource {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<SimpleImage> for ImageSource {
    fn from(image: SimpleImage) -> Self {
        Self::SimpleImage(Box::new(image))
    }
}

impl From<Canvas> for ImageSource {
    fn from(canvas: Canvas) -> Self {
        Self::Canvas(canvas)
    }
}
