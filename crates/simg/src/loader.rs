//! Image loading
//!
//! Turns URLs, files and sizes into decoded [`ImageHandle`]s.

use std::path::Path;

use simg_canvas::CanvasImageSource;
use simg_codec::{DataUrl, DecodedImage, ImageDecoder, ImageFormat, is_data_url};
use url::Url;

use crate::ImageError;
use crate::file::{File, FileReader};

/// 1x1 opaque black PNG used by [`make_image_from_size`]
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNgYGD4DwABBAEAgLvRWwAAAABJRU5ErkJggg==";

/// A decoded image with overridable declared dimensions
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: DecodedImage,
    width: u32,
    height: u32,
}

impl ImageHandle {
    /// Wrap a decoded image; declared size starts at the natural size
    pub fn new(image: DecodedImage) -> Self {
        let (width, height) = (image.width(), image.height());
        Self { image, width, height }
    }

    /// Decode an encoded image held in memory
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        Ok(Self::new(ImageDecoder::decode(bytes)?))
    }

    /// Decoded width
    pub fn natural_width(&self) -> u32 {
        self.image.width()
    }

    /// Decoded height
    pub fn natural_height(&self) -> u32 {
        self.image.height()
    }

    /// Declared width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Override the declared width; the pixels are untouched
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Override the declared height; the pixels are untouched
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Width of a surface built from this image
    pub fn layout_width(&self) -> u32 {
        self.natural_width().max(self.width)
    }

    /// Height of a surface built from this image
    pub fn layout_height(&self) -> u32 {
        self.natural_height().max(self.height)
    }

    pub fn format(&self) -> ImageFormat {
        self.image.format()
    }

    /// Decoded RGBA pixels at the natural size
    pub fn pixels(&self) -> &[u8] {
        self.image.pixels()
    }
}

impl CanvasImageSource for ImageHandle {
    fn source_width(&self) -> u32 {
        self.natural_width()
    }

    fn source_height(&self) -> u32 {
        self.natural_height()
    }

    fn source_data(&self) -> &[u8] {
        self.pixels()
    }
}

/// Load and decode an image from a data URL, `file:` URL or filesystem path
pub async fn make_image(url: &str) -> Result<ImageHandle, ImageError> {
    let (bytes, hint) = fetch(url).await?;
    let decoded = smol::unblock(move || ImageDecoder::decode_with_hint(&bytes, hint)).await?;
    Ok(ImageHandle::new(decoded))
}

/// Read a file as a data URL, then load it like any other URL
pub async fn make_image_from_file(file: &File) -> Result<ImageHandle, ImageError> {
    let url = FileReader::new().read_as_data_url(file).await?;
    make_image(&url).await
}

/// Decode the placeholder image and declare it to be `width` x `height`
pub async fn make_image_from_size(width: u32, height: u32) -> Result<ImageHandle, ImageError> {
    let mut image = make_image(PLACEHOLDER_IMAGE).await?;
    image.set_width(width);
    image.set_height(height);
    Ok(image)
}

async fn fetch(url: &str) -> Result<(Vec<u8>, ImageFormat), ImageError> {
    if is_data_url(url) {
        let data_url = DataUrl::parse(url)?;
        let hint = ImageFormat::from_mime(data_url.mime_type());
        return Ok((data_url.into_data(), hint));
    }

    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|()| ImageError::UnrecognizedSource(url.to_string()))?;
            read_path(&path).await
        }
        // Single-letter schemes are Windows drive letters
        Ok(parsed) if parsed.scheme().len() > 1 => {
            Err(ImageError::UnsupportedScheme(parsed.scheme().to_string()))
        }
        _ => read_path(Path::new(url)).await,
    }
}

async fn read_path(path: &Path) -> Result<(Vec<u8>, ImageFormat), ImageError> {
    tracing::debug!(path = %path.display(), "reading image");
    let bytes = smol::fs::read(path)
        .await
        .map_err(|e| ImageError::read(path.display().to_string(), &e))?;
    let hint = path
        .extension()
        .map(|ext| ImageFormat::from_extension(&ext.to_string_lossy()))
        .unwrap_or(ImageFormat::Unknown);
    Ok((bytes, hint))
}
