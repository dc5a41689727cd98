//! Canvas
//!
//! Owned RGBA raster with `getImageData`/`putImageData` and export.

use simg_codec::{DataUrl, ExportFormat, ImageEncoder};

use crate::compositing::CompositeOperation;
use crate::drawing::Smoothing;
use crate::image_data::ImageData;
use crate::CanvasError;

/// In-memory drawing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Canvas width
    width: u32,
    /// Canvas height
    height: u32,
    /// Pixel data (straight RGBA)
    data: Vec<u8>,
    smoothing: Smoothing,
    composite_operation: CompositeOperation,
}

impl Canvas {
    /// Create a new transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![0u8; width as usize * height as usize * 4];
        Self {
            width,
            height,
            data,
            smoothing: Smoothing::default(),
            composite_operation: CompositeOperation::default(),
        }
    }

    /// Create a canvas holding the given pixels
    pub fn from_image_data(image: ImageData) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.into_data(),
            smoothing: Smoothing::default(),
            composite_operation: CompositeOperation::default(),
        }
    }

    /// Get canvas width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable pixel data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]])
    }

    /// Resize the canvas, clearing its content
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0u8; width as usize * height as usize * 4];
    }

    /// Filter used by scaled draws
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoothing = smoothing;
    }

    /// Composite operation used by draws
    pub fn composite_operation(&self) -> CompositeOperation {
        self.composite_operation
    }

    pub fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.composite_operation = op;
    }

    /// Read a rectangle of pixels; areas outside the canvas read as transparent black
    pub fn get_image_data(&self, sx: i64, sy: i64, sw: u32, sh: u32) -> Result<ImageData, CanvasError> {
        if sw == 0 || sh == 0 {
            return Err(CanvasError::IndexSize(format!(
                "source width and height must be non-zero, got {}x{}",
                sw, sh
            )));
        }

        let mut out = ImageData::new(sw, sh);
        let row_len = sw as usize * 4;
        for row in 0..sh as i64 {
            let y = sy + row;
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            let x0 = sx.max(0);
            let x1 = (sx + sw as i64).min(self.width as i64);
            if x1 <= x0 {
                continue;
            }

            let src = ((y * self.width as i64 + x0) * 4) as usize;
            let dst = row as usize * row_len + ((x0 - sx) * 4) as usize;
            let len = ((x1 - x0) * 4) as usize;
            out.data_mut()[dst..dst + len].copy_from_slice(&self.data[src..src + len]);
        }

        Ok(out)
    }

    /// Write pixels back, replacing (not blending) the covered area
    pub fn put_image_data(&mut self, image: &ImageData, dx: i64, dy: i64) {
        self.put_image_data_dirty(image, dx, dy, 0, 0, image.width() as i64, image.height() as i64);
    }

    /// Write only the dirty rectangle of `image` back
    #[allow(clippy::too_many_arguments)]
    pub fn put_image_data_dirty(
        &mut self,
        image: &ImageData,
        dx: i64, dy: i64,
        dirty_x: i64, dirty_y: i64, dirty_width: i64, dirty_height: i64,
    ) {
        // Negative dirty sizes extend to the left/top
        let (dirty_x, dirty_width) = if dirty_width < 0 {
            (dirty_x + dirty_width, -dirty_width)
        } else {
            (dirty_x, dirty_width)
        };
        let (dirty_y, dirty_height) = if dirty_height < 0 {
            (dirty_y + dirty_height, -dirty_height)
        } else {
            (dirty_y, dirty_height)
        };

        let x0 = dirty_x.max(0).max(-dx);
        let y0 = dirty_y.max(0).max(-dy);
        let x1 = (dirty_x + dirty_width).min(image.width() as i64).min(self.width as i64 - dx);
        let y1 = (dirty_y + dirty_height).min(image.height() as i64).min(self.height as i64 - dy);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        tracing::trace!(dx, dy, width = x1 - x0, height = y1 - y0, "put_image_data");

        let src_width = image.width() as i64;
        let len = ((x1 - x0) * 4) as usize;
        for y in y0..y1 {
            let src = ((y * src_width + x0) * 4) as usize;
            let dst = (((y + dy) * self.width as i64 + x0 + dx) * 4) as usize;
            self.data[dst..dst + len].copy_from_slice(&image.data()[src..src + len]);
        }
    }

    /// Encode the canvas in the given format
    pub fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, CanvasError> {
        Ok(ImageEncoder::encode(&self.data, self.width, self.height, format)?)
    }

    /// Serialize as a PNG data URL
    pub fn to_data_url(&self) -> Result<String, CanvasError> {
        self.to_data_url_with(ExportFormat::Png)
    }

    /// Serialize as a data URL of the given format
    pub fn to_data_url_with(&self, format: ExportFormat) -> Result<String, CanvasError> {
        if self.width == 0 || self.height == 0 {
            // Browsers return this for empty canvases
            return Ok("data:,".to_string());
        }
        let bytes = self.encode(format)?;
        Ok(DataUrl::new(format.mime_type(), bytes).to_string())
    }

    /// Serialize as a data URL, resolving the type like `toDataURL(type, quality)`
    pub fn to_data_url_as(&self, mime: &str, quality: Option<f64>) -> Result<String, CanvasError> {
        self.to_data_url_with(ExportFormat::from_mime(mime, quality))
    }
}
