//! Image Drawing
//!
//! `drawImage`-style blits between image sources and a canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use simg_codec::DecodedImage;

use crate::canvas::Canvas;
use crate::compositing::{blend_colors, premultiply, unpremultiply};
use crate::image_data::ImageData;

/// Filter used when an image is drawn at a different size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Nearest-neighbour sampling
    Nearest,
    /// Linear interpolation
    #[default]
    Bilinear,
}

impl Smoothing {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
        }
    }
}

/// Anything that can be drawn onto a canvas: straight RGBA8, row-major
pub trait CanvasImageSource {
    fn source_width(&self) -> u32;
    fn source_height(&self) -> u32;
    fn source_data(&self) -> &[u8];
}

impl CanvasImageSource for ImageData {
    fn source_width(&self) -> u32 {
        self.width()
    }

    fn source_height(&self) -> u32 {
        self.height()
    }

    fn source_data(&self) -> &[u8] {
        self.data()
    }
}

impl CanvasImageSource for Canvas {
    fn source_width(&self) -> u32 {
        self.width()
    }

    fn source_height(&self) -> u32 {
        self.height()
    }

    fn source_data(&self) -> &[u8] {
        self.data()
    }
}

impl CanvasImageSource for DecodedImage {
    fn source_width(&self) -> u32 {
        self.width()
    }

    fn source_height(&self) -> u32 {
        self.height()
    }

    fn source_data(&self) -> &[u8] {
        self.pixels()
    }
}

/// Image drawing trait for Canvas
pub trait ImageDrawing {
    /// Draw image at position
    fn draw_image(&mut self, image: &dyn CanvasImageSource, dx: f64, dy: f64);

    /// Draw image with size
    fn draw_image_scaled(&mut self, image: &dyn CanvasImageSource, dx: f64, dy: f64, dwidth: f64, dheight: f64);

    /// Draw image with source and destination rectangles
    #[allow(clippy::too_many_arguments)]
    fn draw_image_full(
        &mut self,
        image: &dyn CanvasImageSource,
        sx: f64, sy: f64, swidth: f64, sheight: f64,
        dx: f64, dy: f64, dwidth: f64, dheight: f64,
    );
}

impl ImageDrawing for Canvas {
    fn draw_image(&mut self, image: &dyn CanvasImageSource, dx: f64, dy: f64) {
        self.draw_image_scaled(image, dx, dy, image.source_width() as f64, image.source_height() as f64);
    }

    fn draw_image_scaled(&mut self, image: &dyn CanvasImageSource, dx: f64, dy: f64, dwidth: f64, dheight: f64) {
        self.draw_image_full(
            image,
            0.0, 0.0, image.source_width() as f64, image.source_height() as f64,
            dx, dy, dwidth, dheight,
        );
    }

    fn draw_image_full(
        &mut self,
        image: &dyn CanvasImageSource,
        sx: f64, sy: f64, swidth: f64, sheight: f64,
        dx: f64, dy: f64, dwidth: f64, dheight: f64,
    ) {
        let Some(region) = crop(image, sx, sy, swidth, sheight) else {
            return;
        };

        let dwidth = dwidth.round();
        let dheight = dheight.round();
        if !(dwidth >= 1.0 && dheight >= 1.0) || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let (dw, dh) = (dwidth as u32, dheight as u32);

        let scaled = if region.dimensions() == (dw, dh) {
            region
        } else {
            resample(region, dw, dh, self.smoothing())
        };

        tracing::trace!(
            src_width = swidth,
            src_height = sheight,
            dest_width = dw,
            dest_height = dh,
            "draw_image"
        );

        let op = self.composite_operation();
        let dest_width = self.width() as i64;
        let dest_height = self.height() as i64;
        let origin_x = dx.round() as i64;
        let origin_y = dy.round() as i64;
        let dest = self.data_mut();

        for (px, py, pixel) in scaled.enumerate_pixels() {
            let x = origin_x + px as i64;
            let y = origin_y + py as i64;
            if x < 0 || y < 0 || x >= dest_width || y >= dest_height {
                continue;
            }

            let idx = ((y * dest_width + x) * 4) as usize;
            let dst = [dest[idx], dest[idx + 1], dest[idx + 2], dest[idx + 3]];
            dest[idx..idx + 4].copy_from_slice(&blend_colors(pixel.0, dst, op));
        }
    }
}

/// Resize in premultiplied space so transparent pixels carry no colour
fn resample(mut region: RgbaImage, width: u32, height: u32, smoothing: Smoothing) -> RgbaImage {
    premultiply(&mut region);
    let mut scaled = imageops::resize(&region, width, height, smoothing.filter());
    unpremultiply(&mut scaled);
    scaled
}

/// Copy the integer source rectangle out of `image`, clipped to its bounds
fn crop(image: &dyn CanvasImageSource, sx: f64, sy: f64, swidth: f64, sheight: f64) -> Option<RgbaImage> {
    let src_width = image.source_width() as i64;
    let src_height = image.source_height() as i64;
    if ![sx, sy, swidth, sheight].iter().all(|v| v.is_finite()) {
        return None;
    }

    let x0 = (sx.round() as i64).clamp(0, src_width);
    let y0 = (sy.round() as i64).clamp(0, src_height);
    let x1 = ((sx + swidth).round() as i64).clamp(0, src_width);
    let y1 = ((sy + sheight).round() as i64).clamp(0, src_height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let data = image.source_data();
    if data.len() != (src_width * src_height * 4) as usize {
        tracing::warn!(
            width = src_width,
            height = src_height,
            len = data.len(),
            "image source data does not match its size"
        );
        return None;
    }
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);

    if (w as i64, h as i64) == (src_width, src_height) {
        return RgbaImage::from_raw(w, h, data.to_vec());
    }

    Some(RgbaImage::from_fn(w, h, |x, y| {
        let idx = (((y0 + y as i64) * src_width + x0 + x as i64) * 4) as usize;
        Rgba([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }))
}
