//! Pixel accessor

use crate::image::SimpleImage;
use crate::ImageError;

/// One colour channel of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl Channel {
    /// All channels in buffer order
    pub const ALL: [Channel; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// Byte offset within a pixel
    pub fn offset(self) -> usize {
        self as usize
    }
}

/// A live view of one pixel of a [`SimpleImage`].
///
/// Holds no pixel data: every read and write goes straight to the image.
#[derive(Debug, Clone, Copy)]
pub struct SimplePixel<'a> {
    image: &'a SimpleImage,
    x: f64,
    y: f64,
}

impl<'a> SimplePixel<'a> {
    pub(crate) fn new(image: &'a SimpleImage, x: f64, y: f64) -> Self {
        Self { image, x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn red(&self) -> Result<u8, ImageError> {
        self.image.red(self.x, self.y)
    }

    pub fn set_red(&self, value: impl Into<f64>) -> Result<(), ImageError> {
        self.image.set_red(self.x, self.y, value)
    }

    pub fn green(&self) -> Result<u8, ImageError> {
        self.image.green(self.x, self.y)
    }

    pub fn set_green(&self, value: impl Into<f64>) -> Result<(), ImageError> {
        self.image.set_green(self.x, self.y, value)
    }

    pub fn blue(&self) -> Result<u8, ImageError> {
        self.image.blue(self.x, self.y)
    }

    pub fn set_blue(&self, value: impl Into<f64>) -> Result<(), ImageError> {
        self.image.set_blue(self.x, self.y, value)
    }

    pub fn alpha(&self) -> Result<u8, ImageError> {
        self.image.alpha(self.x, self.y)
    }

    pub fn set_alpha(&self, value: impl Into<f64>) -> Result<(), ImageError> {
        self.image.set_alpha(self.x, self.y, value)
    }

    /// All four channels, red first
    pub fn rgba(&self) -> Result<[u8; 4], ImageError> {
        Ok([self.red()?, self.green()?, self.blue()?, self.alpha()?])
    }

    /// Copy the current channel values of `pixel` into this pixel
    pub fn set_all_from(&self, pixel: &SimplePixel<'_>) -> Result<(), ImageError> {
        self.set_red(pixel.red()?)?;
        self.set_green(pixel.green()?)?;
        self.set_blue(pixel.blue()?)?;
        self.set_alpha(pixel.alpha()?)
    }
}
