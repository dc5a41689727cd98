//! ImageData
//!
//! Pixel data snapshot detached from a canvas.

use crate::CanvasError;

/// ImageData - raw RGBA pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Create new transparent ImageData with specified dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![0u8; width as usize * height as usize * 4];
        Self { data, width, height }
    }

    /// Create from existing data
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CanvasError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CanvasError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Get width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Take the pixel data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]])
    }

    /// Set pixel at (x, y); ignored outside the bounds
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            self.data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
}
