//! Compositing Operations
//!
//! Composite operations applied when drawing images onto a canvas.

use std::str::FromStr;

use crate::CanvasError;

/// Composite operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeOperation {
    #[default]
    SourceOver,
    Copy,
}

impl FromStr for CompositeOperation {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source-over" => Ok(Self::SourceOver),
            "copy" => Ok(Self::Copy),
            _ => Err(CanvasError::UnknownCompositeOperation(s.to_string())),
        }
    }
}

impl CompositeOperation {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::Copy => "copy",
        }
    }
}

/// Blend a straight-alpha source pixel onto a destination pixel
pub fn blend_colors(src: [u8; 4], dst: [u8; 4], op: CompositeOperation) -> [u8; 4] {
    match op {
        CompositeOperation::Copy => src,
        CompositeOperation::SourceOver => {
            // Exact fast paths keep untouched pixels bit-identical
            if src[3] == 255 || dst[3] == 0 {
                return src;
            }
            if src[3] == 0 {
                return dst;
            }

            let sa = src[3] as f64 / 255.0;
            let da = dst[3] as f64 / 255.0;
            let a = sa + da * (1.0 - sa);

            let channel = |s: u8, d: u8| {
                let s = s as f64 / 255.0;
                let d = d as f64 / 255.0;
                (((s * sa + d * da * (1.0 - sa)) / a) * 255.0).round() as u8
            };

            [
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                (a * 255.0).round() as u8,
            ]
        }
    }
}

/// Scale colour channels by alpha in place
pub fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        for c in &mut px[..3] {
            *c = ((*c as u32 * a + 127) / 255) as u8;
        }
    }
}

/// Undo [`premultiply`]; fully transparent pixels become transparent black
pub fn unpremultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
