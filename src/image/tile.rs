//! Rendered tile pixel storage.
//!
//! Renderers hand over either half- or full-precision RGBA. The two
//! encodings live in a tagged enum and convert to [`LinearColor`] per tap, so
//! the resampler never inspects buffer types at runtime.

use super::color::LinearColor;
use super::rgba::ImageRgbaF32;
use crate::error::{Result, StitchError};
use half::f16;
use serde::{Deserialize, Serialize};

/// Channel encodings a renderer may report for raw readback bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelEncoding {
    /// 8-bit RGBA; not accepted for blending.
    Rgba8,
    /// Four little-endian IEEE half floats per pixel.
    Rgba16F,
    /// Four little-endian IEEE single floats per pixel.
    Rgba32F,
}

impl PixelEncoding {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelEncoding::Rgba8 => 4,
            PixelEncoding::Rgba16F => 8,
            PixelEncoding::Rgba32F => 16,
        }
    }
}

#[derive(Clone, Debug)]
pub enum TilePixels {
    F16(Vec<[f16; 4]>),
    F32(Vec<LinearColor>),
}

/// Dense row-major linear-colour tile as produced by the renderer.
#[derive(Clone, Debug)]
pub struct TileBuffer {
    width: usize,
    height: usize,
    pixels: TilePixels,
}

impl TileBuffer {
    /// Wrap decoded pixels, checking that the pixel count matches the size.
    pub fn new(width: usize, height: usize, pixels: TilePixels) -> Result<Self> {
        let len = match &pixels {
            TilePixels::F16(p) => p.len(),
            TilePixels::F32(p) => p.len(),
        };
        if len != width * height {
            return Err(StitchError::BufferLength {
                expected: width * height,
                actual: len,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode raw little-endian readback bytes.
    pub fn from_bytes(
        width: usize,
        height: usize,
        encoding: PixelEncoding,
        bytes: &[u8],
    ) -> Result<Self> {
        let expected = width * height * encoding.bytes_per_pixel();
        if bytes.len() != expected {
            return Err(StitchError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = match encoding {
            PixelEncoding::Rgba8 => return Err(StitchError::UnsupportedEncoding(encoding)),
            PixelEncoding::Rgba16F => TilePixels::F16(
                bytes
                    .chunks_exact(8)
                    .map(|px| {
                        let ch = |i: usize| f16::from_le_bytes([px[2 * i], px[2 * i + 1]]);
                        [ch(0), ch(1), ch(2), ch(3)]
                    })
                    .collect(),
            ),
            PixelEncoding::Rgba32F => TilePixels::F32(
                bytes
                    .chunks_exact(16)
                    .map(|px| {
                        let ch = |i: usize| {
                            f32::from_le_bytes([px[4 * i], px[4 * i + 1], px[4 * i + 2], px[4 * i + 3]])
                        };
                        LinearColor::new(ch(0), ch(1), ch(2), ch(3))
                    })
                    .collect(),
            ),
        };
        Self::new(width, height, pixels)
    }

    /// Single-colour tile, handy for coverage checks.
    pub fn uniform(width: usize, height: usize, color: LinearColor) -> Self {
        Self {
            width,
            height,
            pixels: TilePixels::F32(vec![color; width * height]),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn encoding(&self) -> PixelEncoding {
        match self.pixels {
            TilePixels::F16(_) => PixelEncoding::Rgba16F,
            TilePixels::F32(_) => PixelEncoding::Rgba32F,
        }
    }

    /// Canonical colour at integer pixel `(x, y)`; callers keep indices in range.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> LinearColor {
        let i = y * self.width + x;
        match &self.pixels {
            TilePixels::F16(p) => LinearColor::from_f16(p[i]),
            TilePixels::F32(p) => p[i],
        }
    }

    /// Re-encode as half floats, as GPU readbacks usually arrive.
    pub fn to_f16(&self) -> Self {
        let pixels = match &self.pixels {
            TilePixels::F16(p) => TilePixels::F16(p.clone()),
            TilePixels::F32(p) => TilePixels::F16(
                p.iter()
                    .map(|c| c.to_array().map(f16::from_f32))
                    .collect(),
            ),
        };
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

impl From<ImageRgbaF32> for TileBuffer {
    fn from(img: ImageRgbaF32) -> Self {
        Self {
            width: img.w,
            height: img.h,
            pixels: TilePixels::F32(img.data),
        }
    }
}
