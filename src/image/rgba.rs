//! Packed RGBA float image: finished panoramas, debug blend buffers and
//! rendered tiles before they become a [`TileBuffer`](super::TileBuffer).

use super::color::LinearColor;
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageRgbaF32 {
    pub w: usize,
    pub h: usize,
    /// Row-major pixels, `w * h` of them with no row padding.
    pub data: Vec<LinearColor>,
}

impl ImageRgbaF32 {
    /// Transparent black image.
    pub fn new(w: usize, h: usize) -> Self {
        Self::from_vec(w, h, vec![LinearColor::TRANSPARENT; w * h])
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<LinearColor>) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }

    /// Evaluate `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> LinearColor) -> Self {
        let data = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> LinearColor {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: LinearColor) {
        self.data[y * self.w + x] = v;
    }
}

impl ImageView for ImageRgbaF32 {
    type Pixel = LinearColor;

    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    #[inline]
    fn row(&self, y: usize) -> &[LinearColor] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    fn contiguous(&self) -> Option<&[LinearColor]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageRgbaF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [LinearColor] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }

    fn contiguous_mut(&mut self) -> Option<&mut [LinearColor]> {
        Some(&mut self.data)
    }
}
