//! Row-oriented access to float images.
//!
//! Finished panoramas are walked row by row when encoded, and renderers fill
//! tiles row by row, possibly from several threads at once through
//! [`ImageViewMut::contiguous_mut`].

use std::ops::Range;

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn row(&self, y: usize) -> &[Self::Pixel];

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Self::Pixel {
        self.row(y)[x]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows {
            image: self,
            remaining: 0..self.height(),
        }
    }

    /// All pixels in row-major order, when rows are packed back to back.
    fn contiguous(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn contiguous_mut(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }

    fn fill(&mut self, value: Self::Pixel) {
        for y in 0..self.height() {
            self.row_mut(y).fill(value);
        }
    }
}

/// Iterator over the rows of an [`ImageView`], top to bottom.
pub struct Rows<'a, I: ?Sized> {
    image: &'a I,
    remaining: Range<usize>,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.image;
        self.remaining.next().map(|y| image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

impl<I: ImageView> ExactSizeIterator for Rows<'_, I> {}
