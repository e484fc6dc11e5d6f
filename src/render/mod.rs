//! Tile producers.
//!
//! Real tiles come from an external renderer; [`PaneRenderer`] is the seam it
//! plugs into. [`EnvironmentRenderer`] renders a pane by looking up a
//! direction-to-colour function per pixel, which gives demos and tests a
//! scene whose exact panorama is known.

use crate::image::{ImageRgbaF32, ImageViewMut, LinearColor, PixelEncoding, TileBuffer};
use crate::layout::Pane;
use crate::resample::PaneProjector;
use nalgebra::Vector3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Produces the pixels of one pane.
pub trait PaneRenderer: Send + Sync {
    fn render(&self, pane: &Pane) -> TileBuffer;
}

/// Renders an infinitely distant environment given as a function of the
/// world-space view direction (x-forward, y-right, z-up).
pub struct EnvironmentRenderer<F> {
    environment: F,
    encoding: PixelEncoding,
}

impl<F> EnvironmentRenderer<F>
where
    F: Fn(&Vector3<f32>) -> LinearColor + Send + Sync,
{
    pub fn new(environment: F) -> Self {
        Self {
            environment,
            encoding: PixelEncoding::Rgba32F,
        }
    }

    /// Emit tiles with half-float channels instead of `f32`.
    pub fn with_half_float(mut self) -> Self {
        self.encoding = PixelEncoding::Rgba16F;
        self
    }

    fn fill_row(&self, projector: &PaneProjector, pane: &Pane, y: usize, row: &mut [LinearColor]) {
        let camera = pane.camera.rotation.to_quat();
        for (x, px) in row.iter_mut().enumerate() {
            let dir = camera * projector.unproject_local(x, y);
            *px = (self.environment)(&dir);
        }
    }
}

impl<F> PaneRenderer for EnvironmentRenderer<F>
where
    F: Fn(&Vector3<f32>) -> LinearColor + Send + Sync,
{
    fn render(&self, pane: &Pane) -> TileBuffer {
        let (w, h) = pane.resolution;
        let projector = PaneProjector::new(pane);
        let mut image = ImageRgbaF32::new(w, h);

        #[cfg(feature = "parallel")]
        {
            if let Some(pixels) = image.contiguous_mut().filter(|_| w > 0) {
                pixels
                    .par_chunks_mut(w)
                    .enumerate()
                    .for_each(|(y, row)| self.fill_row(&projector, pane, y, row));
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            for y in 0..h {
                self.fill_row(&projector, pane, y, image.row_mut(y));
            }
        }

        let tile = TileBuffer::from(image);
        match self.encoding {
            PixelEncoding::Rgba16F => tile.to_f16(),
            _ => tile,
        }
    }
}

/// Smooth sky: colour channels follow the direction components, so every
/// direction has a distinct colour and bilinear resampling is near exact.
pub fn direction_gradient(dir: &Vector3<f32>) -> LinearColor {
    LinearColor::new(
        0.5 + 0.5 * dir.x,
        0.5 + 0.5 * dir.y,
        0.5 + 0.5 * dir.z,
        1.0,
    )
}
