//! Per-tile intermediate blend buffer.
//!
//! A tile is resampled into a private buffer sized to its output rectangle
//! only, holding weighted colour and weight sums. Nothing here touches shared
//! state, so any number of tiles can be blended concurrently; the frame
//! accumulator merges the result under its buffer lock afterwards.

use super::bilinear::sample_bilinear;
use super::bounds::{pane_output_rect, OutputRect};
use super::projector::PaneProjector;
use super::weight::{angular_weight, Falloff, DEFAULT_WEIGHT_EPSILON};
use crate::geometry::{direction_from_angles, EquirectGrid};
use crate::image::{ImageRgbaF32, LinearColor, TileBuffer};
use crate::layout::Pane;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Knobs for resampling a single tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendSettings {
    pub falloff: Falloff,
    /// Squared weights at or below this are skipped.
    pub weight_epsilon: f32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            falloff: Falloff::Squared,
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
        }
    }
}

/// Weighted colour and weight sums of one tile over its output rectangle.
#[derive(Clone, Debug)]
pub struct IntermediateBlend {
    pub rect: OutputRect,
    pub eye_index: i32,
    pub color: Vec<LinearColor>,
    pub weight: Vec<f32>,
    /// Pixels that received a non-zero contribution.
    pub touched: usize,
}

impl IntermediateBlend {
    /// Iterate `(map_x, map_y, color, weight)` for every rectangle pixel,
    /// with columns wrapped into `grid` and rows local to one eye.
    pub fn contributions<'a>(
        &'a self,
        grid: &'a EquirectGrid,
    ) -> impl Iterator<Item = (usize, usize, LinearColor, f32)> + 'a {
        let width = self.rect.width();
        self.color
            .iter()
            .zip(self.weight.iter())
            .enumerate()
            .map(move |(i, (&c, &w))| {
                let x = self.rect.x_min + (i % width) as i64;
                let y = self.rect.y_min + i / width;
                (grid.wrap_x(x), y, c, w)
            })
    }

    /// Weighted colour as a standalone image, for debug output.
    pub fn into_image(self) -> ImageRgbaF32 {
        ImageRgbaF32::from_vec(self.rect.width(), self.rect.height(), self.color)
    }
}

struct RowContext<'a> {
    projector: &'a PaneProjector,
    tile: &'a TileBuffer,
    grid: &'a EquirectGrid,
    rect: OutputRect,
    settings: BlendSettings,
    include_alpha: bool,
}

impl RowContext<'_> {
    fn fill_row(&self, y: usize, color: &mut [LinearColor], weight: &mut [f32]) -> usize {
        let phi = self.grid.phi_at(y);
        let mut touched = 0;
        for (i, (c_out, w_out)) in color.iter_mut().zip(weight.iter_mut()).enumerate() {
            let x = self.grid.wrap_x(self.rect.x_min + i as i64);
            let theta = self.grid.theta_at(x);
            let w = angular_weight(self.projector, theta, phi, self.settings.falloff);
            if w <= self.settings.weight_epsilon {
                continue;
            }
            let dir = direction_from_angles(theta, phi);
            let Some([sx, sy]) = self.projector.project(&dir) else {
                continue;
            };
            let (sample, clipped) = sample_bilinear(self.tile, sx, sy, self.include_alpha);
            if clipped {
                continue;
            }
            *c_out += sample * w;
            *w_out += w;
            touched += 1;
        }
        touched
    }
}

/// Resample `tile` into an intermediate buffer covering the pane's output
/// rectangle on `grid`.
pub fn blend_tile(
    pane: &Pane,
    tile: &TileBuffer,
    grid: &EquirectGrid,
    settings: BlendSettings,
) -> IntermediateBlend {
    let projector = PaneProjector::new(pane);
    let rect = pane_output_rect(&projector, grid);
    let width = rect.width();
    let mut color = vec![LinearColor::TRANSPARENT; rect.area()];
    let mut weight = vec![0.0f32; rect.area()];

    let ctx = RowContext {
        projector: &projector,
        tile,
        grid,
        rect,
        settings,
        include_alpha: pane.include_alpha,
    };

    let touched = if rect.is_empty() {
        0
    } else {
        #[cfg(feature = "parallel")]
        {
            color
                .par_chunks_mut(width)
                .zip(weight.par_chunks_mut(width))
                .enumerate()
                .map(|(row, (c, w))| ctx.fill_row(rect.y_min + row, c, w))
                .sum()
        }
        #[cfg(not(feature = "parallel"))]
        {
            color
                .chunks_mut(width)
                .zip(weight.chunks_mut(width))
                .enumerate()
                .map(|(row, (c, w))| ctx.fill_row(rect.y_min + row, c, w))
                .sum()
        }
    };

    IntermediateBlend {
        rect,
        eye_index: pane.eye_index,
        color,
        weight,
        touched,
    }
}
