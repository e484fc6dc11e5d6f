//! Shared accumulation state of one output frame.
//!
//! A `FrameState` is created by the first sample of a frame and handed out
//! as an `Arc`, so a merge that started before the frame was abandoned keeps
//! writing into live buffers. The colour and weight sums are only touched
//! under `buffers`.

use crate::error::{Result, StitchError};
use crate::geometry::EquirectGrid;
use crate::image::{ImageRgbaF32, LinearColor};
use crate::layout::Pane;
use crate::resample::IntermediateBlend;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Weighted colour and weight sums over the whole output (both eyes).
#[derive(Debug, Default)]
pub struct FrameBuffers {
    pub color: Vec<LinearColor>,
    pub weight: Vec<f32>,
}

impl FrameBuffers {
    fn zeroed(len: usize) -> Self {
        Self {
            color: vec![LinearColor::TRANSPARENT; len],
            weight: vec![0.0; len],
        }
    }
}

#[derive(Debug)]
pub struct FrameState {
    grid: EquirectGrid,
    num_horizontal_steps: usize,
    num_vertical_steps: usize,
    stereo: bool,
    include_alpha: bool,
    expected: usize,
    created: Instant,
    buffers: Mutex<FrameBuffers>,
}

impl FrameState {
    /// Size the frame from its first pane: the expected sample count comes
    /// from the pane grid, and stereo frames stack two maps vertically.
    pub fn new(pane: &Pane, grid: EquirectGrid) -> Self {
        let stereo = pane.is_stereo();
        let len = grid.pixel_count() * pane.eye_multiplier();
        Self {
            grid,
            num_horizontal_steps: pane.num_horizontal_steps,
            num_vertical_steps: pane.num_vertical_steps,
            stereo,
            include_alpha: pane.include_alpha,
            expected: pane.expected_sample_count(),
            created: Instant::now(),
            buffers: Mutex::new(FrameBuffers::zeroed(len)),
        }
    }

    pub fn expected_sample_count(&self) -> usize {
        self.expected
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    pub fn include_alpha(&self) -> bool {
        self.include_alpha
    }

    pub fn created(&self) -> Instant {
        self.created
    }

    /// Output size `(width, height)`, height doubled for stereo.
    pub fn output_size(&self) -> (usize, usize) {
        let eyes = if self.stereo { 2 } else { 1 };
        (self.grid.width, self.grid.height * eyes)
    }

    /// A later pane must describe the same grid and eye mode as the first.
    pub fn check_geometry(&self, pane: &Pane) -> Result<()> {
        if pane.num_horizontal_steps != self.num_horizontal_steps
            || pane.num_vertical_steps != self.num_vertical_steps
        {
            return Err(StitchError::GeometryMismatch(format!(
                "pane grid {}x{} but frame was started with {}x{}",
                pane.num_horizontal_steps,
                pane.num_vertical_steps,
                self.num_horizontal_steps,
                self.num_vertical_steps
            )));
        }
        if pane.is_stereo() != self.stereo {
            return Err(StitchError::GeometryMismatch(format!(
                "eye index {} does not match a {} frame",
                pane.eye_index,
                if self.stereo { "stereo" } else { "mono" }
            )));
        }
        Ok(())
    }

    /// Add `blend` into the shared sums, wrapping columns around the seam
    /// and offsetting rows by eye.
    pub fn merge(&self, blend: &IntermediateBlend) {
        let row_offset = if blend.eye_index == 1 {
            self.grid.height
        } else {
            0
        };
        let width = self.grid.width;
        // Sums are only ever added to, so a panicked writer leaves them usable.
        let mut buffers = self.buffers.lock().unwrap_or_else(PoisonError::into_inner);
        let FrameBuffers { color, weight } = &mut *buffers;
        if color.is_empty() {
            return;
        }
        for (x, y, c, w) in blend.contributions(&self.grid) {
            if w <= 0.0 {
                continue;
            }
            let i = (y + row_offset) * width + x;
            color[i] += c;
            weight[i] += w;
        }
    }

    /// Move the sums out, leaving empty buffers behind.
    pub fn take_buffers(&self) -> FrameBuffers {
        let mut buffers = self.buffers.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *buffers)
    }
}

/// Divide accumulated colour by accumulated weight.
///
/// Pixels with no weight become transparent black. Without alpha
/// accumulation the output alpha is forced to 1 on covered pixels. Returns
/// the image and the number of zero-weight pixels.
pub fn normalize(
    buffers: FrameBuffers,
    width: usize,
    height: usize,
    include_alpha: bool,
) -> (ImageRgbaF32, usize) {
    let FrameBuffers { mut color, weight } = buffers;
    let mut zero_weight = 0;
    for (c, &w) in color.iter_mut().zip(weight.iter()) {
        if w > 0.0 {
            let mut out = *c / w;
            if !include_alpha {
                out.a = 1.0;
            }
            *c = if out.is_finite() {
                out
            } else {
                LinearColor::TRANSPARENT
            };
        } else {
            zero_weight += 1;
            *c = LinearColor::TRANSPARENT;
        }
    }
    (ImageRgbaF32::from_vec(width, height, color), zero_weight)
}
