//! Output-pixel footprint of a pane.
//!
//! The falloff weight is non-zero only within `yaw ± halfH` and
//! `pitch ± halfV`, so that angular box (pitch clamped to `[-90, 90]`)
//! bounds every pixel a pane can touch. Columns are left unwrapped; callers
//! wrap them into the map with a positive modulo.

use super::projector::PaneProjector;
use crate::geometry::EquirectGrid;
use serde::Serialize;

/// Half-open output rectangle `[x_min, x_max) × [y_min, y_max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OutputRect {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: usize,
    pub y_max: usize,
}

impl OutputRect {
    pub fn width(&self) -> usize {
        (self.x_max - self.x_min).max(0) as usize
    }

    pub fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min)
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

pub fn pane_output_rect(projector: &PaneProjector, grid: &EquirectGrid) -> OutputRect {
    let (half_h, half_v) = projector.half_fov_deg();
    let yaw = projector.yaw_deg();
    let pitch = projector.pitch_deg();

    let theta_step = grid.theta_step();
    let x_min = ((yaw - half_h + 180.0) / theta_step).floor() as i64;
    let mut x_max = ((yaw + half_h + 180.0) / theta_step).floor() as i64 + 1;
    // A column must never be visited twice through the wrap.
    x_max = x_max.min(x_min + grid.width as i64);

    let phi_step = grid.phi_step();
    let pitch_min = (pitch - half_v).max(-90.0);
    let pitch_max = (pitch + half_v).min(90.0);
    let y_min = ((90.0 - pitch_max) / phi_step).floor().max(0.0) as usize;
    let y_max = (((90.0 - pitch_min) / phi_step).ceil().max(0.0) as usize).min(grid.height);

    OutputRect {
        x_min,
        x_max,
        y_min: y_min.min(grid.height),
        y_max,
    }
}
