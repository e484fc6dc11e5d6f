//! Equirectangular map coordinates.
//!
//! Column `x` maps linearly to `theta` (yaw) across `(-180, 180)` and row `y`
//! to `phi` (pitch) across `(-90, 90)`, both sampled at pixel centres. Row 0
//! is the top of the map, so `phi` decreases as `y` grows.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Size of one eye's equirectangular map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquirectGrid {
    pub width: usize,
    pub height: usize,
}

impl EquirectGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Degrees of yaw covered by one column.
    #[inline]
    pub fn theta_step(&self) -> f32 {
        360.0 / self.width as f32
    }

    /// Degrees of pitch covered by one row.
    #[inline]
    pub fn phi_step(&self) -> f32 {
        180.0 / self.height as f32
    }

    /// Yaw in degrees at the centre of column `x`.
    #[inline]
    pub fn theta_at(&self, x: usize) -> f32 {
        self.theta_step() * (x as f32 + 0.5) - 180.0
    }

    /// Pitch in degrees at the centre of row `y`.
    #[inline]
    pub fn phi_at(&self, y: usize) -> f32 {
        90.0 - self.phi_step() * (y as f32 + 0.5)
    }

    /// Wrap an unbounded column index into `[0, width)`.
    #[inline]
    pub fn wrap_x(&self, x: i64) -> usize {
        x.rem_euclid(self.width as i64) as usize
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Unit direction for yaw `theta_deg` and pitch `phi_deg`
/// (x-forward, y-right, z-up).
#[inline]
pub fn direction_from_angles(theta_deg: f32, phi_deg: f32) -> Vector3<f32> {
    let (st, ct) = theta_deg.to_radians().sin_cos();
    let (sp, cp) = phi_deg.to_radians().sin_cos();
    Vector3::new(cp * ct, cp * st, sp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_centres_span_the_sphere() {
        let grid = EquirectGrid::new(360, 180);
        assert!((grid.theta_at(0) + 179.5).abs() < 1e-4);
        assert!((grid.theta_at(359) - 179.5).abs() < 1e-4);
        assert!((grid.phi_at(0) - 89.5).abs() < 1e-4);
        assert!((grid.phi_at(179) + 89.5).abs() < 1e-4);
    }

    #[test]
    fn wrap_x_is_positive_modulo() {
        let grid = EquirectGrid::new(16, 8);
        assert_eq!(grid.wrap_x(-1), 15);
        assert_eq!(grid.wrap_x(16), 0);
        assert_eq!(grid.wrap_x(37), 5);
    }

    #[test]
    fn direction_matches_axes() {
        let fwd = direction_from_angles(0.0, 0.0);
        assert!((fwd - Vector3::x()).norm() < 1e-6);
        let right = direction_from_angles(90.0, 0.0);
        assert!((right - Vector3::y()).norm() < 1e-6);
        let up = direction_from_angles(0.0, 90.0);
        assert!((up - Vector3::z()).norm() < 1e-6);
    }
}
