//! Per-pane projection constants.
//!
//! Everything the resampler needs about a pane is computed once per tile:
//! the orientation relative to the pane's original camera, half-FOV cosines
//! for the falloff weight, the yaw/pitch basis vectors and the perspective
//! matrix.

use crate::geometry::rotator::normalize_axis;
use crate::geometry::{project_to_pixel, reversed_z_perspective, world_to_view, Rotator};
use crate::layout::Pane;
use nalgebra::{Matrix4, UnitQuaternion, Vector3};

#[derive(Clone, Debug)]
pub struct PaneProjector {
    rotation: UnitQuaternion<f32>,
    inverse_rotation: UnitQuaternion<f32>,
    yaw_deg: f32,
    pitch_deg: f32,
    half_h_fov_deg: f32,
    half_v_fov_deg: f32,
    cos_half_h: f32,
    cos_half_v: f32,
    yaw_axis: Vector3<f32>,
    pitch_axis: Vector3<f32>,
    projection: Matrix4<f32>,
    width: f32,
    height: f32,
}

impl PaneProjector {
    pub fn new(pane: &Pane) -> Self {
        let rotation = pane.relative_rotation();
        let rot = Rotator::from_quat(&rotation);
        let yaw_deg = normalize_axis(rot.yaw);
        let pitch_deg = rot.pitch;
        let half_h_fov_deg = 0.5 * pane.horizontal_fov;
        let half_v_fov_deg = 0.5 * pane.vertical_fov;
        let (sy, cy) = yaw_deg.to_radians().sin_cos();
        let (sp, cp) = pitch_deg.to_radians().sin_cos();
        let (w, h) = pane.resolution;
        Self {
            rotation,
            inverse_rotation: rotation.inverse(),
            yaw_deg,
            pitch_deg,
            half_h_fov_deg,
            half_v_fov_deg,
            cos_half_h: half_h_fov_deg.to_radians().cos(),
            cos_half_v: half_v_fov_deg.to_radians().cos(),
            yaw_axis: Vector3::new(cy, sy, 0.0),
            pitch_axis: Vector3::new(cp, 0.0, sp),
            projection: reversed_z_perspective(
                half_h_fov_deg.to_radians(),
                w as f32,
                h as f32,
                pane.near_clip,
            ),
            width: w as f32,
            height: h as f32,
        }
    }

    /// Pane yaw relative to its original camera, `(-180, 180]`.
    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    /// Pane pitch relative to its original camera.
    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    pub fn half_fov_deg(&self) -> (f32, f32) {
        (self.half_h_fov_deg, self.half_v_fov_deg)
    }

    pub(crate) fn cos_half_fov(&self) -> (f32, f32) {
        (self.cos_half_h, self.cos_half_v)
    }

    pub(crate) fn basis(&self) -> (&Vector3<f32>, &Vector3<f32>) {
        (&self.yaw_axis, &self.pitch_axis)
    }

    /// Continuous tile pixel coordinates for a direction in the original
    /// camera's frame, or `None` if it lies behind the tile plane.
    pub fn project(&self, dir: &Vector3<f32>) -> Option<[f32; 2]> {
        let local = self.inverse_rotation * dir;
        project_to_pixel(
            &self.projection,
            &world_to_view(&local),
            self.width,
            self.height,
        )
    }

    /// Unit direction through tile pixel centre `(x, y)` in the tile camera's
    /// own frame (x-forward, y-right, z-up).
    pub fn unproject_local(&self, x: usize, y: usize) -> Vector3<f32> {
        let sx = x as f32 + 0.5;
        let sy = y as f32 + 0.5;
        let ndc_x = 2.0 * sx / self.width - 1.0;
        let ndc_y = 1.0 - 2.0 * sy / self.height;
        let (m00, m11) = (self.projection[(0, 0)], self.projection[(1, 1)]);
        Vector3::new(1.0, ndc_x / m00, ndc_y / m11).normalize()
    }

    /// Same as [`unproject_local`](Self::unproject_local), rotated into the
    /// original camera's frame.
    pub fn unproject(&self, x: usize, y: usize) -> Vector3<f32> {
        self.rotation * self.unproject_local(x, y)
    }
}
