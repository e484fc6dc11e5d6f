//! Tile layout planner.
//!
//! Partitions the sphere into `H × V` yaw/pitch panes, derives each pane's
//! field of view from grid density and overlap, sizes tiles against the
//! backbuffer so they are not undersampled, and places stereo eyes.

use super::pane::{CameraPose, Pane};
use super::params::{LayoutParams, StereoParams};
use crate::geometry::{distribute_centered, distribute_left_closed, Rotator};
use log::warn;

/// Widest field of view a single perspective pane may use.
pub const MAX_PANE_FOV_DEG: f32 = 179.0;

#[derive(Clone, Debug)]
pub struct LayoutPlanner {
    params: LayoutParams,
    horizontal_steps: usize,
    vertical_steps: usize,
}

impl LayoutPlanner {
    pub fn new(params: LayoutParams) -> Self {
        let clamp_steps = |steps: i32, axis: &str| -> usize {
            if steps < 1 {
                warn!("LayoutPlanner: {axis} step count {steps} clamped to 1");
                1
            } else {
                steps as usize
            }
        };
        let horizontal_steps = clamp_steps(params.horizontal_steps, "horizontal");
        let vertical_steps = clamp_steps(params.vertical_steps, "vertical");
        Self {
            params,
            horizontal_steps,
            vertical_steps,
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn horizontal_steps(&self) -> usize {
        self.horizontal_steps
    }

    pub fn vertical_steps(&self) -> usize {
        self.vertical_steps
    }

    pub fn eye_multiplier(&self) -> usize {
        if self.params.stereo.is_some() {
            2
        } else {
            1
        }
    }

    /// Panes per output frame, both eyes included.
    pub fn panes_per_frame(&self) -> usize {
        self.horizontal_steps * self.vertical_steps * self.eye_multiplier()
    }

    /// Per-pane (horizontal, vertical) field of view in degrees.
    pub fn field_of_view(&self) -> (f32, f32) {
        let overlap = 1.0 + self.params.overlap_percent * 0.01;
        let pick = |over: Option<f32>, span: f32, steps: usize| match over {
            Some(fov) if fov > 0.0 => fov,
            _ => (span / steps as f32 * overlap).min(MAX_PANE_FOV_DEG),
        };
        (
            pick(
                self.params.horizontal_fov_override,
                360.0,
                self.horizontal_steps,
            ),
            pick(self.params.vertical_fov_override, 180.0, self.vertical_steps),
        )
    }

    /// Tile size whose aspect matches the pane FOV, with the horizontal
    /// pixel density of a `backbuffer`-wide full panorama.
    pub fn pane_resolution(&self, backbuffer: (usize, usize)) -> (usize, usize) {
        let (h_fov, v_fov) = self.field_of_view();
        let width = h_fov / 360.0 * backbuffer.0 as f32;
        let ratio = (v_fov.to_radians() * 0.5).tan() / (h_fov.to_radians() * 0.5).tan();
        let height = width * ratio;
        (
            (width.ceil() as usize).max(1),
            (height.ceil() as usize).max(1),
        )
    }

    /// Yaw offset of each horizontal step, `[0, 360)`.
    pub fn yaw_steps(&self) -> Vec<f32> {
        distribute_left_closed(0.0, 360.0, self.horizontal_steps)
    }

    /// Pitch offset of each vertical step, centred in its band of `[-90, 90]`.
    pub fn pitch_steps(&self) -> Vec<f32> {
        distribute_centered(-90.0, 90.0, self.vertical_steps)
    }

    /// Camera pose of one eye. `eye_index == -1` returns `base` unchanged.
    pub fn eye_pose(&self, base: &CameraPose, eye_index: i32) -> CameraPose {
        let Some(stereo) = self.params.stereo.as_ref().filter(|_| eye_index >= 0) else {
            return *base;
        };
        let half = stereo.eye_separation * 0.5;
        // Eye 0 sits left of the sequence camera, eye 1 right.
        let side = if eye_index == 0 { -1.0 } else { 1.0 };
        let location = base.location + base.rotation.right() * (side * half);
        let rotation = match convergence_yaw(stereo) {
            Some(angle) => {
                let q = base.rotation.to_quat() * Rotator::yaw_quat(-side * angle);
                Rotator::from_quat(&q)
            }
            None => base.rotation,
        };
        CameraPose::new(location, rotation)
    }

    /// Absolute tile orientation: base composed with the step's yaw then pitch.
    pub fn tile_rotation(&self, base: &Rotator, yaw_deg: f32, pitch_deg: f32) -> Rotator {
        let q = base.to_quat() * Rotator::yaw_quat(yaw_deg) * Rotator::pitch_quat(pitch_deg);
        Rotator::from_quat(&q)
    }

    /// Describe every pane of one output frame, eye-major then row-major.
    pub fn plan(
        &self,
        current: &CameraPose,
        previous: &CameraPose,
        backbuffer: (usize, usize),
    ) -> Vec<Pane> {
        let (horizontal_fov, vertical_fov) = self.field_of_view();
        let resolution = self.pane_resolution(backbuffer);
        let yaws = self.yaw_steps();
        let pitches = self.pitch_steps();
        let eyes: &[i32] = if self.params.stereo.is_some() {
            &[0, 1]
        } else {
            &[-1]
        };
        let (eye_separation, eye_convergence_distance) = match &self.params.stereo {
            Some(s) => (s.eye_separation, s.convergence_distance),
            None => (0.0, None),
        };

        let mut panes = Vec::with_capacity(self.panes_per_frame());
        for &eye_index in eyes {
            let original = self.eye_pose(current, eye_index);
            let prev_original = self.eye_pose(previous, eye_index);
            for (v, &pitch) in pitches.iter().enumerate() {
                for (h, &yaw) in yaws.iter().enumerate() {
                    let camera = CameraPose::new(
                        original.location,
                        self.tile_rotation(&original.rotation, yaw, pitch),
                    );
                    let prev_camera = CameraPose::new(
                        prev_original.location,
                        self.tile_rotation(&prev_original.rotation, yaw, pitch),
                    );
                    panes.push(Pane {
                        horizontal_step_index: h,
                        vertical_step_index: v,
                        num_horizontal_steps: self.horizontal_steps,
                        num_vertical_steps: self.vertical_steps,
                        eye_index,
                        resolution,
                        horizontal_fov,
                        vertical_fov,
                        original,
                        prev_original,
                        camera,
                        prev_camera,
                        eye_separation,
                        eye_convergence_distance,
                        near_clip: self.params.near_clip,
                        include_alpha: self.params.include_alpha,
                    });
                }
            }
        }
        panes
    }
}

/// Inward yaw per eye in degrees, if convergence is enabled.
fn convergence_yaw(stereo: &StereoParams) -> Option<f32> {
    stereo
        .convergence_distance
        .filter(|d| *d > 0.0)
        .map(|d| (stereo.eye_separation * 0.5 / d).atan().to_degrees())
}
