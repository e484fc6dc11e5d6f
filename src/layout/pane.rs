//! Pane descriptor travelling with every rendered tile.

use crate::error::{Result, StitchError};
use crate::geometry::Rotator;
use nalgebra::{UnitQuaternion, Vector3};
use serde::Serialize;

/// Camera location and orientation in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CameraPose {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
}

impl CameraPose {
    pub fn new(location: Vector3<f32>, rotation: Rotator) -> Self {
        Self { location, rotation }
    }
}

/// One perspective tile of the panorama grid.
///
/// `original_*` is the sequence camera (offset per eye in stereo); `camera_*`
/// adds this pane's yaw/pitch step on top. Previous-frame poses are carried
/// so motion-dependent rendering stays consistent across panes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pane {
    pub horizontal_step_index: usize,
    pub vertical_step_index: usize,
    pub num_horizontal_steps: usize,
    pub num_vertical_steps: usize,
    /// -1 mono, 0 left eye, 1 right eye.
    pub eye_index: i32,
    /// Tile size in pixels (width, height).
    pub resolution: (usize, usize),
    pub horizontal_fov: f32,
    pub vertical_fov: f32,
    pub original: CameraPose,
    pub prev_original: CameraPose,
    pub camera: CameraPose,
    pub prev_camera: CameraPose,
    pub eye_separation: f32,
    pub eye_convergence_distance: Option<f32>,
    pub near_clip: f32,
    pub include_alpha: bool,
}

impl Pane {
    pub fn is_stereo(&self) -> bool {
        self.eye_index >= 0
    }

    /// 1 for mono, 2 for stereo.
    pub fn eye_multiplier(&self) -> usize {
        if self.is_stereo() {
            2
        } else {
            1
        }
    }

    /// Number of tiles making up one output frame.
    pub fn expected_sample_count(&self) -> usize {
        self.num_horizontal_steps * self.num_vertical_steps * self.eye_multiplier()
    }

    /// Slot of this pane among all panes of a frame, eye 1 after eye 0.
    pub fn absolute_index(&self) -> usize {
        let eye_rows = if self.eye_index == 1 {
            self.num_vertical_steps
        } else {
            0
        };
        (eye_rows + self.vertical_step_index) * self.num_horizontal_steps
            + self.horizontal_step_index
    }

    /// Orientation of the tile camera relative to its original camera; the
    /// panorama is assembled in that original camera's frame.
    pub fn relative_rotation(&self) -> UnitQuaternion<f32> {
        self.original.rotation.to_quat().inverse() * self.camera.rotation.to_quat()
    }

    /// Reject descriptors that indicate an upstream configuration bug.
    pub fn validate(&self) -> Result<()> {
        if self.num_horizontal_steps == 0 || self.num_vertical_steps == 0 {
            return Err(StitchError::InvalidPane(format!(
                "step counts must be positive, got {}x{}",
                self.num_horizontal_steps, self.num_vertical_steps
            )));
        }
        if self.horizontal_step_index >= self.num_horizontal_steps
            || self.vertical_step_index >= self.num_vertical_steps
        {
            return Err(StitchError::InvalidPane(format!(
                "step index ({}, {}) outside grid {}x{}",
                self.horizontal_step_index,
                self.vertical_step_index,
                self.num_horizontal_steps,
                self.num_vertical_steps
            )));
        }
        if !(-1..=1).contains(&self.eye_index) {
            return Err(StitchError::InvalidPane(format!(
                "eye index {} not in -1..=1",
                self.eye_index
            )));
        }
        if self.resolution.0 == 0 || self.resolution.1 == 0 {
            return Err(StitchError::InvalidPane(format!(
                "resolution must be positive, got {:?}",
                self.resolution
            )));
        }
        for fov in [self.horizontal_fov, self.vertical_fov] {
            if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
                return Err(StitchError::InvalidPane(format!(
                    "field of view {fov} outside (0, 180)"
                )));
            }
        }
        Ok(())
    }
}
