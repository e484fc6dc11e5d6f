//! Parameters for partitioning the sphere into panes.
//!
//! Defaults mirror a typical 6×3 mono layout with 50 % overlap. Step counts
//! below one are clamped when the planner is built.

use serde::Deserialize;

/// Grid density, overlap and camera options for the layout planner.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Number of yaw steps around the horizon (>= 1).
    pub horizontal_steps: i32,
    /// Number of pitch bands from nadir to zenith (>= 1).
    pub vertical_steps: i32,
    /// Extra field of view per pane, in percent of the step size.
    pub overlap_percent: f32,
    /// Explicit horizontal FOV in degrees; `None` or non-positive derives it.
    pub horizontal_fov_override: Option<f32>,
    /// Explicit vertical FOV in degrees; `None` or non-positive derives it.
    pub vertical_fov_override: Option<f32>,
    /// Render two eyes stacked vertically in the output.
    pub stereo: Option<StereoParams>,
    /// Blend the tile alpha channel instead of forcing opaque output.
    pub include_alpha: bool,
    /// Near clip distance recorded on each pane.
    pub near_clip: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            horizontal_steps: 6,
            vertical_steps: 3,
            overlap_percent: 50.0,
            horizontal_fov_override: None,
            vertical_fov_override: None,
            stereo: None,
            include_alpha: false,
            near_clip: 10.0,
        }
    }
}

/// Stereo eye placement.
///
/// - `eye_separation`: total distance between the eyes (world units).
/// - `convergence_distance`: when set, each eye yaws inward by
///   `atan(separation / 2 / distance)`; when `None` both eyes keep the mono
///   orientation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StereoParams {
    pub eye_separation: f32,
    pub convergence_distance: Option<f32>,
}

impl Default for StereoParams {
    fn default() -> Self {
        let eye_separation = 6.5;
        Self {
            eye_separation,
            convergence_distance: Some(eye_separation * 30.0),
        }
    }
}
