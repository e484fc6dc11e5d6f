use crate::diagnostics::TimingBreakdown;
use crate::resample::OutputRect;
use serde::Serialize;

/// What one submitted tile contributed to its frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleReport {
    pub absolute_index: usize,
    pub horizontal_step_index: usize,
    pub vertical_step_index: usize,
    pub eye_index: i32,
    pub tile_width: usize,
    pub tile_height: usize,
    /// Footprint on the per-eye map, columns unwrapped.
    pub rect: OutputRect,
    /// Pixels inside `rect` that received a non-zero weight.
    pub touched_pixels: usize,
    /// `blend` and `merge` stages.
    pub timings: TimingBreakdown,
}
