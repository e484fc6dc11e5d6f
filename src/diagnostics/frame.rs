use crate::diagnostics::TimingBreakdown;
use serde::Serialize;

/// Summary of one emitted panorama.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub width: usize,
    /// Output height; twice the map height for stereo frames.
    pub height: usize,
    pub stereo: bool,
    pub expected_samples: usize,
    pub received_samples: usize,
    /// Output pixels no tile contributed to; written as transparent black.
    pub zero_weight_pixels: usize,
    /// `accumulate` (frame creation to last sample) and `normalize` stages.
    pub timings: TimingBreakdown,
}

impl FrameReport {
    /// Fraction of output pixels that received any weight.
    pub fn coverage(&self) -> f64 {
        let total = self.width * self.height;
        if total == 0 {
            return 0.0;
        }
        1.0 - self.zero_weight_pixels as f64 / total as f64
    }
}
