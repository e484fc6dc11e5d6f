//! Wall-clock timings attached to reports.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Milliseconds since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Consecutive stages and the total time from the first stage's start.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Records laps into a [`TimingBreakdown`].
#[derive(Debug)]
pub struct Stopwatch {
    origin: Instant,
    lap_start: Instant,
    stages: Vec<StageTiming>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Stopwatch whose first lap began at `origin`.
    pub fn started_at(origin: Instant) -> Self {
        Self {
            origin,
            lap_start: origin,
            stages: Vec::new(),
        }
    }

    /// Close the current lap under `label` and return its duration.
    pub fn lap(&mut self, label: &str) -> f64 {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.lap_start).as_secs_f64() * 1000.0;
        self.stages.push(StageTiming {
            label: label.to_string(),
            elapsed_ms,
        });
        self.lap_start = now;
        elapsed_ms
    }

    pub fn finish(self) -> TimingBreakdown {
        TimingBreakdown {
            total_ms: elapsed_ms(self.origin),
            stages: self.stages,
        }
    }
}
