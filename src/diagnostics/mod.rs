//! Serializable reports describing what the blender did.
//!
//! `SampleReport` travels with every debug sample and `FrameReport` with every
//! finished panorama; both embed a `TimingBreakdown` with per-stage
//! milliseconds.

pub mod frame;
pub mod sample;
pub mod timing;

pub use frame::FrameReport;
pub use sample::SampleReport;
pub use timing::{elapsed_ms, StageTiming, Stopwatch, TimingBreakdown};
