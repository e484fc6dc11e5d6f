//! Frame accumulator: tiles in, one normalised panorama per frame out.

pub mod accumulator;
pub mod frame;
pub mod params;
pub mod sink;

pub use accumulator::{PanoramaBlender, SampleOutcome};
pub use frame::{normalize, FrameBuffers, FrameState};
pub use params::BlenderParams;
pub use sink::{DirectorySink, OutputSink, PanoramaMetadata, SampleMetadata};
