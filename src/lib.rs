#![doc = include_str!("../README.md")]

// Core pipeline
pub mod blender;
pub mod layout;
pub mod resample;

// Supporting types and utilities
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod image;
pub mod render;

// --- High-level re-exports -------------------------------------------------

pub use crate::blender::{
    BlenderParams, DirectorySink, OutputSink, PanoramaBlender, PanoramaMetadata, SampleMetadata,
    SampleOutcome,
};
pub use crate::error::{Result, StitchError};
pub use crate::layout::{CameraPose, LayoutParams, LayoutPlanner, Pane, StereoParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pano_stitch::prelude::*;
///
/// # fn main() -> Result<(), StitchError> {
/// let planner = LayoutPlanner::new(LayoutParams::default());
/// let pose = CameraPose::default();
/// let panes = planner.plan(&pose, &pose, (1920, 1080));
///
/// let blender = PanoramaBlender::new(BlenderParams::default(), DirectorySink::new("out", false));
/// let renderer = EnvironmentRenderer::new(direction_gradient);
/// for pane in &panes {
///     blender.submit(0u64, pane, renderer.render(pane))?;
/// }
/// assert_eq!(blender.pending_frame_count(), 0);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageRgbaF32, LinearColor, TileBuffer};
    pub use crate::render::{direction_gradient, EnvironmentRenderer, PaneRenderer};
    pub use crate::{
        BlenderParams, CameraPose, DirectorySink, LayoutParams, LayoutPlanner, OutputSink,
        PanoramaBlender, StitchError,
    };
}
