//! Spherical resampling of perspective tiles onto an equirectangular grid.
//!
//! Each tile is resampled independently into an [`IntermediateBlend`]
//! covering only its footprint. For every output pixel the angular falloff
//! weight is evaluated first; only pixels with a usable weight are projected
//! into the tile and bilinearly sampled.

pub mod bilinear;
pub mod blend;
pub mod bounds;
pub mod projector;
pub mod weight;

pub use bilinear::sample_bilinear;
pub use blend::{blend_tile, BlendSettings, IntermediateBlend};
pub use bounds::{pane_output_rect, OutputRect};
pub use projector::PaneProjector;
pub use weight::{angular_weight, Falloff, DEFAULT_WEIGHT_EPSILON};
