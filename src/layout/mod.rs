//! Tile layout: which panes to render and how each is oriented.
//!
//! Modules
//! - [`params`] – grid density, overlap, FOV overrides and stereo options.
//! - [`pane`] – the immutable [`Pane`] descriptor paired with every tile.
//! - [`planner`] – pure geometry turning params and a camera pose into panes.

pub mod pane;
pub mod params;
pub mod planner;

pub use pane::{CameraPose, Pane};
pub use params::{LayoutParams, StereoParams};
pub use planner::{LayoutPlanner, MAX_PANE_FOV_DEG};
