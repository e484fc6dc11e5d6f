//! JSON runtime configuration for the command-line tools.

pub mod stitch;

pub use stitch::{load_config, StitchConfig};
