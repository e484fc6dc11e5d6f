//! Output map size and blending knobs.

use crate::geometry::EquirectGrid;
use crate::resample::{BlendSettings, Falloff, DEFAULT_WEIGHT_EPSILON};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlenderParams {
    /// Equirectangular width of one eye's map.
    pub map_width: usize,
    /// Equirectangular height of one eye's map; stereo output is twice this.
    pub map_height: usize,
    pub falloff: Falloff,
    pub weight_epsilon: f32,
    /// Hand every intermediate blend buffer to the sink before merging it away.
    pub debug_samples: bool,
    /// Prefix of debug sample names.
    pub pass_name: String,
}

impl Default for BlenderParams {
    fn default() -> Self {
        Self {
            map_width: 2048,
            map_height: 1024,
            falloff: Falloff::Squared,
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
            debug_samples: false,
            pass_name: "Panoramic".to_string(),
        }
    }
}

impl BlenderParams {
    pub fn grid(&self) -> EquirectGrid {
        EquirectGrid::new(self.map_width, self.map_height)
    }

    pub fn blend_settings(&self) -> BlendSettings {
        BlendSettings {
            falloff: self.falloff,
            weight_epsilon: self.weight_epsilon,
        }
    }
}
