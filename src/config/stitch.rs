use crate::blender::BlenderParams;
use crate::geometry::Rotator;
use crate::layout::{CameraPose, LayoutParams};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration of the `pano_demo` tool.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub layout: LayoutParams,
    pub blender: BlenderParams,
    /// Reference render resolution used to size each pane.
    pub backbuffer: BackbufferConfig,
    pub sequence: SequenceConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BackbufferConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BackbufferConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl BackbufferConfig {
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Camera path of the rendered sequence.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub frames: u32,
    pub location: [f32; 3],
    pub rotation: Rotator,
    /// Yaw added per frame, in degrees.
    pub yaw_per_frame: f32,
    /// Emit half-float tiles, as GPU readbacks usually do.
    pub half_float_tiles: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            frames: 1,
            location: [0.0; 3],
            rotation: Rotator::ZERO,
            yaw_per_frame: 0.0,
            half_float_tiles: false,
        }
    }
}

impl SequenceConfig {
    /// Camera pose at `frame`.
    pub fn pose(&self, frame: u32) -> CameraPose {
        let mut rotation = self.rotation;
        rotation.yaw += self.yaw_per_frame * frame as f32;
        CameraPose::new(Vector3::from(self.location), rotation)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Write a JSON report next to every PNG.
    pub write_reports: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            write_reports: true,
        }
    }
}

pub fn load_config(path: &Path) -> Result<StitchConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: StitchConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
