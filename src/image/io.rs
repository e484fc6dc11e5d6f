//! I/O helpers for finished panoramas and JSON reports.
//!
//! - `save_rgba_png`: write an `ImageRgbaF32` to an 8-bit RGBA PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageRgbaF32, ImageView};
use image::{Rgba, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a linear float image to PNG, clamping each channel to [0, 1].
///
/// Values are written as-is (no transfer curve), which keeps debug output
/// comparable with the accumulated numbers.
pub fn save_rgba_png(image: &ImageRgbaF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbaImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, px) in row.iter().enumerate() {
            let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
            out.put_pixel(x as u32, y as u32, Rgba([q(px.r), q(px.g), q(px.b), q(px.a)]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
