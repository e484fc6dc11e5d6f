//! Where finished panoramas and debug samples go.

use crate::diagnostics::{FrameReport, SampleReport};
use crate::image::io::{save_rgba_png, write_json_file};
use crate::image::ImageRgbaF32;
use crate::layout::Pane;
use log::{debug, error};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Describes one intermediate blend buffer handed out for debugging.
#[derive(Clone, Debug, Serialize)]
pub struct SampleMetadata<K> {
    pub frame: K,
    /// `{pass}_PaneX_{h}_PaneY_{v}[_Eye_{e}]-Blended.{frame}`.
    pub name: String,
    pub pane: Pane,
    pub report: SampleReport,
}

/// Describes one finished panorama.
#[derive(Clone, Debug, Serialize)]
pub struct PanoramaMetadata<K> {
    pub frame: K,
    /// `{pass}.{frame}`.
    pub name: String,
    pub report: FrameReport,
}

/// Consumer of blender output.
///
/// Called from whichever worker thread finished the work, so implementations
/// must be thread-safe. `on_panorama_ready` runs exactly once per frame and
/// receives ownership of the buffer.
pub trait OutputSink<K>: Send + Sync {
    fn on_debug_sample_ready(&self, image: ImageRgbaF32, metadata: SampleMetadata<K>) {
        let _ = (image, metadata);
    }

    fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<K>);
}

impl<K, S: OutputSink<K> + ?Sized> OutputSink<K> for Arc<S> {
    fn on_debug_sample_ready(&self, image: ImageRgbaF32, metadata: SampleMetadata<K>) {
        (**self).on_debug_sample_ready(image, metadata)
    }

    fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<K>) {
        (**self).on_panorama_ready(image, metadata)
    }
}

/// Writes every image as an 8-bit PNG named after its metadata, optionally
/// with a JSON report next to it.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    write_reports: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, write_reports: bool) -> Self {
        Self {
            dir: dir.into(),
            write_reports,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write<T: Serialize>(&self, name: &str, image: &ImageRgbaF32, report: &T) -> Result<(), String> {
        let png = self.dir.join(format!("{name}.png"));
        save_rgba_png(image, &png)?;
        if self.write_reports {
            write_json_file(&self.dir.join(format!("{name}.json")), report)?;
        }
        debug!("DirectorySink: wrote {}", png.display());
        Ok(())
    }
}

impl<K: Serialize + Send + Sync> OutputSink<K> for DirectorySink {
    fn on_debug_sample_ready(&self, image: ImageRgbaF32, metadata: SampleMetadata<K>) {
        if let Err(e) = self.write(&metadata.name, &image, &metadata) {
            error!("DirectorySink: {e}");
        }
    }

    fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<K>) {
        if let Err(e) = self.write(&metadata.name, &image, &metadata) {
            error!("DirectorySink: {e}");
        }
    }
}
