//! Concurrent frame accumulator.
//!
//! Any number of worker threads call [`PanoramaBlender::submit`] with tiles
//! of any frame, in any order. Per frame the blender moves through
//! `accumulating → completing → retired`:
//!
//! - the frame map lock guards creation, the received-slot set, the finished
//!   tally and the phase; it is held only for bookkeeping;
//! - each frame's buffer lock guards the colour/weight sums during a merge;
//! - resampling runs under neither lock, on a private intermediate buffer.
//!
//! The sample whose tally update reaches the expected count flips the frame
//! to `completing` under the map lock, so exactly one thread normalises and
//! emits it. Retired frame ids are remembered so a late sample is reported
//! instead of silently starting a second, incomplete panorama.

use super::frame::{normalize, FrameState};
use super::params::BlenderParams;
use super::sink::{OutputSink, PanoramaMetadata, SampleMetadata};
use crate::diagnostics::{FrameReport, SampleReport, Stopwatch};
use crate::error::{Result, StitchError};
use crate::geometry::EquirectGrid;
use crate::image::TileBuffer;
use crate::layout::Pane;
use crate::resample::{blend_tile, BlendSettings};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What happened to a submitted sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Merged; the frame still waits for more samples.
    Accumulated { finished: usize, expected: usize },
    /// Merged, and this sample completed the frame, which has been emitted.
    FrameCompleted,
    /// The frame was abandoned while this sample was being blended.
    Discarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Accumulating,
    Completing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Retired {
    Completed,
    Abandoned,
}

struct PendingFrame {
    state: Arc<FrameState>,
    received: HashSet<usize>,
    finished: usize,
    phase: Phase,
}

struct Registry<K> {
    pending: HashMap<K, PendingFrame>,
    retired: HashMap<K, Retired>,
}

/// Blends tiles of many frames into equirectangular panoramas and hands each
/// finished frame to `S` exactly once.
pub struct PanoramaBlender<K, S> {
    params: BlenderParams,
    grid: EquirectGrid,
    settings: BlendSettings,
    sink: S,
    registry: Mutex<Registry<K>>,
}

impl<K, S> PanoramaBlender<K, S>
where
    K: Eq + Hash + Clone + Display,
    S: OutputSink<K>,
{
    pub fn new(params: BlenderParams, sink: S) -> Self {
        let mut grid = params.grid();
        if grid.width == 0 || grid.height == 0 {
            warn!(
                "PanoramaBlender: map size {}x{} clamped to at least 1x1",
                grid.width, grid.height
            );
            grid = EquirectGrid::new(grid.width.max(1), grid.height.max(1));
        }
        let settings = params.blend_settings();
        Self {
            params,
            grid,
            settings,
            sink,
            registry: Mutex::new(Registry {
                pending: HashMap::new(),
                retired: HashMap::new(),
            }),
        }
    }

    pub fn params(&self) -> &BlenderParams {
        &self.params
    }

    /// Per-eye map geometry.
    pub fn grid(&self) -> EquirectGrid {
        self.grid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Frames created but not yet emitted or abandoned.
    pub fn pending_frame_count(&self) -> usize {
        self.registry().pending.len()
    }

    /// Drop every frame still accumulating without emitting it.
    ///
    /// Samples already being blended for those frames finish into their
    /// (now detached) buffers and report [`SampleOutcome::Discarded`]; later
    /// samples are rejected with [`StitchError::FrameAbandoned`]. A frame
    /// already completing is left to finish its emission.
    pub fn abandon(&self) {
        let mut registry = self.registry();
        let Registry { pending, retired } = &mut *registry;
        let mut dropped = 0usize;
        pending.retain(|frame, entry| {
            if entry.phase == Phase::Completing {
                return true;
            }
            retired.insert(frame.clone(), Retired::Abandoned);
            dropped += 1;
            false
        });
        if dropped > 0 {
            warn!("PanoramaBlender: abandoned {dropped} pending frame(s)");
        }
    }

    /// Forget retired frame ids so they may be reused.
    pub fn clear_retired(&self) {
        self.registry().retired.clear();
    }

    /// Resample `tile` for `pane` and accumulate it into `frame`.
    ///
    /// Fails without touching any frame on a malformed pane, a tile whose
    /// size differs from the pane resolution, a duplicate pane slot, a grid
    /// mismatch with earlier samples, or a frame that is already completed or
    /// abandoned.
    pub fn submit(&self, frame: K, pane: &Pane, tile: TileBuffer) -> Result<SampleOutcome> {
        pane.validate()?;
        let actual = (tile.width(), tile.height());
        if actual != pane.resolution {
            return Err(StitchError::ResolutionMismatch {
                expected: pane.resolution,
                actual,
            });
        }

        let state = self.register(&frame, pane)?;

        let mut clock = Stopwatch::start();
        let blend = blend_tile(pane, &tile, &self.grid, self.settings);
        drop(tile);
        let blend_ms = clock.lap("blend");
        state.merge(&blend);
        let merge_ms = clock.lap("merge");
        debug!(
            "PanoramaBlender: frame {frame} pane {} rect={:?} touched={} blend_ms={blend_ms:.3} merge_ms={merge_ms:.3}",
            pane.absolute_index(),
            blend.rect,
            blend.touched,
        );

        if self.params.debug_samples {
            let timings = clock.finish();
            let report = SampleReport {
                absolute_index: pane.absolute_index(),
                horizontal_step_index: pane.horizontal_step_index,
                vertical_step_index: pane.vertical_step_index,
                eye_index: pane.eye_index,
                tile_width: pane.resolution.0,
                tile_height: pane.resolution.1,
                rect: blend.rect,
                touched_pixels: blend.touched,
                timings,
            };
            let metadata = SampleMetadata {
                name: self.debug_sample_name(&frame, pane),
                frame: frame.clone(),
                pane: pane.clone(),
                report,
            };
            self.sink.on_debug_sample_ready(blend.into_image(), metadata);
        } else {
            drop(blend);
        }

        let (finished, expected) = {
            let mut registry = self.registry();
            let Some(entry) = registry
                .pending
                .get_mut(&frame)
                .filter(|entry| Arc::ptr_eq(&entry.state, &state))
            else {
                debug!("PanoramaBlender: frame {frame} was abandoned mid-sample; discarding");
                return Ok(SampleOutcome::Discarded);
            };
            entry.finished += 1;
            let expected = state.expected_sample_count();
            if entry.finished == expected {
                entry.phase = Phase::Completing;
            }
            (entry.finished, expected)
        };

        if finished < expected {
            return Ok(SampleOutcome::Accumulated { finished, expected });
        }
        self.complete(frame, &state);
        Ok(SampleOutcome::FrameCompleted)
    }

    /// `{pass}_PaneX_{h}_PaneY_{v}[_Eye_{e}]-Blended.{frame}`
    pub fn debug_sample_name(&self, frame: &K, pane: &Pane) -> String {
        let eye = if pane.is_stereo() {
            format!("_Eye_{}", pane.eye_index)
        } else {
            String::new()
        };
        format!(
            "{}_PaneX_{}_PaneY_{}{}-Blended.{}",
            self.params.pass_name,
            pane.horizontal_step_index,
            pane.vertical_step_index,
            eye,
            frame
        )
    }

    fn registry(&self) -> MutexGuard<'_, Registry<K>> {
        // Bookkeeping updates are single field writes; a panicked holder
        // cannot leave the maps half-updated.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Find or create the frame and claim this pane's slot in it.
    fn register(&self, frame: &K, pane: &Pane) -> Result<Arc<FrameState>> {
        let mut registry = self.registry();
        if let Some(retired) = registry.retired.get(frame) {
            warn!(
                "PanoramaBlender: dropping sample {} for {:?} frame {frame}",
                pane.absolute_index(),
                retired
            );
            return Err(match retired {
                Retired::Completed => StitchError::FrameCompleted,
                Retired::Abandoned => StitchError::FrameAbandoned,
            });
        }

        let grid = self.grid;
        let entry = registry.pending.entry(frame.clone()).or_insert_with(|| {
            let state = FrameState::new(pane, grid);
            let (w, h) = state.output_size();
            debug!(
                "PanoramaBlender: new frame {frame} expecting {} samples into {w}x{h}",
                state.expected_sample_count()
            );
            PendingFrame {
                state: Arc::new(state),
                received: HashSet::new(),
                finished: 0,
                phase: Phase::Accumulating,
            }
        });

        if entry.phase == Phase::Completing {
            warn!("PanoramaBlender: frame {frame} is completing; dropping late sample");
            return Err(StitchError::FrameCompleted);
        }
        entry.state.check_geometry(pane)?;
        let slot = pane.absolute_index();
        if !entry.received.insert(slot) {
            warn!("PanoramaBlender: duplicate sample {slot} for frame {frame}");
            return Err(StitchError::DuplicateSample(slot));
        }
        Ok(Arc::clone(&entry.state))
    }

    /// Normalise, emit, then retire. Runs on exactly one thread per frame.
    fn complete(&self, frame: K, state: &FrameState) {
        let mut clock = Stopwatch::started_at(state.created());
        clock.lap("accumulate");
        let (width, height) = state.output_size();
        let (image, zero_weight_pixels) =
            normalize(state.take_buffers(), width, height, state.include_alpha());
        clock.lap("normalize");
        if zero_weight_pixels > 0 {
            warn!(
                "PanoramaBlender: frame {frame} has {zero_weight_pixels} pixel(s) with zero weight; written as transparent black"
            );
        }

        let timings = clock.finish();
        let expected = state.expected_sample_count();
        let report = FrameReport {
            width,
            height,
            stereo: state.is_stereo(),
            expected_samples: expected,
            received_samples: expected,
            zero_weight_pixels,
            timings,
        };
        debug!(
            "PanoramaBlender: frame {frame} complete {width}x{height} in {:.3} ms",
            report.timings.total_ms
        );
        let metadata = PanoramaMetadata {
            name: format!("{}.{}", self.params.pass_name, frame),
            frame: frame.clone(),
            report,
        };
        self.sink.on_panorama_ready(image, metadata);

        let mut registry = self.registry();
        registry.pending.remove(&frame);
        registry.retired.insert(frame, Retired::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageRgbaF32, LinearColor};
    use crate::layout::{CameraPose, LayoutParams, LayoutPlanner};

    #[derive(Default)]
    struct Collect {
        panoramas: Mutex<Vec<(u32, usize, usize)>>,
        debug_names: Mutex<Vec<String>>,
    }

    impl OutputSink<u32> for Collect {
        fn on_debug_sample_ready(&self, _image: ImageRgbaF32, metadata: SampleMetadata<u32>) {
            self.debug_names.lock().unwrap().push(metadata.name);
        }

        fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<u32>) {
            self.panoramas
                .lock()
                .unwrap()
                .push((metadata.frame, image.w, image.h));
        }
    }

    fn panes(h: i32, v: i32) -> Vec<Pane> {
        let planner = LayoutPlanner::new(LayoutParams {
            horizontal_steps: h,
            vertical_steps: v,
            ..Default::default()
        });
        let pose = CameraPose::default();
        planner.plan(&pose, &pose, (64, 32))
    }

    fn tile_for(pane: &Pane) -> TileBuffer {
        TileBuffer::uniform(pane.resolution.0, pane.resolution.1, LinearColor::gray(0.5))
    }

    fn blender(debug_samples: bool) -> PanoramaBlender<u32, Collect> {
        let params = BlenderParams {
            map_width: 64,
            map_height: 32,
            debug_samples,
            ..Default::default()
        };
        PanoramaBlender::new(params, Collect::default())
    }

    #[test]
    fn last_sample_completes_the_frame() {
        let blender = blender(false);
        let panes = panes(2, 1);
        let first = blender.submit(7, &panes[0], tile_for(&panes[0])).unwrap();
        assert_eq!(first, SampleOutcome::Accumulated { finished: 1, expected: 2 });
        assert_eq!(blender.pending_frame_count(), 1);
        let second = blender.submit(7, &panes[1], tile_for(&panes[1])).unwrap();
        assert_eq!(second, SampleOutcome::FrameCompleted);
        assert_eq!(blender.pending_frame_count(), 0);
        assert_eq!(*blender.sink().panoramas.lock().unwrap(), vec![(7, 64, 32)]);
    }

    #[test]
    fn late_and_duplicate_samples_are_rejected() {
        let blender = blender(false);
        let panes = panes(2, 1);
        blender.submit(1, &panes[0], tile_for(&panes[0])).unwrap();
        assert_eq!(
            blender.submit(1, &panes[0], tile_for(&panes[0])),
            Err(StitchError::DuplicateSample(0))
        );
        blender.submit(1, &panes[1], tile_for(&panes[1])).unwrap();
        assert_eq!(
            blender.submit(1, &panes[1], tile_for(&panes[1])),
            Err(StitchError::FrameCompleted)
        );
        assert_eq!(blender.sink().panoramas.lock().unwrap().len(), 1);
    }

    #[test]
    fn resolution_mismatch_is_reported() {
        let blender = blender(false);
        let panes = panes(2, 1);
        let tile = TileBuffer::uniform(3, 3, LinearColor::BLACK);
        let err = blender.submit(0, &panes[0], tile).unwrap_err();
        assert!(matches!(err, StitchError::ResolutionMismatch { .. }));
        assert_eq!(blender.pending_frame_count(), 0);
    }

    #[test]
    fn debug_samples_are_named_per_pane() {
        let blender = blender(true);
        let panes = panes(2, 1);
        blender.submit(3, &panes[1], tile_for(&panes[1])).unwrap();
        assert_eq!(
            *blender.sink().debug_names.lock().unwrap(),
            vec!["Panoramic_PaneX_1_PaneY_0-Blended.3".to_string()]
        );
    }

    #[test]
    fn abandon_discards_pending_frames() {
        let blender = blender(false);
        let panes = panes(2, 1);
        blender.submit(5, &panes[0], tile_for(&panes[0])).unwrap();
        blender.abandon();
        assert_eq!(blender.pending_frame_count(), 0);
        assert_eq!(
            blender.submit(5, &panes[1], tile_for(&panes[1])),
            Err(StitchError::FrameAbandoned)
        );
        assert!(blender.sink().panoramas.lock().unwrap().is_empty());
        blender.clear_retired();
        blender.submit(5, &panes[1], tile_for(&panes[1])).unwrap();
        assert_eq!(blender.pending_frame_count(), 1);
    }
}
