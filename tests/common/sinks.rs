use pano_stitch::diagnostics::FrameReport;
use pano_stitch::image::ImageRgbaF32;
use pano_stitch::{OutputSink, PanoramaMetadata, SampleMetadata};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Keeps every emitted panorama and counts debug samples.
pub struct CollectingSink<K> {
    panoramas: Mutex<Vec<(K, ImageRgbaF32, FrameReport)>>,
    debug_samples: AtomicUsize,
}

impl<K> Default for CollectingSink<K> {
    fn default() -> Self {
        Self {
            panoramas: Mutex::new(Vec::new()),
            debug_samples: AtomicUsize::new(0),
        }
    }
}

impl<K: Clone> CollectingSink<K> {
    pub fn panorama_count(&self) -> usize {
        self.panoramas.lock().unwrap().len()
    }

    pub fn debug_sample_count(&self) -> usize {
        self.debug_samples.load(Ordering::SeqCst)
    }

    pub fn frames(&self) -> Vec<K> {
        self.panoramas
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _, _)| k.clone())
            .collect()
    }

    /// Remove and return the only emitted panorama.
    pub fn take_single(&self) -> (ImageRgbaF32, FrameReport) {
        let mut panoramas = self.panoramas.lock().unwrap();
        assert_eq!(panoramas.len(), 1, "expected exactly one panorama");
        let (_, image, report) = panoramas.remove(0);
        (image, report)
    }
}

impl<K: Send> OutputSink<K> for CollectingSink<K> {
    fn on_debug_sample_ready(&self, _image: ImageRgbaF32, _metadata: SampleMetadata<K>) {
        self.debug_samples.fetch_add(1, Ordering::SeqCst);
    }

    fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<K>) {
        self.panoramas
            .lock()
            .unwrap()
            .push((metadata.frame, image, metadata.report));
    }
}
