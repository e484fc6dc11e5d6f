use pano_stitch::prelude::*;
use pano_stitch::PanoramaMetadata;
use std::sync::Mutex;

/// Keeps the emitted panorama summary for printing.
#[derive(Default)]
struct Summary(Mutex<Option<(ImageRgbaF32, PanoramaMetadata<u64>)>>);

impl OutputSink<u64> for Summary {
    fn on_panorama_ready(&self, image: ImageRgbaF32, metadata: PanoramaMetadata<u64>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some((image, metadata));
        }
    }
}

fn main() {
    // Demo stub: stitches one mono frame of a procedural sky
    let planner = LayoutPlanner::new(LayoutParams::default());
    let pose = CameraPose::default();
    let panes = planner.plan(&pose, &pose, (1280, 720));

    let params = BlenderParams {
        map_width: 512,
        map_height: 256,
        ..Default::default()
    };
    let blender = PanoramaBlender::new(params, Summary::default());
    let renderer = EnvironmentRenderer::new(direction_gradient);
    for pane in &panes {
        if let Err(err) = blender.submit(0u64, pane, renderer.render(pane)) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }

    let emitted = blender.sink().0.lock().ok().and_then(|mut slot| slot.take());
    match emitted {
        Some((image, metadata)) => println!(
            "panes={} size={}x{} coverage={:.4} total_ms={:.3}",
            panes.len(),
            image.w,
            image.h,
            metadata.report.coverage(),
            metadata.report.timings.total_ms
        ),
        None => println!("panes={} frame not completed", panes.len()),
    }
}
