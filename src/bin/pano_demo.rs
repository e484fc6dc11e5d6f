use log::info;
use pano_stitch::config::{self, StitchConfig};
use pano_stitch::render::{direction_gradient, EnvironmentRenderer, PaneRenderer};
use pano_stitch::{
    DirectorySink, LayoutPlanner, Pane, PanoramaBlender, SampleOutcome, StitchError,
};
use std::env;
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn usage() -> String {
    "Usage: pano_demo <config.json>".to_string()
}

fn main() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let planner = LayoutPlanner::new(config.layout.clone());
    let sink = DirectorySink::new(&config.output.dir, config.output.write_reports);
    let blender = PanoramaBlender::new(config.blender.clone(), sink);
    let base = EnvironmentRenderer::new(direction_gradient);
    let renderer: Box<dyn PaneRenderer> = if config.sequence.half_float_tiles {
        Box::new(base.with_half_float())
    } else {
        Box::new(base)
    };

    let start = Instant::now();
    let mut completed = 0usize;
    for frame in 0..config.sequence.frames {
        let current = config.sequence.pose(frame);
        let previous = config.sequence.pose(frame.saturating_sub(1));
        let panes = planner.plan(&current, &previous, config.backbuffer.size());
        let outcomes = submit_frame(&blender, renderer.as_ref(), u64::from(frame), &panes)
            .map_err(|e| format!("Frame {frame}: {e}"))?;
        completed += outcomes
            .iter()
            .filter(|o| **o == SampleOutcome::FrameCompleted)
            .count();
    }

    let pending = blender.pending_frame_count();
    if pending > 0 {
        blender.abandon();
        return Err(format!("{pending} frame(s) never received all samples"));
    }
    print_summary(&config, &planner, completed, start);
    Ok(())
}

fn submit_frame(
    blender: &PanoramaBlender<u64, DirectorySink>,
    renderer: &dyn PaneRenderer,
    frame: u64,
    panes: &[Pane],
) -> Result<Vec<SampleOutcome>, StitchError> {
    #[cfg(feature = "parallel")]
    let iter = panes.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = panes.iter();
    iter.map(|pane| blender.submit(frame, pane, renderer.render(pane)))
        .collect()
}

fn print_summary(config: &StitchConfig, planner: &LayoutPlanner, completed: usize, start: Instant) {
    let (hfov, vfov) = planner.field_of_view();
    let (tw, th) = planner.pane_resolution(config.backbuffer.size());
    info!("pano_demo finished in {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
    println!("Stitch summary");
    println!(
        "  grid: {}x{} eyes={} panes/frame={}",
        planner.horizontal_steps(),
        planner.vertical_steps(),
        planner.eye_multiplier(),
        planner.panes_per_frame()
    );
    println!("  pane: fov={hfov:.2}x{vfov:.2} deg tile={tw}x{th}");
    println!(
        "  map: {}x{} frames={completed}/{}",
        config.blender.map_width, config.blender.map_height, config.sequence.frames
    );
    println!("  output: {}", config.output.dir.display());
}
