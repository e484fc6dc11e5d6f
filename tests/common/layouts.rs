use pano_stitch::image::{LinearColor, TileBuffer};
use pano_stitch::{CameraPose, LayoutParams, LayoutPlanner, Pane, StereoParams};

/// Panes of one mono frame with default overlap and an identity camera.
pub fn mono_panes(h: i32, v: i32, backbuffer: (usize, usize)) -> Vec<Pane> {
    plan(
        LayoutParams {
            horizontal_steps: h,
            vertical_steps: v,
            ..Default::default()
        },
        backbuffer,
    )
}

/// Panes of one stereo frame with default eye options.
pub fn stereo_panes(h: i32, v: i32, backbuffer: (usize, usize)) -> Vec<Pane> {
    plan(
        LayoutParams {
            horizontal_steps: h,
            vertical_steps: v,
            stereo: Some(StereoParams::default()),
            ..Default::default()
        },
        backbuffer,
    )
}

pub fn plan(params: LayoutParams, backbuffer: (usize, usize)) -> Vec<Pane> {
    let pose = CameraPose::default();
    LayoutPlanner::new(params).plan(&pose, &pose, backbuffer)
}

/// Tile of `pane`'s resolution filled with one colour.
pub fn uniform_tile(pane: &Pane, color: LinearColor) -> TileBuffer {
    TileBuffer::uniform(pane.resolution.0, pane.resolution.1, color)
}
