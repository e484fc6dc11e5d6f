mod common;

use common::layouts::{mono_panes, plan, stereo_panes};
use pano_stitch::geometry::Rotator;
use pano_stitch::{CameraPose, LayoutParams, LayoutPlanner, StereoParams, StitchError};
use nalgebra::Vector3;

#[test]
fn planning_twice_is_bit_identical() {
    let params = LayoutParams {
        horizontal_steps: 5,
        vertical_steps: 3,
        overlap_percent: 37.5,
        stereo: Some(StereoParams::default()),
        ..Default::default()
    };
    let pose = CameraPose::new(Vector3::new(10.0, -4.0, 170.0), Rotator::new(12.0, 33.0, -5.0));
    let prev = CameraPose::new(Vector3::new(9.0, -4.0, 170.0), Rotator::new(11.0, 31.0, -5.0));
    let planner = LayoutPlanner::new(params.clone());
    let a = planner.plan(&pose, &prev, (1920, 1080));
    let b = LayoutPlanner::new(params).plan(&pose, &prev, (1920, 1080));
    assert_eq!(a.len(), b.len());
    for (pa, pb) in a.iter().zip(&b) {
        assert_eq!(pa.horizontal_fov.to_bits(), pb.horizontal_fov.to_bits());
        assert_eq!(pa.vertical_fov.to_bits(), pb.vertical_fov.to_bits());
        let ra = pa.camera.rotation;
        let rb = pb.camera.rotation;
        assert_eq!(
            [ra.pitch.to_bits(), ra.yaw.to_bits(), ra.roll.to_bits()],
            [rb.pitch.to_bits(), rb.yaw.to_bits(), rb.roll.to_bits()]
        );
    }
    assert_eq!(a, b);
}

#[test]
fn absolute_indices_cover_every_slot_once() {
    for panes in [mono_panes(4, 2, (256, 128)), stereo_panes(6, 3, (256, 128))] {
        let expected = panes[0].expected_sample_count();
        assert_eq!(panes.len(), expected);
        let mut slots: Vec<usize> = panes.iter().map(|p| p.absolute_index()).collect();
        slots.sort_unstable();
        assert_eq!(slots, (0..expected).collect::<Vec<_>>());
        for pane in &panes {
            pane.validate().unwrap();
        }
    }
}

#[test]
fn stereo_frame_has_thirty_six_panes() {
    let panes = stereo_panes(6, 3, (256, 128));
    assert_eq!(panes.len(), 36);
    assert!(panes[..18].iter().all(|p| p.eye_index == 0));
    assert!(panes[18..].iter().all(|p| p.eye_index == 1));
    assert_eq!(panes[18].absolute_index(), 18);
}

#[test]
fn eyes_are_offset_along_the_camera_right_axis() {
    let stereo = StereoParams {
        eye_separation: 6.0,
        convergence_distance: Some(90.0),
    };
    let planner = LayoutPlanner::new(LayoutParams {
        stereo: Some(stereo),
        ..Default::default()
    });
    let base = CameraPose::new(Vector3::zeros(), Rotator::new(0.0, 90.0, 0.0));
    let left = planner.eye_pose(&base, 0);
    let right = planner.eye_pose(&base, 1);

    // Facing +Y, the right axis is -X.
    assert!((left.location - Vector3::new(3.0, 0.0, 0.0)).norm() < 1e-4);
    assert!((right.location - Vector3::new(-3.0, 0.0, 0.0)).norm() < 1e-4);

    // Both eyes toe in toward the convergence point.
    let toe_in = (3.0f32 / 90.0).atan().to_degrees();
    assert!((left.rotation.yaw - (90.0 + toe_in)).abs() < 1e-3);
    assert!((right.rotation.yaw - (90.0 - toe_in)).abs() < 1e-3);
}

#[test]
fn without_convergence_eyes_share_orientation() {
    let planner = LayoutPlanner::new(LayoutParams {
        stereo: Some(StereoParams {
            eye_separation: 6.5,
            convergence_distance: None,
        }),
        ..Default::default()
    });
    let base = CameraPose::new(Vector3::zeros(), Rotator::new(5.0, 20.0, 0.0));
    assert_eq!(planner.eye_pose(&base, 0).rotation, base.rotation);
    assert_eq!(planner.eye_pose(&base, 1).rotation, base.rotation);
    assert_eq!(planner.eye_pose(&base, -1), base);
}

#[test]
fn fov_overrides_win_over_derived_values() {
    let panes = plan(
        LayoutParams {
            horizontal_steps: 4,
            vertical_steps: 2,
            horizontal_fov_override: Some(100.0),
            vertical_fov_override: Some(-1.0),
            ..Default::default()
        },
        (400, 200),
    );
    assert_eq!(panes[0].horizontal_fov, 100.0);
    assert_eq!(panes[0].vertical_fov, 135.0);
}

#[test]
fn invalid_step_counts_are_clamped() {
    let planner = LayoutPlanner::new(LayoutParams {
        horizontal_steps: 0,
        vertical_steps: -3,
        ..Default::default()
    });
    assert_eq!(planner.horizontal_steps(), 1);
    assert_eq!(planner.vertical_steps(), 1);
    let pose = CameraPose::default();
    assert_eq!(planner.plan(&pose, &pose, (64, 32)).len(), 1);
}

#[test]
fn malformed_pane_is_rejected() {
    let mut pane = mono_panes(4, 2, (64, 32)).remove(0);
    pane.resolution = (0, 16);
    assert!(matches!(pane.validate(), Err(StitchError::InvalidPane(_))));

    let mut pane = mono_panes(4, 2, (64, 32)).remove(0);
    pane.num_vertical_steps = 0;
    assert!(matches!(pane.validate(), Err(StitchError::InvalidPane(_))));

    let mut pane = mono_panes(4, 2, (64, 32)).remove(0);
    pane.horizontal_step_index = 4;
    assert!(matches!(pane.validate(), Err(StitchError::InvalidPane(_))));
}
