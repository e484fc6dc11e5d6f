mod common;

use common::layouts::{mono_panes, stereo_panes, uniform_tile};
use common::sinks::CollectingSink;
use pano_stitch::image::{LinearColor, PixelEncoding, TileBuffer};
use pano_stitch::{BlenderParams, PanoramaBlender, SampleOutcome, StitchError};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

const GRAY: LinearColor = LinearColor::gray(0.5);

fn blender(map: (usize, usize)) -> PanoramaBlender<u64, Arc<CollectingSink<u64>>> {
    let params = BlenderParams {
        map_width: map.0,
        map_height: map.1,
        ..Default::default()
    };
    PanoramaBlender::new(params, Arc::new(CollectingSink::default()))
}

#[test]
fn stereo_frame_completes_on_the_thirty_sixth_sample() {
    common::init_logging();
    let panes = stereo_panes(6, 3, (96, 48));
    assert_eq!(panes[0].expected_sample_count(), 36);
    let blender = blender((48, 24));

    for pane in &panes[..35] {
        let outcome = blender.submit(11, pane, uniform_tile(pane, GRAY)).unwrap();
        assert!(matches!(outcome, SampleOutcome::Accumulated { expected: 36, .. }));
    }
    assert_eq!(blender.sink().panorama_count(), 0);
    assert_eq!(blender.pending_frame_count(), 1);

    let last = &panes[35];
    let outcome = blender.submit(11, last, uniform_tile(last, GRAY)).unwrap();
    assert_eq!(outcome, SampleOutcome::FrameCompleted);
    assert_eq!(blender.pending_frame_count(), 0);

    let (image, report) = blender.sink().take_single();
    assert_eq!((image.w, image.h), (48, 48));
    assert!(report.stereo);
    assert_eq!(report.received_samples, 36);
}

#[test]
fn sample_after_completion_is_rejected_without_second_emission() {
    common::init_logging();
    let panes = mono_panes(4, 2, (64, 32));
    let blender = blender((32, 16));
    for pane in &panes {
        blender.submit(2, pane, uniform_tile(pane, GRAY)).unwrap();
    }
    assert_eq!(blender.sink().panorama_count(), 1);

    let err = blender
        .submit(2, &panes[3], uniform_tile(&panes[3], GRAY))
        .unwrap_err();
    assert_eq!(err, StitchError::FrameCompleted);
    assert_eq!(blender.sink().panorama_count(), 1);
    assert_eq!(blender.pending_frame_count(), 0);
}

#[test]
fn duplicate_slot_does_not_count_twice() {
    let panes = mono_panes(4, 2, (64, 32));
    let blender = blender((32, 16));
    blender.submit(0, &panes[2], uniform_tile(&panes[2], GRAY)).unwrap();
    let err = blender
        .submit(0, &panes[2], uniform_tile(&panes[2], GRAY))
        .unwrap_err();
    assert_eq!(err, StitchError::DuplicateSample(2));

    let mut last = SampleOutcome::Discarded;
    for (i, pane) in panes.iter().enumerate().filter(|(i, _)| *i != 2) {
        last = blender.submit(0, pane, uniform_tile(pane, GRAY)).unwrap();
        if i < 7 {
            assert_ne!(last, SampleOutcome::FrameCompleted);
        }
    }
    assert_eq!(last, SampleOutcome::FrameCompleted);
    assert_eq!(blender.sink().panorama_count(), 1);
}

#[test]
fn mismatched_geometry_is_rejected() {
    let blender = blender((32, 16));
    let four_by_two = mono_panes(4, 2, (64, 32));
    let two_by_one = mono_panes(2, 1, (64, 32));
    blender
        .submit(9, &four_by_two[0], uniform_tile(&four_by_two[0], GRAY))
        .unwrap();
    let err = blender
        .submit(9, &two_by_one[1], uniform_tile(&two_by_one[1], GRAY))
        .unwrap_err();
    assert!(matches!(err, StitchError::GeometryMismatch(_)));

    let stereo = stereo_panes(4, 2, (64, 32));
    let err = blender
        .submit(9, &stereo[9], uniform_tile(&stereo[9], GRAY))
        .unwrap_err();
    assert!(matches!(err, StitchError::GeometryMismatch(_)));
    assert_eq!(blender.pending_frame_count(), 1);
}

#[test]
fn malformed_pane_fails_before_creating_a_frame() {
    let blender = blender((32, 16));
    let mut pane = mono_panes(4, 2, (64, 32)).remove(0);
    pane.num_horizontal_steps = 0;
    let err = blender.submit(1, &pane, TileBuffer::uniform(1, 1, GRAY)).unwrap_err();
    assert!(matches!(err, StitchError::InvalidPane(_)));
    assert_eq!(blender.pending_frame_count(), 0);
}

#[test]
fn eight_bit_tiles_are_refused() {
    let bytes = vec![0u8; 4 * 4 * 4];
    let err = TileBuffer::from_bytes(4, 4, PixelEncoding::Rgba8, &bytes).unwrap_err();
    assert_eq!(err, StitchError::UnsupportedEncoding(PixelEncoding::Rgba8));
}

#[test]
fn abandon_drops_pending_frames_and_rejects_stragglers() {
    common::init_logging();
    let panes = mono_panes(4, 2, (64, 32));
    let blender = blender((32, 16));
    for frame in 0..3u64 {
        blender.submit(frame, &panes[0], uniform_tile(&panes[0], GRAY)).unwrap();
    }
    assert_eq!(blender.pending_frame_count(), 3);
    blender.abandon();
    assert_eq!(blender.pending_frame_count(), 0);
    for frame in 0..3u64 {
        let err = blender
            .submit(frame, &panes[1], uniform_tile(&panes[1], GRAY))
            .unwrap_err();
        assert_eq!(err, StitchError::FrameAbandoned);
    }
    assert_eq!(blender.sink().panorama_count(), 0);
}

#[test]
fn abandon_while_workers_submit_is_safe() {
    let panes = mono_panes(4, 2, (64, 32));
    let blender = blender((32, 16));
    thread::scope(|s| {
        for worker in 0..4usize {
            let panes = &panes;
            let blender = &blender;
            s.spawn(move || {
                for frame in 0..6u64 {
                    for pane in panes.iter().skip(worker).step_by(4) {
                        let result = blender.submit(frame, pane, uniform_tile(pane, GRAY));
                        assert!(!matches!(
                            result,
                            Err(StitchError::DuplicateSample(_))
                                | Err(StitchError::GeometryMismatch(_))
                        ));
                    }
                }
            });
        }
        s.spawn(|| {
            for _ in 0..3 {
                blender.abandon();
                thread::yield_now();
            }
        });
    });
    blender.abandon();
    assert_eq!(blender.pending_frame_count(), 0);

    let mut frames = blender.sink().frames();
    let emitted = frames.len();
    frames.sort_unstable();
    frames.dedup();
    assert_eq!(frames.len(), emitted, "a frame was emitted twice");
}

#[test]
fn concurrent_frames_each_complete_once() {
    common::init_logging();
    let panes = mono_panes(4, 2, (64, 32));
    let blender = blender((32, 16));
    let frames = 5u64;
    thread::scope(|s| {
        for worker in 0..4usize {
            let panes = &panes;
            let blender = &blender;
            s.spawn(move || {
                for frame in (0..frames).rev() {
                    for pane in panes.iter().skip(worker).step_by(4) {
                        blender
                            .submit(frame, pane, uniform_tile(pane, GRAY))
                            .unwrap();
                    }
                }
            });
        }
    });
    assert_eq!(blender.pending_frame_count(), 0);
    let mut emitted = blender.sink().frames();
    emitted.sort_unstable();
    assert_eq!(emitted, (0..frames).collect::<Vec<_>>());
}

fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<_>>()).prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn completion_fires_once_for_any_order(order in permutation(8)) {
        let panes = mono_panes(4, 2, (32, 16));
        let blender = blender((16, 8));
        for (n, &i) in order.iter().enumerate() {
            let outcome = blender.submit(4, &panes[i], uniform_tile(&panes[i], GRAY)).unwrap();
            let done = n + 1 == order.len();
            prop_assert_eq!(outcome == SampleOutcome::FrameCompleted, done);
            prop_assert_eq!(blender.sink().panorama_count(), usize::from(done));
        }
    }

    #[test]
    fn completion_fires_once_under_concurrency(order in permutation(8), workers in 2usize..5) {
        let panes = mono_panes(4, 2, (32, 16));
        let blender = blender((16, 8));
        let completions: usize = thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|w| {
                    let order = &order;
                    let panes = &panes;
                    let blender = &blender;
                    s.spawn(move || {
                        order
                            .iter()
                            .skip(w)
                            .step_by(workers)
                            .filter(|&&i| {
                                blender.submit(4, &panes[i], uniform_tile(&panes[i], GRAY))
                                    == Ok(SampleOutcome::FrameCompleted)
                            })
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(blender.sink().panorama_count(), 1);
        prop_assert_eq!(blender.pending_frame_count(), 0);
    }
}
