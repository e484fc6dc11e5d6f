//! Even subdivision of angular ranges into grid steps.

/// Split `[min, max)` into `divisions` equal steps and return each step's
/// start. `divisions == 0` is treated as a single step.
///
/// Yaw bands use this: `distribute_left_closed(0.0, 360.0, 4)` gives
/// `[0, 90, 180, 270]`.
pub fn distribute_left_closed(min: f32, max: f32, divisions: usize) -> Vec<f32> {
    let n = divisions.max(1);
    let delta = (max - min) / n as f32;
    (0..n).map(|i| min + delta * i as f32).collect()
}

/// Split `[min, max]` into `divisions` equal bands and return each band's
/// centre, so tiles sit in the middle of their pitch band rather than on
/// its edge.
///
/// `distribute_centered(-90.0, 90.0, 2)` gives `[-45, 45]`.
pub fn distribute_centered(min: f32, max: f32, divisions: usize) -> Vec<f32> {
    let n = divisions.max(1);
    let delta = (max - min) / n as f32;
    (0..n).map(|i| min + delta * (i as f32 + 0.5)).collect()
}
