//! Error taxonomy for layout and blending.

use crate::image::PixelEncoding;

/// Errors surfaced synchronously by pane validation, tile decoding and
/// sample submission. Numerical degeneracies (zero weight at normalization)
/// are not errors; they are absorbed by the normalization policy.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StitchError {
    /// Upstream configuration bug: zero steps, zero resolution, indices out
    /// of range or a degenerate field of view.
    #[error("invalid pane: {0}")]
    InvalidPane(String),
    /// Tile pixel buffer does not match the pane resolution.
    #[error("tile is {actual:?} but pane declares {expected:?}")]
    ResolutionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Raw tile bytes use a channel encoding the resampler does not accept.
    #[error("unsupported tile encoding {0:?}")]
    UnsupportedEncoding(PixelEncoding),
    /// Raw byte length disagrees with the declared encoding and size.
    #[error("tile buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    /// Sample for a frame that is completing or already emitted.
    #[error("frame already completed")]
    FrameCompleted,
    /// Sample for a frame discarded by `abandon`.
    #[error("frame was abandoned")]
    FrameAbandoned,
    /// The same pane slot was submitted twice for one frame.
    #[error("duplicate sample for pane slot {0}")]
    DuplicateSample(usize),
    /// Grid or eye mode differs from the frame's first sample.
    #[error("pane geometry disagrees with frame: {0}")]
    GeometryMismatch(String),
}

pub type Result<T> = std::result::Result<T, StitchError>;
