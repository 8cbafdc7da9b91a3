//! Error type shared by the ROI engine and the image operations.

use thiserror::Error;

/// Errors reported to callers.
///
/// Only input validation fails. Once labeling has started every step is total,
/// and internal contract violations (such as tracing a label that does not
/// exist) panic instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoiKitError {
    // -- Mask / extraction --
    #[error("cannot extract regions from an empty {width}x{height} mask")]
    EmptyMask { width: usize, height: usize },

    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    // -- Image operations --
    #[error("free angle rotation is not supported: {0} degrees")]
    UnsupportedAngle(i32),

    #[error("the color array must at least have the same length as the number of channels: expected {expected}, got {actual}")]
    ColorLength { expected: usize, actual: usize },

    #[error("threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f32),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoiKitError>;
