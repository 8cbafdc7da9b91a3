//! 8-bit images and the operations that turn them into masks.
//!
//! ## Image Format
//!
//! Pixels are stored in an `Array3<u8>` of shape (height, width, channels):
//!
//! | Kind  | Channels | Layout |
//! |-------|----------|--------|
//! | GREY  | 1 | luminance |
//! | GREYA | 2 | luminance + alpha |
//! | RGB   | 3 | red, green, blue |
//! | RGBA  | 4 | red, green, blue, alpha |
//!
//! Operations never modify their input; each returns a new image (or mask).

use std::fmt;

use ndarray::Array3;

use crate::error::{Result, RoiKitError};
use crate::roi::RoiManager;

pub mod convert;
pub mod grey;
pub mod pad;
pub mod rotate;
pub mod threshold;

pub use grey::{GreyAlgorithm, GreyOptions};
pub use pad::{PadAlgorithm, PadOptions};
pub use threshold::MaskOptions;

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Grey,
    GreyA,
    Rgb,
    Rgba,
}

impl ImageKind {
    /// Color components, alpha excluded.
    pub fn components(self) -> usize {
        match self {
            ImageKind::Grey | ImageKind::GreyA => 1,
            ImageKind::Rgb | ImageKind::Rgba => 3,
        }
    }

    pub fn alpha(self) -> bool {
        matches!(self, ImageKind::GreyA | ImageKind::Rgba)
    }

    /// Components plus alpha.
    pub fn channels(self) -> usize {
        self.components() + usize::from(self.alpha())
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageKind::Grey => "GREY",
            ImageKind::GreyA => "GREYA",
            ImageKind::Rgb => "RGB",
            ImageKind::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    kind: ImageKind,
    data: Array3<u8>,
}

impl Image {
    /// Create a black (and fully transparent, if alpha) image.
    pub fn new(width: usize, height: usize, kind: ImageKind) -> Self {
        Self {
            kind,
            data: Array3::zeros((height, width, kind.channels())),
        }
    }

    /// Create an image from interleaved row-major samples.
    pub fn from_vec(width: usize, height: usize, kind: ImageKind, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * kind.channels();
        if data.len() != expected {
            return Err(RoiKitError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let data = Array3::from_shape_vec((height, width, kind.channels()), data).map_err(
            |_| RoiKitError::BufferSize {
                expected,
                actual: expected,
            },
        )?;
        Ok(Self { kind, data })
    }

    /// Wrap a (height, width, channels) array.
    pub fn from_array(kind: ImageKind, data: Array3<u8>) -> Result<Self> {
        let channels = data.dim().2;
        if channels != kind.channels() {
            return Err(RoiKitError::BufferSize {
                expected: kind.channels(),
                actual: channels,
            });
        }
        Ok(Self { kind, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.kind.channels()
    }

    /// Sample of channel `c` at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[[y, x, c]]
    }

    pub fn set(&mut self, x: usize, y: usize, c: usize, value: u8) {
        self.data[[y, x, c]] = value;
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Interleaved row-major samples.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// A fresh ROI manager with default options.
    pub fn roi_manager(&self) -> RoiManager {
        RoiManager::default()
    }
}
