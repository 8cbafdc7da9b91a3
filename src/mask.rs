//! Binary mask input for region extraction.
//!
//! A mask is a fixed-size grid of foreground/background cells stored as an
//! `Array2<bool>` of shape (height, width). Reads outside the grid are
//! background, which lets the tracers probe neighbors without bounds checks
//! at every call site.

use ndarray::Array2;

use crate::error::{Result, RoiKitError};

/// Foreground/background grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Create an all-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    /// Create a mask from row-major cells.
    ///
    /// Fails when `cells.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(RoiKitError::BufferSize {
                expected,
                actual: cells.len(),
            });
        }
        let cells = Array2::from_shape_vec((height, width), cells).map_err(|_| {
            RoiKitError::BufferSize {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { cells })
    }

    /// Create a mask from bit-packed bytes.
    ///
    /// Bits are read row-major, most significant bit first, with no padding
    /// at the end of a row. `bytes` must hold exactly `ceil(width * height / 8)`
    /// bytes.
    pub fn from_packed_bits(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let size = width * height;
        let expected = size.div_ceil(8);
        if bytes.len() != expected {
            return Err(RoiKitError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self::from_fn(width, height, |x, y| {
            let target = y * width + x;
            bytes[target >> 3] & (0x80 >> (target & 7)) != 0
        }))
    }

    /// Create a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        Self {
            cells: Array2::from_shape_fn((height, width), |(y, x)| f(x, y)),
        }
    }

    /// Wrap an existing (height, width) array.
    pub fn from_array(cells: Array2<bool>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// True when the mask has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Cell state at (x, y). Out-of-bounds reads are background.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells.get((y, x)).copied().unwrap_or(false)
    }

    /// Signed variant of [`Mask::get`] for neighbor probing.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && self.get(x as usize, y as usize)
    }

    /// Set a cell. Writes outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = value;
        }
    }

    /// Number of foreground cells.
    pub fn count_foreground(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Swap foreground and background.
    pub fn invert(&self) -> Self {
        Self {
            cells: self.cells.mapv(|v| !v),
        }
    }

    /// Underlying (height, width) array.
    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }
}
