//! Thresholding an image into a binary [`Mask`].

use ndarray::Axis;

use super::grey::GreyOptions;
use super::Image;
use crate::error::{Result, RoiKitError};
use crate::mask::Mask;

/// Settings for [`Image::mask`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskOptions {
    /// Fraction of the full 0-255 range; pixels at or above it are foreground.
    pub threshold: f32,
    /// Swap foreground and background.
    pub invert: bool,
    /// Scale grey by alpha first, so transparent pixels become background.
    pub use_alpha: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            invert: false,
            use_alpha: true,
        }
    }
}

impl Image {
    /// Threshold the BT.709 grey value of each pixel.
    pub fn mask(&self, options: &MaskOptions) -> Result<Mask> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(RoiKitError::InvalidThreshold(options.threshold));
        }
        let cut = (options.threshold * 255.0).round() as u8;

        let grey = self.grey(&GreyOptions {
            merge_alpha: options.use_alpha,
            ..GreyOptions::default()
        });
        let cells = grey
            .data()
            .index_axis(Axis(2), 0)
            .mapv(|v| (v >= cut) != options.invert);
        Ok(Mask::from_array(cells))
    }
}
