//! Greyscale reduction.
//!
//! Rows are processed in parallel with rayon. Grey inputs keep their single
//! channel regardless of the requested algorithm.
//!
//! ## Alpha Handling
//!
//! - **keep_alpha**: output is GREYA with alpha copied through
//! - **merge_alpha** (default): grey is scaled by alpha / 255, output is GREY
//!
//! `keep_alpha` wins when both are set. Both are ignored without alpha.

use ndarray::{Array3, Axis};
use rayon::prelude::*;

use super::{Image, ImageKind};

/// ITU-R BT.709 luminosity coefficients
const LUMA709_R: f32 = 0.2126;
const LUMA709_G: f32 = 0.7152;
const LUMA709_B: f32 = 0.0722;

/// ITU-R BT.601 luminosity coefficients
const LUMA601_R: f32 = 0.299;
const LUMA601_G: f32 = 0.587;
const LUMA601_B: f32 = 0.114;

/// How RGB is reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreyAlgorithm {
    #[default]
    Luma709,
    Luma601,
    Red,
    Green,
    Blue,
    Average,
    Minimum,
    Maximum,
    /// Mean of the largest and smallest component.
    Lightness,
}

impl GreyAlgorithm {
    /// Grey value of one RGB pixel.
    #[inline]
    pub fn apply(self, r: u8, g: u8, b: u8) -> u8 {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        match self {
            GreyAlgorithm::Luma709 => (LUMA709_R * rf + LUMA709_G * gf + LUMA709_B * bf) as u8,
            GreyAlgorithm::Luma601 => (LUMA601_R * rf + LUMA601_G * gf + LUMA601_B * bf) as u8,
            GreyAlgorithm::Red => r,
            GreyAlgorithm::Green => g,
            GreyAlgorithm::Blue => b,
            GreyAlgorithm::Average => ((r as u16 + g as u16 + b as u16) / 3) as u8,
            GreyAlgorithm::Minimum => r.min(g).min(b),
            GreyAlgorithm::Maximum => r.max(g).max(b),
            GreyAlgorithm::Lightness => ((r.max(g).max(b) as u16 + r.min(g).min(b) as u16) / 2) as u8,
        }
    }
}

/// Settings for [`Image::grey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreyOptions {
    pub algorithm: GreyAlgorithm,
    pub keep_alpha: bool,
    pub merge_alpha: bool,
}

impl Default for GreyOptions {
    fn default() -> Self {
        Self {
            algorithm: GreyAlgorithm::Luma709,
            keep_alpha: false,
            merge_alpha: true,
        }
    }
}

impl Image {
    /// Reduce the image to a single grey channel (plus alpha with `keep_alpha`).
    pub fn grey(&self, options: &GreyOptions) -> Image {
        let kind = self.kind();
        let keep_alpha = options.keep_alpha && kind.alpha();
        let merge_alpha = options.merge_alpha && kind.alpha() && !keep_alpha;
        let alpha_channel = kind.components();

        let out_kind = if keep_alpha {
            ImageKind::GreyA
        } else {
            ImageKind::Grey
        };
        let (height, width) = (self.height(), self.width());
        let mut output = Array3::<u8>::zeros((height, width, out_kind.channels()));

        output
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(self.data().axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut out_row, in_row)| {
                for x in 0..width {
                    let grey = if kind.components() == 1 {
                        in_row[[x, 0]]
                    } else {
                        options
                            .algorithm
                            .apply(in_row[[x, 0]], in_row[[x, 1]], in_row[[x, 2]])
                    };
                    if merge_alpha {
                        let a = in_row[[x, alpha_channel]] as u16;
                        out_row[[x, 0]] = (grey as u16 * a / 255) as u8;
                    } else {
                        out_row[[x, 0]] = grey;
                        if keep_alpha {
                            out_row[[x, 1]] = in_row[[x, alpha_channel]];
                        }
                    }
                }
            });

        Image {
            kind: out_kind,
            data: output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma709_white_and_black() {
        let image = Image::from_vec(2, 1, ImageKind::Rgb, vec![255, 255, 255, 0, 0, 0]).unwrap();
        let grey = image.grey(&GreyOptions::default());
        assert_eq!(grey.kind(), ImageKind::Grey);
        // f32 products may land just below 255 before truncation
        assert!(grey.get(0, 0, 0) >= 254);
        assert_eq!(grey.get(1, 0, 0), 0);
    }

    #[test]
    fn test_algorithms() {
        let (r, g, b) = (200, 100, 50);
        assert_eq!(GreyAlgorithm::Red.apply(r, g, b), 200);
        assert_eq!(GreyAlgorithm::Green.apply(r, g, b), 100);
        assert_eq!(GreyAlgorithm::Blue.apply(r, g, b), 50);
        assert_eq!(GreyAlgorithm::Average.apply(r, g, b), 116);
        assert_eq!(GreyAlgorithm::Minimum.apply(r, g, b), 50);
        assert_eq!(GreyAlgorithm::Maximum.apply(r, g, b), 200);
        assert_eq!(GreyAlgorithm::Lightness.apply(r, g, b), 125);
        assert_eq!(GreyAlgorithm::Luma601.apply(r, g, b), 124);
    }

    #[test]
    fn test_merge_alpha_scales_grey() {
        let image = Image::from_vec(1, 1, ImageKind::Rgba, vec![100, 100, 100, 51]).unwrap();
        let grey = image.grey(&GreyOptions {
            algorithm: GreyAlgorithm::Red,
            ..GreyOptions::default()
        });
        assert_eq!(grey.kind(), ImageKind::Grey);
        assert_eq!(grey.get(0, 0, 0), 20);
    }

    #[test]
    fn test_keep_alpha_wins() {
        let image = Image::from_vec(1, 1, ImageKind::Rgba, vec![100, 100, 100, 51]).unwrap();
        let grey = image.grey(&GreyOptions {
            algorithm: GreyAlgorithm::Red,
            keep_alpha: true,
            merge_alpha: true,
        });
        assert_eq!(grey.kind(), ImageKind::GreyA);
        assert_eq!(grey.to_vec(), vec![100, 51]);
    }

    #[test]
    fn test_grey_input_uses_first_channel() {
        let image = Image::from_vec(2, 2, ImageKind::Grey, vec![10, 30, 50, 70]).unwrap();
        let grey = image.grey(&GreyOptions {
            algorithm: GreyAlgorithm::Blue,
            ..GreyOptions::default()
        });
        assert_eq!(grey.to_vec(), vec![10, 30, 50, 70]);
    }
}
