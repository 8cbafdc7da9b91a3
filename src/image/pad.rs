//! Border padding.

use ndarray::Array3;

use super::Image;
use crate::error::{Result, RoiKitError};

/// How the added border is filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PadAlgorithm {
    /// Replicate the nearest edge pixel.
    #[default]
    Copy,
    /// Fill with a constant color, one value per channel.
    Set(Vec<u8>),
}

/// Settings for [`Image::pad`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PadOptions {
    /// Pixels added on each side.
    pub size: usize,
    pub algorithm: PadAlgorithm,
}

impl Image {
    /// Add `size` pixels on every side.
    pub fn pad(&self, options: &PadOptions) -> Result<Image> {
        let channels = self.channels();
        if let PadAlgorithm::Set(color) = &options.algorithm {
            if color.len() < channels {
                return Err(RoiKitError::ColorLength {
                    expected: channels,
                    actual: color.len(),
                });
            }
        }

        let (width, height) = (self.width(), self.height());
        // Nothing to replicate from an empty image
        let size = match options.algorithm {
            PadAlgorithm::Copy if width == 0 || height == 0 => 0,
            _ => options.size,
        };
        let data = Array3::from_shape_fn(
            (height + 2 * size, width + 2 * size, channels),
            |(y, x, c)| {
                let inside_x = x >= size && x < width + size;
                let inside_y = y >= size && y < height + size;
                match &options.algorithm {
                    _ if inside_x && inside_y => self.data[[y - size, x - size, c]],
                    PadAlgorithm::Set(color) => color[c],
                    PadAlgorithm::Copy => {
                        let sx = x.saturating_sub(size).min(width - 1);
                        let sy = y.saturating_sub(size).min(height - 1);
                        self.data[[sy, sx, c]]
                    }
                }
            },
        );

        Ok(Image {
            kind: self.kind,
            data,
        })
    }
}
