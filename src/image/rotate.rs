//! Rotation by multiples of 90 degrees.

use ndarray::Array3;

use super::Image;
use crate::error::{Result, RoiKitError};

impl Image {
    /// Rotate clockwise by `angle` degrees.
    ///
    /// Negative angles rotate counter-clockwise. Only multiples of 90 are
    /// supported.
    pub fn rotate(&self, angle: i32) -> Result<Image> {
        match angle.rem_euclid(360) {
            0 => Ok(self.clone()),
            90 => Ok(self.rotate_right()),
            180 => Ok(self.rotate_180()),
            270 => Ok(self.rotate_left()),
            _ => Err(RoiKitError::UnsupportedAngle(angle)),
        }
    }

    /// Rotate 90 degrees counter-clockwise.
    pub fn rotate_left(&self) -> Image {
        let (width, height) = (self.width(), self.height());
        let data = Array3::from_shape_fn((width, height, self.channels()), |(y, x, c)| {
            self.data[[x, width - 1 - y, c]]
        });
        Image {
            kind: self.kind,
            data,
        }
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate_right(&self) -> Image {
        let (width, height) = (self.width(), self.height());
        let data = Array3::from_shape_fn((width, height, self.channels()), |(y, x, c)| {
            self.data[[height - 1 - x, y, c]]
        });
        Image {
            kind: self.kind,
            data,
        }
    }

    fn rotate_180(&self) -> Image {
        let (width, height) = (self.width(), self.height());
        let data = Array3::from_shape_fn((height, width, self.channels()), |(y, x, c)| {
            self.data[[height - 1 - y, width - 1 - x, c]]
        });
        Image {
            kind: self.kind,
            data,
        }
    }
}
