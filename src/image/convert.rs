//! Conversion between GREY, GREYA, RGB and RGBA.

use ndarray::{Array3, Axis};
use rayon::prelude::*;

use super::grey::GreyAlgorithm;
use super::{Image, ImageKind};

impl Image {
    /// Convert to another channel layout.
    ///
    /// Missing alpha is filled with 255, grey is replicated into RGB, and RGB
    /// is reduced to grey with BT.709 luma.
    pub fn convert_color(&self, target: ImageKind) -> Image {
        if target == self.kind() {
            return self.clone();
        }

        let source = self.kind();
        let (height, width) = (self.height(), self.width());
        let mut output = Array3::<u8>::zeros((height, width, target.channels()));

        output
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(self.data().axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut out_row, in_row)| {
                for x in 0..width {
                    let (r, g, b) = if source.components() == 1 {
                        let v = in_row[[x, 0]];
                        (v, v, v)
                    } else {
                        (in_row[[x, 0]], in_row[[x, 1]], in_row[[x, 2]])
                    };
                    let alpha = if source.alpha() {
                        in_row[[x, source.components()]]
                    } else {
                        255
                    };

                    if target.components() == 1 {
                        out_row[[x, 0]] = if source.components() == 1 {
                            r
                        } else {
                            GreyAlgorithm::Luma709.apply(r, g, b)
                        };
                    } else {
                        out_row[[x, 0]] = r;
                        out_row[[x, 1]] = g;
                        out_row[[x, 2]] = b;
                    }
                    if target.alpha() {
                        out_row[[x, target.components()]] = alpha;
                    }
                }
            });

        Image {
            kind: target,
            data: output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Image {
        Image::from_vec(2, 2, ImageKind::Grey, vec![10, 30, 50, 70]).unwrap()
    }

    fn grey_alpha() -> Image {
        Image::from_vec(
            2,
            2,
            ImageKind::GreyA,
            vec![10, 100, 30, 100, 50, 100, 70, 100],
        )
        .unwrap()
    }

    #[test]
    fn test_grey_to_grey_alpha() {
        let converted = grey().convert_color(ImageKind::GreyA);
        assert_eq!(converted.to_vec(), vec![10, 255, 30, 255, 50, 255, 70, 255]);
    }

    #[test]
    fn test_grey_alpha_to_grey() {
        let converted = grey_alpha().convert_color(ImageKind::Grey);
        assert_eq!(converted.to_vec(), vec![10, 30, 50, 70]);
    }

    #[test]
    fn test_grey_to_rgb() {
        let converted = grey().convert_color(ImageKind::Rgb);
        assert_eq!(
            converted.to_vec(),
            vec![10, 10, 10, 30, 30, 30, 50, 50, 50, 70, 70, 70]
        );
    }

    #[test]
    fn test_grey_alpha_to_rgba() {
        let converted = grey_alpha().convert_color(ImageKind::Rgba);
        #[rustfmt::skip]
        let expected = vec![10, 10, 10, 100, 30, 30, 30, 100, 50, 50, 50, 100, 70, 70, 70, 100];
        assert_eq!(converted.to_vec(), expected);
    }

    #[test]
    fn test_rgb_to_rgba_and_back() {
        let rgb = Image::from_vec(2, 1, ImageKind::Rgb, vec![10, 20, 30, 40, 60, 70]).unwrap();
        let rgba = rgb.convert_color(ImageKind::Rgba);
        assert_eq!(rgba.to_vec(), vec![10, 20, 30, 255, 40, 60, 70, 255]);

        let rgba = Image::from_vec(2, 1, ImageKind::Rgba, vec![10, 20, 30, 100, 40, 60, 70, 100])
            .unwrap();
        assert_eq!(
            rgba.convert_color(ImageKind::Rgb).to_vec(),
            vec![10, 20, 30, 40, 60, 70]
        );
    }

    #[test]
    fn test_rgb_to_grey_uses_luma() {
        let rgb = Image::from_vec(1, 1, ImageKind::Rgb, vec![200, 100, 50]).unwrap();
        let converted = rgb.convert_color(ImageKind::Grey);
        assert_eq!(converted.get(0, 0, 0), GreyAlgorithm::Luma709.apply(200, 100, 50));
    }
}
