//! roikit
//!
//! Region of interest extraction from binary masks, with the small set of
//! image operations needed to produce those masks.
//!
//! ## Pipeline
//!
//! ```text
//! Image --grey/mask--> Mask --label--> LabelGrid --trace--> regions --hierarchy--> RoiMap
//! ```
//!
//! - **Mask**: immutable foreground/background grid ([`Mask`])
//! - **ROI engine**: labeling, contour tracing and nesting ([`roi`])
//! - **Image operations**: colour conversion, grey, threshold, pad, rotate ([`image`])
//!
//! ## Example
//!
//! ```
//! use roikit::{Mask, RoiManager, RoiOptions};
//!
//! let mask = Mask::from_packed_bits(4, 4, &[63, 192]).unwrap();
//! let mut manager = RoiManager::new(RoiOptions::default());
//! manager.from_mask(&mask).unwrap();
//! assert_eq!(manager.get_rois().len(), 1);
//! ```
//!
//! ## Bindings
//!
//! Python bindings (PyO3/numpy) are behind the `python` feature and WASM
//! bindings (wasm-bindgen) behind the `wasm` feature.

pub mod error;
pub mod image;
pub mod mask;
pub mod roi;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, RoiKitError};
pub use image::{Image, ImageKind};
pub use mask::Mask;
pub use roi::{extract_rois, Connectivity, Roi, RoiFilter, RoiManager, RoiMap, RoiOptions};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    use crate::error::RoiKitError;
    use crate::image::{GreyAlgorithm, GreyOptions, Image, ImageKind, MaskOptions};
    use crate::mask::Mask;
    use crate::roi::{extract_rois as extract, Connectivity, RoiOptions};

    fn to_py_err(err: RoiKitError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn kind_for_channels(channels: usize) -> PyResult<ImageKind> {
        match channels {
            1 => Ok(ImageKind::Grey),
            2 => Ok(ImageKind::GreyA),
            3 => Ok(ImageKind::Rgb),
            4 => Ok(ImageKind::Rgba),
            n => Err(PyValueError::new_err(format!(
                "expected 1 to 4 channels, got {n}"
            ))),
        }
    }

    fn image_from_numpy(image: &PyReadonlyArray3<'_, u8>) -> PyResult<Image> {
        let array = image.as_array().to_owned();
        let kind = kind_for_channels(array.dim().2)?;
        Image::from_array(kind, array).map_err(to_py_err)
    }

    fn parse_algorithm(name: &str) -> PyResult<GreyAlgorithm> {
        let algorithm = match name.to_ascii_lowercase().as_str() {
            "luma709" => GreyAlgorithm::Luma709,
            "luma601" => GreyAlgorithm::Luma601,
            "red" => GreyAlgorithm::Red,
            "green" => GreyAlgorithm::Green,
            "blue" => GreyAlgorithm::Blue,
            "average" => GreyAlgorithm::Average,
            "minimum" => GreyAlgorithm::Minimum,
            "maximum" => GreyAlgorithm::Maximum,
            "lightness" => GreyAlgorithm::Lightness,
            other => {
                return Err(PyValueError::new_err(format!(
                    "unsupported grey algorithm: {other}"
                )))
            }
        };
        Ok(algorithm)
    }

    // ========================================================================
    // ROI extraction
    // ========================================================================

    /// Extract regions of interest from a 2D mask (nonzero = foreground).
    ///
    /// Returns one dict per region, ascending id, with keys `id`, `x`, `y`,
    /// `width`, `height`, `surface`, `box_pixels`, `contour`, `contour_mask`,
    /// `border`, `external` and `surround` (nearest enclosing region first).
    #[pyfunction]
    #[pyo3(signature = (mask, connectivity=4, background=false))]
    pub fn extract_rois<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
        connectivity: u8,
        background: bool,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let connectivity = match connectivity {
            4 => Connectivity::Four,
            8 => Connectivity::Eight,
            n => {
                return Err(PyValueError::new_err(format!(
                    "connectivity must be 4 or 8, got {n}"
                )))
            }
        };
        let mask = Mask::from_array(mask.as_array().mapv(|v| v != 0));
        let options = RoiOptions {
            connectivity,
            background,
        };
        let map = extract(&mask, &options).map_err(to_py_err)?;

        map.rois()
            .iter()
            .map(|roi| {
                let dict = PyDict::new(py);
                dict.set_item("id", roi.id())?;
                dict.set_item("x", roi.min_x())?;
                dict.set_item("y", roi.min_y())?;
                dict.set_item("width", roi.width())?;
                dict.set_item("height", roi.height())?;
                dict.set_item("surface", roi.surface())?;
                dict.set_item("box_pixels", roi.box_pixels().to_vec())?;
                dict.set_item("contour", roi.contour().to_vec())?;
                dict.set_item("contour_mask", roi.contour_mask().clone().into_pyarray(py))?;
                dict.set_item("border", roi.border())?;
                dict.set_item("external", roi.external())?;
                dict.set_item("surround", roi.surround().to_vec())?;
                Ok(dict)
            })
            .collect()
    }

    // ========================================================================
    // Image operations
    // ========================================================================

    /// Reduce an image of shape (height, width, channels) to grey.
    #[pyfunction]
    #[pyo3(signature = (image, algorithm="luma709", keep_alpha=false, merge_alpha=true))]
    pub fn grey<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        algorithm: &str,
        keep_alpha: bool,
        merge_alpha: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let image = image_from_numpy(&image)?;
        let options = GreyOptions {
            algorithm: parse_algorithm(algorithm)?,
            keep_alpha,
            merge_alpha,
        };
        Ok(image.grey(&options).data().clone().into_pyarray(py))
    }

    /// Threshold an image into a boolean mask.
    #[pyfunction]
    #[pyo3(signature = (image, threshold=0.5, invert=false, use_alpha=true))]
    pub fn threshold_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: f32,
        invert: bool,
        use_alpha: bool,
    ) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let image = image_from_numpy(&image)?;
        let options = MaskOptions {
            threshold,
            invert,
            use_alpha,
        };
        let mask = image.mask(&options).map_err(to_py_err)?;
        Ok(mask.cells().clone().into_pyarray(py))
    }

    /// roikit Rust extension module
    #[pymodule]
    pub fn roikit(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(extract_rois, m)?)?;
        m.add_function(wrap_pyfunction!(grey, m)?)?;
        m.add_function(wrap_pyfunction!(threshold_mask, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::roikit;
