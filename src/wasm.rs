//! WebAssembly exports for roikit.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers are
//! flat and row-major; invalid dimensions are reported as thrown errors.

use wasm_bindgen::prelude::*;

use crate::error::RoiKitError;
use crate::image::{GreyOptions, Image, ImageKind, MaskOptions};
use crate::mask::Mask;
use crate::roi::{extract_rois, Connectivity, RoiOptions};

fn to_js(err: RoiKitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn kind_for_channels(channels: usize) -> Result<ImageKind, JsValue> {
    match channels {
        1 => Ok(ImageKind::Grey),
        2 => Ok(ImageKind::GreyA),
        3 => Ok(ImageKind::Rgb),
        4 => Ok(ImageKind::Rgba),
        n => Err(JsValue::from_str(&format!(
            "expected 1 to 4 channels, got {n}"
        ))),
    }
}

// ============================================================================
// ROI extraction
// ============================================================================

/// Extract regions of interest from a mask.
///
/// # Arguments
/// * `mask` - One byte per cell (0 = background, nonzero = foreground)
/// * `width` - Mask width
/// * `height` - Mask height
/// * `eight_connected` - Use 8-connectivity for the foreground
/// * `background` - Also report background regions (negative ids)
///
/// # Returns
/// Flat array: [num_rois, then per roi: id, x, y, width, height, surface,
/// border, external, surround_len, surround...]
#[wasm_bindgen]
pub fn extract_rois_wasm(
    mask: &[u8],
    width: usize,
    height: usize,
    eight_connected: bool,
    background: bool,
) -> Result<Vec<i32>, JsValue> {
    let cells = mask.iter().map(|&v| v != 0).collect();
    let mask = Mask::from_vec(width, height, cells).map_err(to_js)?;
    let options = RoiOptions {
        connectivity: if eight_connected {
            Connectivity::Eight
        } else {
            Connectivity::Four
        },
        background,
    };
    let map = extract_rois(&mask, &options).map_err(to_js)?;

    let mut result = vec![map.len() as i32];
    for roi in map.rois() {
        result.extend_from_slice(&[
            roi.id(),
            roi.min_x() as i32,
            roi.min_y() as i32,
            roi.width() as i32,
            roi.height() as i32,
            roi.surface() as i32,
            roi.border() as i32,
            roi.external() as i32,
            roi.surround().len() as i32,
        ]);
        result.extend_from_slice(roi.surround());
    }
    Ok(result)
}

// ============================================================================
// Grey / threshold
// ============================================================================

/// Convert an interleaved image to single-channel grey (BT.709).
#[wasm_bindgen]
pub fn grey_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<u8>, JsValue> {
    let kind = kind_for_channels(channels)?;
    let image = Image::from_vec(width, height, kind, data.to_vec()).map_err(to_js)?;
    Ok(image.grey(&GreyOptions::default()).to_vec())
}

/// Threshold an interleaved image into one byte per cell (0 or 1).
#[wasm_bindgen]
pub fn threshold_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    threshold: f32,
) -> Result<Vec<u8>, JsValue> {
    let kind = kind_for_channels(channels)?;
    let image = Image::from_vec(width, height, kind, data.to_vec()).map_err(to_js)?;
    let options = MaskOptions {
        threshold,
        ..MaskOptions::default()
    };
    let mask = image.mask(&options).map_err(to_js)?;
    Ok(mask.cells().iter().map(|&v| v as u8).collect())
}
