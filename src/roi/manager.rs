//! ROI extraction orchestration and result snapshots.

use std::fmt;
use std::sync::Arc;

use log::debug;
use ndarray::Array2;

use super::hierarchy::{build_hierarchy, Nesting};
use super::label::{label, label_with_background, Connectivity, LabelGrid};
use super::region::{collect_regions, slot_of, BoundingBox, Region};
use crate::error::{Result, RoiKitError};
use crate::mask::Mask;

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoiOptions {
    /// Foreground connectivity. Background regions use the dual.
    pub connectivity: Connectivity,
    /// Also report background components, with negative ids.
    pub background: bool,
}

impl RoiOptions {
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

/// One region of interest.
///
/// Positive ids are foreground regions, negative ids background regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roi {
    id: i32,
    bbox: BoundingBox,
    surface: usize,
    contour: Vec<(usize, usize)>,
    contour_mask: Array2<bool>,
    border: bool,
    parent: Option<i32>,
    surround: Vec<i32>,
}

impl Roi {
    fn from_parts(region: Region, nesting: Nesting) -> Self {
        Self {
            id: region.id,
            bbox: region.bbox,
            surface: region.area,
            contour: region.contour,
            contour_mask: region.contour_mask,
            border: region.border,
            parent: nesting.parent,
            surround: nesting.surround,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Bounding-box width.
    #[inline]
    pub fn width(&self) -> usize {
        self.bbox.width()
    }

    /// Bounding-box height.
    #[inline]
    pub fn height(&self) -> usize {
        self.bbox.height()
    }

    /// Number of cells in the region.
    #[inline]
    pub fn surface(&self) -> usize {
        self.surface
    }

    #[inline]
    pub fn min_x(&self) -> usize {
        self.bbox.min_x
    }

    #[inline]
    pub fn min_y(&self) -> usize {
        self.bbox.min_y
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Bounding-box corners clockwise from the top-left.
    pub fn box_pixels(&self) -> [(usize, usize); 4] {
        self.bbox.corners()
    }

    /// Region cells local to the bounding box, indexed `[[y, x]]`.
    pub fn contour_mask(&self) -> &Array2<bool> {
        &self.contour_mask
    }

    /// Ordered outer boundary in image coordinates, clockwise from the
    /// topmost-then-leftmost cell.
    pub fn contour(&self) -> &[(usize, usize)] {
        &self.contour
    }

    /// True when the region touches the mask frame.
    #[inline]
    pub fn border(&self) -> bool {
        self.border
    }

    /// True when no other region encloses this one.
    #[inline]
    pub fn external(&self) -> bool {
        self.parent.is_none()
    }

    /// Nearest enclosing region.
    #[inline]
    pub fn parent(&self) -> Option<i32> {
        self.parent
    }

    /// Enclosing regions, nearest first and outermost last.
    pub fn surround(&self) -> &[i32] {
        &self.surround
    }

    #[inline]
    pub fn is_foreground(&self) -> bool {
        self.id > 0
    }

    /// True when the image cell (x, y) belongs to this region.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.bbox.contains(x, y) && self.contour_mask[[y - self.bbox.min_y, x - self.bbox.min_x]]
    }
}

/// Selection criteria for [`RoiMap::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiFilter {
    pub min_surface: usize,
    pub max_surface: usize,
    /// Keep foreground regions.
    pub positive: bool,
    /// Keep background regions.
    pub negative: bool,
}

impl Default for RoiFilter {
    fn default() -> Self {
        Self {
            min_surface: 0,
            max_surface: usize::MAX,
            positive: true,
            negative: true,
        }
    }
}

impl RoiFilter {
    fn accepts(&self, roi: &Roi) -> bool {
        let polarity = if roi.is_foreground() {
            self.positive
        } else {
            self.negative
        };
        polarity && roi.surface >= self.min_surface && roi.surface <= self.max_surface
    }
}

/// Immutable result of one extraction.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone)]
pub struct RoiMap {
    labels: Arc<LabelGrid>,
    rois: Arc<[Roi]>,
}

impl RoiMap {
    #[inline]
    pub fn width(&self) -> usize {
        self.labels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.height()
    }

    /// All regions, ascending id.
    pub fn rois(&self) -> &[Roi] {
        &self.rois
    }

    pub fn len(&self) -> usize {
        self.rois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }

    /// Region with the given id.
    pub fn get(&self, id: i32) -> Option<&Roi> {
        let foreground = self.labels.foreground_count() as i32;
        let background = self.labels.background_count() as i32;
        if id == 0 || id > foreground || id < -background {
            return None;
        }
        self.rois.get(slot_of(id, background as usize))
    }

    /// Region id stored for cell (x, y); `0` for unlabeled or out-of-bounds cells.
    pub fn label_at(&self, x: usize, y: usize) -> i32 {
        self.labels.get(x, y)
    }

    /// Region owning cell (x, y).
    pub fn roi_at(&self, x: usize, y: usize) -> Option<&Roi> {
        self.get(self.label_at(x, y))
    }

    /// Regions matching `filter`, ascending id.
    pub fn filter(&self, filter: &RoiFilter) -> Vec<&Roi> {
        self.rois.iter().filter(|roi| filter.accepts(roi)).collect()
    }
}

impl fmt::Display for RoiMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RoiMap {}x{} ({} regions)",
            self.width(),
            self.height(),
            self.len()
        )?;
        for roi in self.rois.iter() {
            writeln!(
                f,
                "  id={} box=({},{} {}x{}) surface={} border={} external={} surround={:?}",
                roi.id,
                roi.min_x(),
                roi.min_y(),
                roi.width(),
                roi.height(),
                roi.surface,
                roi.border,
                roi.external(),
                roi.surround
            )?;
        }
        Ok(())
    }
}

/// Extract every region of `mask`.
///
/// Fails only for a zero-area mask.
pub fn extract_rois(mask: &Mask, options: &RoiOptions) -> Result<RoiMap> {
    if mask.is_empty() {
        return Err(RoiKitError::EmptyMask {
            width: mask.width(),
            height: mask.height(),
        });
    }

    let grid = if options.background {
        label_with_background(mask, options.connectivity)
    } else {
        label(mask, options.connectivity)
    };
    debug!(
        "labeled {}x{} mask: {} foreground, {} background regions",
        mask.width(),
        mask.height(),
        grid.foreground_count(),
        grid.background_count()
    );

    let regions = collect_regions(&grid, options.connectivity);
    let nesting = build_hierarchy(&regions);
    let rois: Arc<[Roi]> = regions
        .into_iter()
        .zip(nesting)
        .map(|(region, nesting)| Roi::from_parts(region, nesting))
        .collect();

    debug!(
        "extracted {} regions, {} external",
        rois.len(),
        rois.iter().filter(|r| r.external()).count()
    );

    Ok(RoiMap {
        labels: Arc::new(grid),
        rois,
    })
}

/// Reusable extractor holding the most recent snapshot.
#[derive(Debug, Clone, Default)]
pub struct RoiManager {
    options: RoiOptions,
    snapshot: Option<RoiMap>,
}

impl RoiManager {
    pub fn new(options: RoiOptions) -> Self {
        Self {
            options,
            snapshot: None,
        }
    }

    pub fn options(&self) -> &RoiOptions {
        &self.options
    }

    /// Extract regions from `mask`, replacing the held snapshot.
    ///
    /// On error the previous snapshot is kept.
    pub fn from_mask(&mut self, mask: &Mask) -> Result<RoiMap> {
        let map = extract_rois(mask, &self.options)?;
        self.snapshot = Some(map.clone());
        Ok(map)
    }

    /// Regions of the last extraction; empty before the first one.
    pub fn get_rois(&self) -> &[Roi] {
        self.snapshot.as_ref().map(RoiMap::rois).unwrap_or(&[])
    }

    /// Last extraction result.
    pub fn snapshot(&self) -> Option<&RoiMap> {
        self.snapshot.as_ref()
    }
}
