//! Per-region geometry gathered from a label grid.

use ndarray::Array2;

use super::label::{Connectivity, LabelGrid};
use super::trace::trace_within;

/// Inclusive axis-aligned box in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// True when (x, y) lies inside the box.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// True when `other` lies inside this box without touching its edges.
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        other.min_x > self.min_x
            && other.max_x < self.max_x
            && other.min_y > self.min_y
            && other.max_y < self.max_y
    }

    /// Corners clockwise from the top-left.
    pub fn corners(&self) -> [(usize, usize); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }

    /// True when the box touches the frame of a `width` x `height` grid.
    pub fn touches_frame(&self, width: usize, height: usize) -> bool {
        self.min_x == 0 || self.min_y == 0 || self.max_x + 1 == width || self.max_y + 1 == height
    }
}

/// Engine-internal description of one labeled region.
#[derive(Debug, Clone)]
pub(crate) struct Region {
    pub id: i32,
    pub area: usize,
    pub bbox: BoundingBox,
    pub border: bool,
    pub connectivity: Connectivity,
    /// Ordered outer boundary, starting at the topmost-then-leftmost cell.
    pub contour: Vec<(usize, usize)>,
    /// Cells of the region, local to `bbox`, indexed `[[y, x]]`.
    pub contour_mask: Array2<bool>,
}

impl Region {
    /// First cell of the region in raster order.
    #[inline]
    pub fn start(&self) -> (usize, usize) {
        self.contour[0]
    }
}

/// Area and bounding box of every region, ascending id.
///
/// Background regions (negative ids) come before foreground ones.
pub(crate) fn measure(grid: &LabelGrid) -> Vec<(i32, usize, BoundingBox)> {
    let fg = grid.foreground_count();
    let bg = grid.background_count();
    let mut stats: Vec<Option<(usize, BoundingBox)>> = vec![None; fg + bg];

    for ((y, x), &id) in grid.labels().indexed_iter() {
        if id == 0 {
            continue;
        }
        let slot = slot_of(id, bg);
        match &mut stats[slot] {
            Some((area, bbox)) => {
                *area += 1;
                bbox.include(x, y);
            }
            empty => *empty = Some((1, BoundingBox::at(x, y))),
        }
    }

    stats
        .into_iter()
        .enumerate()
        .filter_map(|(slot, entry)| entry.map(|(area, bbox)| (id_of(slot, bg), area, bbox)))
        .collect()
}

/// Measure and trace every region of `grid`.
pub(crate) fn collect_regions(grid: &LabelGrid, connectivity: Connectivity) -> Vec<Region> {
    let (width, height) = (grid.width(), grid.height());
    measure(grid)
        .into_iter()
        .map(|(id, area, bbox)| {
            let connectivity = if id > 0 {
                connectivity
            } else {
                connectivity.dual()
            };
            let trace = trace_within(grid, id, &bbox, connectivity);
            Region {
                id,
                area,
                bbox,
                border: bbox.touches_frame(width, height),
                connectivity,
                contour: trace.contour,
                contour_mask: trace.contour_mask,
            }
        })
        .collect()
}

/// Position of `id` in the ascending-id ordering.
#[inline]
pub(crate) fn slot_of(id: i32, background: usize) -> usize {
    if id < 0 {
        (background as i32 + id) as usize
    } else {
        background + id as usize - 1
    }
}

#[inline]
fn id_of(slot: usize, background: usize) -> i32 {
    if slot < background {
        slot as i32 - background as i32
    } else {
        (slot - background) as i32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::Mask;
    use crate::roi::label::{label, label_with_background};

    #[test]
    fn test_slot_round_trip_ordering() {
        // Two background regions, three foreground regions
        let ids: Vec<i32> = (0..5).map(|slot| id_of(slot, 2)).collect();
        assert_eq!(ids, vec![-2, -1, 1, 2, 3]);
        for (slot, &id) in ids.iter().enumerate() {
            assert_eq!(slot_of(id, 2), slot);
        }
    }

    #[test]
    fn test_measure_area_and_box() {
        let mask = Mask::from_fn(6, 5, |x, y| (1..=3).contains(&x) && (2..=3).contains(&y));
        let grid = label(&mask, Connectivity::Four);
        let stats = measure(&grid);
        assert_eq!(stats.len(), 1);
        let (id, area, bbox) = stats[0];
        assert_eq!(id, 1);
        assert_eq!(area, 6);
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 1,
                min_y: 2,
                max_x: 3,
                max_y: 3
            }
        );
        assert!(!bbox.touches_frame(6, 5));
    }

    #[test]
    fn test_collect_regions_assigns_dual_connectivity_to_background() {
        let mask = Mask::from_fn(3, 3, |x, y| x == 1 && y == 1);
        let grid = label_with_background(&mask, Connectivity::Four);
        let regions = collect_regions(&grid, Connectivity::Four);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, -1);
        assert_eq!(regions[0].connectivity, Connectivity::Eight);
        assert_eq!(regions[0].area, 8);
        assert!(regions[0].border);
        assert_eq!(regions[1].id, 1);
        assert!(!regions[1].border);
        assert_eq!(regions[1].start(), (1, 1));
    }

    #[test]
    fn test_box_relations() {
        let outer = BoundingBox {
            min_x: 0,
            min_y: 0,
            max_x: 4,
            max_y: 4,
        };
        let inner = BoundingBox::at(2, 2);
        let touching = BoundingBox {
            min_x: 0,
            min_y: 1,
            max_x: 2,
            max_y: 2,
        };
        assert!(outer.strictly_contains(&inner));
        assert!(!outer.strictly_contains(&touching));
        assert!(!outer.strictly_contains(&outer));
        assert_eq!(outer.corners(), [(0, 0), (4, 0), (4, 4), (0, 4)]);
        assert_eq!(inner.area(), 1);
    }
}
