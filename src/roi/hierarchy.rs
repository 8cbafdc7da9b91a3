//! Containment hierarchy between regions.
//!
//! Region B is nested in region A when B's bounding box lies strictly inside
//! A's and B's first cell falls inside A's filled interior. Regions are
//! visited by ascending bounding-box area, so the first larger region that
//! passes the test is the nearest enclosing one.

use std::collections::VecDeque;

use log::trace;
use ndarray::Array2;

use super::label::Connectivity;
use super::region::Region;

/// Nesting of one region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Nesting {
    /// Nearest enclosing region.
    pub parent: Option<i32>,
    /// All enclosing regions, nearest first, outermost last.
    pub surround: Vec<i32>,
}

impl Nesting {
    /// True when no other region encloses this one.
    pub fn is_external(&self) -> bool {
        self.parent.is_none()
    }
}

/// Region cells plus everything they enclose, local to the region's box.
///
/// Cells of the box that can reach the box frame through non-region cells are
/// outside. Leaks are followed with the dual of the region's connectivity.
pub(crate) fn filled_interior(
    contour_mask: &Array2<bool>,
    connectivity: Connectivity,
) -> Array2<bool> {
    let (height, width) = contour_mask.dim();
    let mut outside = Array2::from_elem((height, width), false);
    let mut queue = VecDeque::new();

    for y in 0..height {
        for x in 0..width {
            let on_frame = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            if on_frame && !contour_mask[[y, x]] {
                outside[[y, x]] = true;
                queue.push_back((x, y));
            }
        }
    }

    let offsets = connectivity.dual().offsets();
    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in offsets {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if !outside[[ny, nx]] && !contour_mask[[ny, nx]] {
                outside[[ny, nx]] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    outside.mapv(|v| !v)
}

/// Compute the nesting of every region, in the order of `regions`.
pub(crate) fn build_hierarchy(regions: &[Region]) -> Vec<Nesting> {
    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by_key(|&i| (regions[i].bbox.area(), regions[i].id));

    let filled: Vec<Array2<bool>> = regions
        .iter()
        .map(|r| filled_interior(&r.contour_mask, r.connectivity))
        .collect();

    let mut parent: Vec<Option<usize>> = vec![None; regions.len()];
    for (rank, &inner) in order.iter().enumerate() {
        let region = &regions[inner];
        let (sx, sy) = region.start();
        parent[inner] = order[rank + 1..].iter().copied().find(|&outer| {
            let candidate = &regions[outer];
            candidate.bbox.strictly_contains(&region.bbox)
                && filled[outer][[sy - candidate.bbox.min_y, sx - candidate.bbox.min_x]]
        });
        if let Some(outer) = parent[inner] {
            trace!("region {} nested in region {}", region.id, regions[outer].id);
        }
    }

    (0..regions.len())
        .map(|i| {
            let mut surround = Vec::new();
            let mut current = parent[i];
            while let Some(p) = current {
                surround.push(regions[p].id);
                current = parent[p];
            }
            Nesting {
                parent: parent[i].map(|p| regions[p].id),
                surround,
            }
        })
        .collect()
}
