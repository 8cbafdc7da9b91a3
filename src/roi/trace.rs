//! Boundary tracing for labeled regions.
//!
//! Moore-neighbor tracing over the label grid: start at the topmost-then-
//! leftmost cell, walk clockwise, and stop once the first step out of the
//! start cell is about to be repeated. Cells are recorded on first visit, so
//! a one-cell-wide line yields each of its cells exactly once.
//!
//! A 4-connected region only steps diagonally when an orthogonal member
//! bridges the corner. Without that rule the walk would cut across a notch of
//! 8-connected exterior and skip the cells facing it.

use ndarray::Array2;

use super::label::{Connectivity, LabelGrid};
use super::region::BoundingBox;

/// Moore neighborhood directions (clockwise from right, y pointing down)
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),   // 0: right
    (1, 1),   // 1: down-right
    (0, 1),   // 2: down
    (-1, 1),  // 3: down-left
    (-1, 0),  // 4: left
    (-1, -1), // 5: up-left
    (0, -1),  // 6: up
    (1, -1),  // 7: up-right
];

const LEFT: usize = 4;

/// Result of tracing one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Ordered boundary cells in image coordinates.
    pub contour: Vec<(usize, usize)>,
    /// Region cells local to the bounding box, indexed `[[y, x]]`.
    pub contour_mask: Array2<bool>,
}

/// Trace the region carrying `id`, whose cells are joined by `connectivity`.
///
/// # Panics
/// When `id` does not occur in `grid`. Asking for an absent label is an
/// orchestration bug, not bad input.
pub fn trace(grid: &LabelGrid, id: i32, connectivity: Connectivity) -> Trace {
    let mut bbox: Option<BoundingBox> = None;
    for ((y, x), &label) in grid.labels().indexed_iter() {
        if label != id {
            continue;
        }
        bbox = Some(match bbox {
            None => BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(b) => BoundingBox {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        });
    }
    let bbox = bbox.unwrap_or_else(|| panic!("label {id} is not present in the label grid"));
    trace_within(grid, id, &bbox, connectivity)
}

/// Trace the region carrying `id` whose bounding box is already known.
pub(crate) fn trace_within(
    grid: &LabelGrid,
    id: i32,
    bbox: &BoundingBox,
    connectivity: Connectivity,
) -> Trace {
    let contour_mask = Array2::from_shape_fn((bbox.height(), bbox.width()), |(ly, lx)| {
        grid.get(bbox.min_x + lx, bbox.min_y + ly) == id
    });

    let Some(start_x) = (0..bbox.width()).find(|&lx| contour_mask[[0, lx]]) else {
        panic!("label {id} is not present in the label grid");
    };
    let start = ((bbox.min_x + start_x) as isize, bbox.min_y as isize);

    let contour = walk_boundary(grid, id, start, &contour_mask, bbox, connectivity);
    Trace {
        contour,
        contour_mask,
    }
}

/// Check if the cell at (x, y) belongs to region `id`.
#[inline]
fn is_member(grid: &LabelGrid, id: i32, x: isize, y: isize) -> bool {
    grid.get_signed(x, y) == id
}

/// Index of the direction with offset (dx, dy).
#[inline]
fn direction_index(dx: isize, dy: isize) -> usize {
    DIRECTIONS
        .iter()
        .position(|&d| d == (dx, dy))
        .expect("consecutive Moore neighbors are adjacent")
}

/// One clockwise Moore step from `(x, y)` with backtrack direction `back`.
///
/// Returns the next boundary cell and the backtrack direction seen from it.
/// Under 4-connectivity a diagonal neighbor is only taken when the next
/// orthogonal neighbor clockwise is a member too. The orthogonal checked just
/// before it is never a member, or the search would have stopped there.
fn step(
    grid: &LabelGrid,
    id: i32,
    (x, y): (isize, isize),
    back: usize,
    connectivity: Connectivity,
) -> Option<((isize, isize), usize)> {
    for i in 1..=8 {
        let dir = (back + i) % 8;
        let (dx, dy) = DIRECTIONS[dir];
        let (nx, ny) = (x + dx, y + dy);
        if !is_member(grid, id, nx, ny) {
            continue;
        }
        if connectivity == Connectivity::Four && dir % 2 == 1 {
            let (bx, by) = DIRECTIONS[(dir + 1) % 8];
            if !is_member(grid, id, x + bx, y + by) {
                continue;
            }
        }
        // The cell checked just before is outside the region
        let (px, py) = DIRECTIONS[(back + i - 1) % 8];
        let prev = (x + px, y + py);
        return Some(((nx, ny), direction_index(prev.0 - nx, prev.1 - ny)));
    }
    None
}

fn walk_boundary(
    grid: &LabelGrid,
    id: i32,
    start: (isize, isize),
    contour_mask: &Array2<bool>,
    bbox: &BoundingBox,
    connectivity: Connectivity,
) -> Vec<(usize, usize)> {
    let mut visited = Array2::from_elem(contour_mask.raw_dim(), false);
    let mut contour = Vec::new();
    let mut record = |(x, y): (isize, isize), contour: &mut Vec<(usize, usize)>| {
        let (x, y) = (x as usize, y as usize);
        let local = [y - bbox.min_y, x - bbox.min_x];
        if !visited[local] {
            visited[local] = true;
            contour.push((x, y));
        }
    };

    record(start, &mut contour);

    // Nothing above or to the left of the start cell belongs to the region
    let Some(first) = step(grid, id, start, LEFT, connectivity) else {
        return contour;
    };

    let max_steps = 4 * bbox.area() + 8;
    let (mut current, mut back) = first;
    for _ in 0..max_steps {
        record(current, &mut contour);
        let Some((next, next_back)) = step(grid, id, current, back, connectivity) else {
            break;
        };
        if current == start && next == first.0 {
            break;
        }
        current = next;
        back = next_back;
    }

    contour
}
