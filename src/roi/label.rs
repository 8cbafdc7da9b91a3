//! Connected-component labeling.
//!
//! Two-pass raster labeling: the first scan hands out provisional labels and
//! records equivalences in a union-find, the second scan resolves each
//! provisional label to its root and renumbers roots densely in order of first
//! appearance. No recursion, so large masks cannot overflow the stack.

use ndarray::Array2;

use crate::mask::Mask;

/// Neighbor relation used to decide whether two adjacent cells belong to the
/// same region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Edge-adjacent cells only.
    #[default]
    Four,
    /// Edge and corner adjacent cells.
    Eight,
}

impl Connectivity {
    /// The complementary relation. Background is labeled with the dual of the
    /// foreground connectivity so a diagonal gap never both separates two
    /// foreground regions and seals a hole.
    pub fn dual(self) -> Self {
        match self {
            Connectivity::Four => Connectivity::Eight,
            Connectivity::Eight => Connectivity::Four,
        }
    }

    /// All neighbor offsets `(dx, dy)`.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(1, 0), (0, 1), (-1, 0), (0, -1)],
            Connectivity::Eight => &[
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
            ],
        }
    }

    /// Neighbors already visited by a row-major scan.
    fn scanned_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1)],
            Connectivity::Eight => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// Union-find over provisional labels with path compression and union by size.
#[derive(Debug, Default)]
struct UnionFind {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl UnionFind {
    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        self.size.push(1);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        while self.parent[x as usize] != root {
            let next = self.parent[x as usize];
            self.parent[x as usize] = root;
            x = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra as usize] >= self.size[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }
}

/// Per-cell region ids for one extraction.
///
/// `0` marks unlabeled cells, positive ids are foreground regions `1..=N`,
/// negative ids are background regions `-1..=-M` (only present when
/// background labeling was requested).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    labels: Array2<i32>,
    foreground: usize,
    background: usize,
}

impl LabelGrid {
    #[inline]
    pub fn width(&self) -> usize {
        self.labels.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.nrows()
    }

    /// Label at (x, y); `0` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.labels.get((y, x)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> i32 {
        if x < 0 || y < 0 {
            0
        } else {
            self.get(x as usize, y as usize)
        }
    }

    /// Number of foreground regions.
    pub fn foreground_count(&self) -> usize {
        self.foreground
    }

    /// Number of background regions (zero unless background was labeled).
    pub fn background_count(&self) -> usize {
        self.background
    }

    /// Underlying (height, width) array.
    pub fn labels(&self) -> &Array2<i32> {
        &self.labels
    }
}

/// Label the foreground of `mask`.
pub fn label(mask: &Mask, connectivity: Connectivity) -> LabelGrid {
    let mut labels = Array2::<i32>::zeros((mask.height(), mask.width()));
    let foreground = label_polarity(mask, true, connectivity, 1, &mut labels);
    LabelGrid {
        labels,
        foreground,
        background: 0,
    }
}

/// Label foreground with `connectivity` and background with its dual.
pub fn label_with_background(mask: &Mask, connectivity: Connectivity) -> LabelGrid {
    let mut labels = Array2::<i32>::zeros((mask.height(), mask.width()));
    let foreground = label_polarity(mask, true, connectivity, 1, &mut labels);
    let background = label_polarity(mask, false, connectivity.dual(), -1, &mut labels);
    LabelGrid {
        labels,
        foreground,
        background,
    }
}

/// Label every cell whose state equals `target`, writing `sign * id` into
/// `labels`. Returns the number of components found.
fn label_polarity(
    mask: &Mask,
    target: bool,
    connectivity: Connectivity,
    sign: i32,
    labels: &mut Array2<i32>,
) -> usize {
    let (width, height) = (mask.width(), mask.height());
    let mut provisional = vec![0u32; width * height];
    let mut sets = UnionFind::default();
    // Slot 0 stays reserved for "no label".
    sets.make_set();

    // First pass: provisional labels and equivalences
    for y in 0..height {
        for x in 0..width {
            if mask.get(x, y) != target {
                continue;
            }
            let mut assigned = 0u32;
            for &(dx, dy) in connectivity.scanned_offsets() {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize {
                    continue;
                }
                let neighbor = provisional[ny as usize * width + nx as usize];
                if neighbor == 0 {
                    continue;
                }
                if assigned == 0 {
                    assigned = neighbor;
                } else if neighbor != assigned {
                    sets.union(assigned, neighbor);
                }
            }
            if assigned == 0 {
                assigned = sets.make_set();
            }
            provisional[y * width + x] = assigned;
        }
    }

    // Second pass: flatten to dense ids in raster order
    let mut final_ids = vec![0i32; sets.parent.len()];
    let mut count = 0i32;
    for y in 0..height {
        for x in 0..width {
            let p = provisional[y * width + x];
            if p == 0 {
                continue;
            }
            let root = sets.find(p) as usize;
            if final_ids[root] == 0 {
                count += 1;
                final_ids[root] = count;
            }
            labels[[y, x]] = sign * final_ids[root];
        }
    }

    count as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let height = rows.len();
        let width = rows[0].len();
        Mask::from_fn(width, height, |x, y| rows[y].as_bytes()[x] == b'#')
    }

    #[test]
    fn test_union_find_merges_and_compresses() {
        let mut sets = UnionFind::default();
        let a = sets.make_set();
        let b = sets.make_set();
        let c = sets.make_set();
        let d = sets.make_set();
        sets.union(a, b);
        sets.union(c, d);
        assert_ne!(sets.find(a), sets.find(c));
        sets.union(b, d);
        let root = sets.find(a);
        assert_eq!(sets.find(b), root);
        assert_eq!(sets.find(c), root);
        assert_eq!(sets.find(d), root);
        assert_eq!(sets.size[root as usize], 4);
    }

    #[test]
    fn test_empty_mask_has_no_regions() {
        let grid = label(&Mask::new(6, 4), Connectivity::Four);
        assert_eq!(grid.foreground_count(), 0);
        assert!(grid.labels().iter().all(|&l| l == 0));
    }

    #[test]
    fn test_diagonal_cells_split_under_four() {
        let mask = mask_from_rows(&["#.", ".#"]);
        let grid = label(&mask, Connectivity::Four);
        assert_eq!(grid.foreground_count(), 2);
        assert_ne!(grid.get(0, 0), grid.get(1, 1));
    }

    #[test]
    fn test_diagonal_cells_join_under_eight() {
        let mask = mask_from_rows(&["#.", ".#"]);
        let grid = label(&mask, Connectivity::Eight);
        assert_eq!(grid.foreground_count(), 1);
        assert_eq!(grid.get(0, 0), grid.get(1, 1));
    }

    #[test]
    fn test_u_shape_resolves_equivalence() {
        // The two arms get different provisional labels until the bottom row
        let mask = mask_from_rows(&["#..#", "#..#", "####"]);
        let grid = label(&mask, Connectivity::Four);
        assert_eq!(grid.foreground_count(), 1);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(3, 0), 1);
    }

    #[test]
    fn test_ids_are_dense_in_raster_order() {
        let mask = mask_from_rows(&["#.#.#", ".....", "#.#.#"]);
        let grid = label(&mask, Connectivity::Four);
        assert_eq!(grid.foreground_count(), 6);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(2, 0), 2);
        assert_eq!(grid.get(4, 0), 3);
        assert_eq!(grid.get(0, 2), 4);
        assert_eq!(grid.get(4, 2), 6);
    }

    #[test]
    fn test_background_labeled_with_dual_connectivity() {
        // Foreground ring closed only at the corners: under 4-connectivity
        // the ring splits, and the 8-connected background leaks out of it.
        let mask = mask_from_rows(&[".#.", "#.#", ".#."]);
        let grid = label_with_background(&mask, Connectivity::Four);
        assert_eq!(grid.foreground_count(), 4);
        assert_eq!(grid.background_count(), 1);
        assert_eq!(grid.get(1, 1), -1);
        assert_eq!(grid.get(0, 0), -1);

        // Under 8-connectivity the ring is closed and the centre is a hole.
        let grid = label_with_background(&mask, Connectivity::Eight);
        assert_eq!(grid.foreground_count(), 1);
        assert_eq!(grid.background_count(), 5);
        assert_eq!(grid.get(1, 1), -3);
    }

    #[test]
    fn test_out_of_bounds_label_is_zero() {
        let grid = label(&Mask::from_fn(2, 2, |_, _| true), Connectivity::Four);
        assert_eq!(grid.get(5, 0), 0);
        assert_eq!(grid.get_signed(-1, 0), 0);
        assert_eq!(grid.get_signed(1, 1), 1);
    }
}
