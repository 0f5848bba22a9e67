//! Connected component analysis
//!
//! Two-pass labeling with a Union-Find (disjoint set) structure over the
//! ink pixels of a mask. Components report a bounding box and a pixel
//! count; callers filter and sort as their pipeline requires.

use inkline_core::{InkMask, Rect};

/// Connectivity for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// A connected ink component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Bounding box of the component
    pub bounds: Rect,
    /// Number of ink pixels in the component
    pub pixel_count: u32,
}

struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self { parent: Vec::new() }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            // Path halving.
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Smaller root wins, keeping labels stable in scan order.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Find all connected components in an ink mask
///
/// Components are returned in scan order of their first pixel (top to
/// bottom, left to right).
pub fn find_connected_components(mask: &InkMask, connectivity: Connectivity) -> Vec<Component> {
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let mut labels = vec![u32::MAX; (w * h) as usize];
    let mut uf = UnionFind::new();

    // First pass: provisional labels from already-scanned neighbors.
    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) == 0 {
                continue;
            }
            let mut neighbors = [u32::MAX; 4];
            let mut count = 0;
            let mut push = |nx: i32, ny: i32| {
                if nx >= 0 && ny >= 0 && nx < w && mask.get(nx, ny) != 0 {
                    neighbors[count] = labels[(ny * w + nx) as usize];
                    count += 1;
                }
            };
            push(x - 1, y);
            push(x, y - 1);
            if connectivity == Connectivity::EightWay {
                push(x - 1, y - 1);
                push(x + 1, y - 1);
            }

            let label = if count == 0 {
                uf.make_set()
            } else {
                let min = neighbors[..count].iter().copied().min().unwrap_or(u32::MAX);
                for &n in &neighbors[..count] {
                    uf.union(min, n);
                }
                min
            };
            labels[(y * w + x) as usize] = label;
        }
    }

    // Second pass: resolve roots and accumulate extents.
    let num_labels = uf.parent.len();
    let mut slot_of_root = vec![u32::MAX; num_labels];
    let mut components: Vec<Component> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let label = labels[(y * w + x) as usize];
            if label == u32::MAX {
                continue;
            }
            let root = uf.find(label) as usize;
            let slot = if slot_of_root[root] == u32::MAX {
                let slot = components.len() as u32;
                slot_of_root[root] = slot;
                components.push(Component {
                    bounds: Rect::new_unchecked(x, y, 1, 1),
                    pixel_count: 0,
                });
                slot
            } else {
                slot_of_root[root]
            };
            let comp = &mut components[slot as usize];
            comp.bounds = comp.bounds.union(&Rect::new_unchecked(x, y, 1, 1));
            comp.pixel_count += 1;
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> InkMask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let mut m = InkMask::new(w, h).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                m.set(x as i32, y as i32, c == '#');
            }
        }
        m
    }

    #[test]
    fn test_two_separate_blobs() {
        let m = mask_from_rows(&[
            "##....", //
            "##....", //
            "....##", //
            "....##",
        ]);
        let comps = find_connected_components(&m, Connectivity::EightWay);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].bounds, Rect::new_unchecked(0, 0, 2, 2));
        assert_eq!(comps[0].pixel_count, 4);
        assert_eq!(comps[1].bounds, Rect::new_unchecked(4, 2, 2, 2));
    }

    #[test]
    fn test_diagonal_joins_only_with_eight_way() {
        let m = mask_from_rows(&[
            "#.", //
            ".#",
        ]);
        assert_eq!(find_connected_components(&m, Connectivity::FourWay).len(), 2);
        assert_eq!(find_connected_components(&m, Connectivity::EightWay).len(), 1);
    }

    #[test]
    fn test_u_shape_merges_across_scan() {
        // The two arms get different provisional labels and must be
        // united when the bottom row joins them.
        let m = mask_from_rows(&[
            "#.#", //
            "#.#", //
            "###",
        ]);
        let comps = find_connected_components(&m, Connectivity::FourWay);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 7);
        assert_eq!(comps[0].bounds, Rect::new_unchecked(0, 0, 3, 3));
    }

    #[test]
    fn test_empty_mask() {
        let m = InkMask::new(4, 4).unwrap();
        assert!(find_connected_components(&m, Connectivity::EightWay).is_empty());
    }

    #[test]
    fn test_scan_order_of_results() {
        let m = mask_from_rows(&[
            "...#", //
            "#...",
        ]);
        let comps = find_connected_components(&m, Connectivity::EightWay);
        assert_eq!(comps[0].bounds.y, 0);
        assert_eq!(comps[1].bounds.y, 1);
    }
}
