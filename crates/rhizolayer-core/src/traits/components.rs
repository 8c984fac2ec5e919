use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};

/// Pixel neighbourhood used to join foreground pixels into one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge-adjacent pixels only.
    Four,
    /// Edge- and corner-adjacent pixels. Matches external contour tracing.
    Eight,
}

impl Connectivity {
    /// Already-visited neighbours in raster order, as (row, col) offsets.
    fn causal_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &[(0, -1), (-1, 0)],
            Self::Eight => &[(0, -1), (-1, -1), (-1, 0), (-1, 1)],
        }
    }
}

/// One connected foreground component of a binary band.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Representative label (smallest provisional label of the component).
    pub label: u32,
    /// Pixel count.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

impl ComponentStats {
    pub fn bbox_height(&self) -> usize {
        self.bbox.1 - self.bbox.0 + 1
    }

    pub fn bbox_width(&self) -> usize {
        self.bbox.3 - self.bbox.2 + 1
    }
}

/// Label equivalences recorded during the first raster pass.
///
/// Slot 0 is the background; the representative of a set is always its
/// smallest label.
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            label = self.parent[label as usize];
        }
        label
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb) as usize] = ra.min(rb);
        }
    }

    /// Point every label straight at its representative.
    fn flatten(&mut self) {
        for label in 1..self.parent.len() {
            let root = self.find(label as u32);
            self.parent[label] = root;
        }
    }
}

/// Two-pass connected component labelling of a binary view.
///
/// Components are sorted by area, largest first; equal areas keep raster
/// order of their first pixel.
pub fn connected_components(
    mask: ArrayView2<bool>,
    connectivity: Connectivity,
) -> Vec<ComponentStats> {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    let mut sets = DisjointSet::new();

    for ((row, col), &fg) in mask.indexed_iter() {
        if !fg {
            continue;
        }
        let mut assigned = 0u32;
        for &(dr, dc) in connectivity.causal_offsets() {
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r < 0 || c < 0 || c as usize >= w {
                continue;
            }
            let neighbour = labels[[r as usize, c as usize]];
            if neighbour == 0 {
                continue;
            }
            if assigned == 0 {
                assigned = neighbour;
            } else if neighbour != assigned {
                sets.union(assigned, neighbour);
            }
        }
        if assigned == 0 {
            assigned = sets.make_set();
        }
        labels[[row, col]] = assigned;
    }
    sets.flatten();

    let mut by_root = BTreeMap::<u32, ComponentStats>::new();
    for ((row, col), &label) in labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        let root = sets.parent[label as usize];
        let stats = by_root.entry(root).or_insert(ComponentStats {
            label: root,
            area: 0,
            bbox: (row, row, col, col),
        });
        stats.area += 1;
        stats.bbox.0 = stats.bbox.0.min(row);
        stats.bbox.1 = stats.bbox.1.max(row);
        stats.bbox.2 = stats.bbox.2.min(col);
        stats.bbox.3 = stats.bbox.3.max(col);
    }

    let mut components: Vec<ComponentStats> = by_root.into_values().collect();
    components.sort_by(|a, b| b.area.cmp(&a.area));
    components
}
