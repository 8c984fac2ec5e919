use std::path::Path;

use ndarray::Array2;

use rhizolayer_core::frame::{Frame, Mask};
use rhizolayer_core::io::image_io::{save_mask_png, save_png};
use rhizolayer_core::records::{FrameTraits, ImageRecord, TraitRecord};

/// Grayscale scan with a dark-to-bright horizontal edge centred on `edge_row`.
///
/// Rows above the edge are 0.2, rows below 0.8, and the edge row itself is
/// the midpoint so the gradient peak is unique.
pub fn scan_with_edge(height: usize, width: usize, edge_row: usize) -> Frame {
    let mut data = Array2::<f32>::zeros((height, width));
    for row in 0..height {
        let v = if row < edge_row {
            0.2
        } else if row == edge_row {
            0.5
        } else {
            0.8
        };
        data.row_mut(row).fill(v);
    }
    Frame::new(data)
}

/// Deterministic pseudo-random grayscale content.
pub fn noise_scan(height: usize, width: usize, seed: u64) -> Frame {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let data = Array2::from_shape_fn((height, width), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 1000) as f32 / 1000.0
    });
    Frame::new(data)
}

/// Mask with `count` vertical roots, 2 px wide and 20 px apart, covering
/// `rows`.
pub fn add_roots(mask: &mut Mask, count: usize, rows: std::ops::Range<usize>) {
    for i in 0..count {
        let col = 10 + i * 20;
        for row in rows.clone() {
            mask.data[[row, col]] = true;
            mask.data[[row, col + 1]] = true;
        }
    }
}

pub fn fill_rect(mask: &mut Mask, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) {
    for row in rows {
        for col in cols.clone() {
            mask.data[[row, col]] = true;
        }
    }
}

pub fn trait_record(
    plant: &str,
    frame: &str,
    upper_area: u64,
    bottom_area: u64,
    upper_root_count: u64,
    bottom_root_count: u64,
) -> TraitRecord {
    TraitRecord::new(
        ImageRecord {
            image_name: format!("{plant}/{frame}.png"),
            plant: format!("images/{plant}"),
            frame: frame.to_string(),
            boundary_row: 600,
        },
        FrameTraits {
            upper_area,
            bottom_area,
            upper_root_count,
            bottom_root_count,
        },
    )
}

pub fn write_scan(frame: &Frame, path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    save_png(frame, path).unwrap();
}

pub fn write_mask(mask: &Mask, path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    save_mask_png(mask, path).unwrap();
}
