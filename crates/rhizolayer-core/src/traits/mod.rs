//! Root area and root count traits measured relative to the layer boundary.
//!
//! Counts are a proxy for the number of root structures crossing a thin band
//! next to the boundary, not true root topology: two roots touching inside
//! the band count once, and a root leaving and re-entering the band counts
//! twice. Components are labelled rather than traced from their outer
//! contour, so a component lying inside another component's hole also
//! counts.

pub mod components;
pub mod config;

use std::ops::Range;

use ndarray::{s, ArrayView2};

use crate::frame::Mask;
use crate::records::FrameTraits;

use components::{connected_components, Connectivity};

pub use config::TraitConfig;

/// Measure all four traits of one mask.
pub fn extract_traits(mask: &Mask, boundary_row: usize, config: &TraitConfig) -> FrameTraits {
    let (upper_area, bottom_area) = root_areas(mask, boundary_row, config);
    let (upper_root_count, bottom_root_count) = root_counts(mask, boundary_row, config);
    FrameTraits {
        upper_area,
        bottom_area,
        upper_root_count,
        bottom_root_count,
    }
}

/// Foreground pixel counts above and below the boundary, leaving out
/// `threshold_area` rows on each side of it.
pub fn root_areas(mask: &Mask, boundary_row: usize, config: &TraitConfig) -> (u64, u64) {
    let h = mask.height();
    let upper = config.area_top_row..boundary_row.saturating_sub(config.threshold_area);
    let bottom = boundary_row + config.threshold_area..h.saturating_sub(config.bottom_margin);
    (
        foreground_in_rows(mask, upper),
        foreground_in_rows(mask, bottom),
    )
}

/// Root counts in the bands adjacent to the inner edges of the area regions.
pub fn root_counts(mask: &Mask, boundary_row: usize, config: &TraitConfig) -> (u64, u64) {
    let (upper, bottom) = count_bands(boundary_row, config);
    (
        count_roots_in_band(row_band(mask, upper)),
        count_roots_in_band(row_band(mask, bottom)),
    )
}

/// Row ranges of the upper and bottom counting bands.
pub fn count_bands(boundary_row: usize, config: &TraitConfig) -> (Range<usize>, Range<usize>) {
    let upper_end = boundary_row.saturating_sub(config.threshold_area);
    let upper = upper_end.saturating_sub(config.threshold_count)..upper_end;
    let bottom_start = boundary_row + config.threshold_area;
    let bottom = bottom_start..bottom_start + config.threshold_count;
    (upper, bottom)
}

/// Count 8-connected foreground components in a band.
///
/// A component covering every pixel of the band is boundary noise rather
/// than a root and is not counted.
pub fn count_roots_in_band(band: ArrayView2<bool>) -> u64 {
    let components = connected_components(band, Connectivity::Eight);
    let Some(largest) = components.first() else {
        return 0;
    };
    let found = components.len() as u64;
    if largest.area == band.len() {
        found.saturating_sub(1)
    } else {
        found
    }
}

fn row_band(mask: &Mask, rows: Range<usize>) -> ArrayView2<'_, bool> {
    let h = mask.height();
    let end = rows.end.min(h);
    let start = rows.start.min(end);
    mask.data.slice(s![start..end, ..])
}

fn foreground_in_rows(mask: &Mask, rows: Range<usize>) -> u64 {
    row_band(mask, rows).iter().filter(|&&v| v).count() as u64
}
