use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AREA_TOP_ROW, DEFAULT_BOTTOM_MARGIN, DEFAULT_THRESHOLD_AREA, DEFAULT_THRESHOLD_COUNT,
};

/// Mask geometry used to measure root area and counts around the boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitConfig {
    /// First row of the upper area region.
    #[serde(default = "default_area_top_row")]
    pub area_top_row: usize,
    /// Rows at the bottom of the mask left out of the bottom area region.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: usize,
    /// Rows on each side of the boundary left out of both area regions.
    #[serde(default = "default_threshold_area")]
    pub threshold_area: usize,
    /// Height of each counting band.
    #[serde(default = "default_threshold_count")]
    pub threshold_count: usize,
}

fn default_area_top_row() -> usize {
    DEFAULT_AREA_TOP_ROW
}
fn default_bottom_margin() -> usize {
    DEFAULT_BOTTOM_MARGIN
}
fn default_threshold_area() -> usize {
    DEFAULT_THRESHOLD_AREA
}
fn default_threshold_count() -> usize {
    DEFAULT_THRESHOLD_COUNT
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            area_top_row: DEFAULT_AREA_TOP_ROW,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            threshold_area: DEFAULT_THRESHOLD_AREA,
            threshold_count: DEFAULT_THRESHOLD_COUNT,
        }
    }
}
