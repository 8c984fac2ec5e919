use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZERO_BOTTOM_THRESHOLD, DEFAULT_Z_SCORE_THRESHOLD};

/// How the count and area z-score criteria shape the two filtered views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierCombination {
    /// Count view filtered on count ratio, area view on area ratio.
    #[default]
    Independent,
    /// Both views keep only rows passing both criteria.
    Combined,
}

impl std::fmt::Display for OutlierCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Independent => write!(f, "Independent"),
            Self::Combined => write!(f, "Combined"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameFilterConfig {
    /// Plants whose zero-bottom frame fraction is below this lose those frames.
    #[serde(default = "default_zero_bottom_threshold")]
    pub zero_bottom_threshold: f64,
    #[serde(default = "default_z_score_threshold")]
    pub z_score_threshold: f64,
    #[serde(default)]
    pub combination: OutlierCombination,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantFilterConfig {
    #[serde(default = "default_z_score_threshold")]
    pub z_score_threshold: f64,
    #[serde(default)]
    pub combination: OutlierCombination,
}

fn default_zero_bottom_threshold() -> f64 {
    DEFAULT_ZERO_BOTTOM_THRESHOLD
}
fn default_z_score_threshold() -> f64 {
    DEFAULT_Z_SCORE_THRESHOLD
}

impl Default for FrameFilterConfig {
    fn default() -> Self {
        Self {
            zero_bottom_threshold: DEFAULT_ZERO_BOTTOM_THRESHOLD,
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
            combination: OutlierCombination::default(),
        }
    }
}

impl Default for PlantFilterConfig {
    fn default() -> Self {
        Self {
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
            combination: OutlierCombination::default(),
        }
    }
}
