use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EXCLUDE_BOTTOM, DEFAULT_EXCLUDE_TOP, DEFAULT_STRIP_FAR_OFFSET,
    DEFAULT_STRIP_NEAR_OFFSET,
};

/// How per-pixel gradient responses are combined across the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientPolarity {
    /// Average the signed response; only dark-above/bright-below edges win.
    #[default]
    Signed,
    /// Average the absolute response; edges of either direction count.
    Absolute,
}

impl std::fmt::Display for GradientPolarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signed => write!(f, "Signed"),
            Self::Absolute => write!(f, "Absolute"),
        }
    }
}

/// Geometry of the boundary search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Strip starts this many pixels left of the right border.
    #[serde(default = "default_strip_far_offset")]
    pub strip_far_offset: usize,
    /// Strip ends (exclusive) this many pixels left of the right border.
    #[serde(default = "default_strip_near_offset")]
    pub strip_near_offset: usize,
    /// Leading profile rows excluded from the search.
    #[serde(default = "default_exclude_top")]
    pub exclude_top: usize,
    /// Trailing profile rows excluded from the search.
    #[serde(default = "default_exclude_bottom")]
    pub exclude_bottom: usize,
    #[serde(default)]
    pub polarity: GradientPolarity,
}

fn default_strip_far_offset() -> usize {
    DEFAULT_STRIP_FAR_OFFSET
}
fn default_strip_near_offset() -> usize {
    DEFAULT_STRIP_NEAR_OFFSET
}
fn default_exclude_top() -> usize {
    DEFAULT_EXCLUDE_TOP
}
fn default_exclude_bottom() -> usize {
    DEFAULT_EXCLUDE_BOTTOM
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            strip_far_offset: DEFAULT_STRIP_FAR_OFFSET,
            strip_near_offset: DEFAULT_STRIP_NEAR_OFFSET,
            exclude_top: DEFAULT_EXCLUDE_TOP,
            exclude_bottom: DEFAULT_EXCLUDE_BOTTOM,
            polarity: GradientPolarity::default(),
        }
    }
}

impl BoundaryConfig {
    /// Smallest image height the search is defined for.
    pub fn min_height(&self) -> usize {
        self.exclude_top + self.exclude_bottom + 1
    }
}
