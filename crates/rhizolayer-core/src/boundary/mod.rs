//! Soil-layer boundary location.
//!
//! The soil-layer transition is the strongest horizontal intensity edge in a
//! scan. The search is restricted to a narrow strip near the right border,
//! which is free of labels and container clutter, and to rows away from the
//! crop edges.

pub mod config;
pub mod gradient;

use ndarray::s;

use crate::error::{Result, RhizoError};
use crate::frame::Frame;

pub use config::{BoundaryConfig, GradientPolarity};
pub use gradient::row_gradient_profile;

/// Locate the layer boundary row of one grayscale frame.
///
/// Returns the absolute row index of the maximum averaged d/dy response within
/// `[exclude_top, height - exclude_bottom)`. Ties resolve to the upper row.
///
/// Images narrower than `strip_far_offset` or not taller than the combined
/// exclusion bands yield [`RhizoError::InvalidDimensions`].
pub fn locate_boundary(frame: &Frame, config: &BoundaryConfig) -> Result<usize> {
    let (h, w) = frame.data.dim();
    if w < config.strip_far_offset
        || config.strip_near_offset >= config.strip_far_offset
        || h < config.min_height()
    {
        return Err(RhizoError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let strip = frame
        .data
        .slice(s![.., w - config.strip_far_offset..w - config.strip_near_offset]);
    let profile = row_gradient_profile(strip, config.polarity);

    let search = &profile[config.exclude_top..h - config.exclude_bottom];
    let mut best = 0usize;
    for (i, &v) in search.iter().enumerate() {
        if v > search[best] {
            best = i;
        }
    }

    Ok(config.exclude_top + best)
}
