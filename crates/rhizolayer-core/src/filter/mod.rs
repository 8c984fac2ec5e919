//! Hierarchical outlier filtering: frames within a plant, then plants within
//! an experimental group.

pub mod config;
pub mod frames;
pub mod plants;

use crate::stats::{group_indices, z_scores};

pub use config::{FrameFilterConfig, OutlierCombination, PlantFilterConfig};

/// Rows surviving a filtering step and the rows it removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Split<T> {
    pub kept: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> Split<T> {
    /// Partition `rows` in input order.
    pub fn partition(rows: Vec<T>, mut keep: impl FnMut(&T) -> bool) -> Self {
        let (kept, removed) = rows.into_iter().partition(|row| keep(row));
        Self { kept, removed }
    }
}

/// The count-based and area-based filtered views of one row set.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlierViews<T> {
    pub count: Split<T>,
    pub area: Split<T>,
}

/// Z-score outlier filtering within groups.
///
/// Scores of the count and area ratio are computed separately within each
/// group; a row passes a criterion when `|z| <= threshold`. Groups come out in
/// ascending key order, rows within a group in input order. Rows of a group
/// with zero spread (including single-row groups) never pass.
pub fn split_outliers<T, K>(
    rows: &[T],
    key: impl Fn(&T) -> K,
    count_value: impl Fn(&T) -> f64,
    area_value: impl Fn(&T) -> f64,
    threshold: f64,
    combination: OutlierCombination,
) -> OutlierViews<T>
where
    T: Clone,
    K: Ord,
{
    let mut views = OutlierViews {
        count: Split {
            kept: Vec::new(),
            removed: Vec::new(),
        },
        area: Split {
            kept: Vec::new(),
            removed: Vec::new(),
        },
    };

    for indices in group_indices(rows, key).into_values() {
        let counts: Vec<f64> = indices.iter().map(|&i| count_value(&rows[i])).collect();
        let areas: Vec<f64> = indices.iter().map(|&i| area_value(&rows[i])).collect();
        let z_count = z_scores(&counts);
        let z_area = z_scores(&areas);

        for (j, &i) in indices.iter().enumerate() {
            let pass_count = z_count[j].abs() <= threshold;
            let pass_area = z_area[j].abs() <= threshold;
            let (keep_count, keep_area) = match combination {
                OutlierCombination::Independent => (pass_count, pass_area),
                OutlierCombination::Combined => {
                    let both = pass_count && pass_area;
                    (both, both)
                }
            };

            let row = &rows[i];
            if keep_count {
                views.count.kept.push(row.clone());
            } else {
                views.count.removed.push(row.clone());
            }
            if keep_area {
                views.area.kept.push(row.clone());
            } else {
                views.area.removed.push(row.clone());
            }
        }
    }

    views
}
