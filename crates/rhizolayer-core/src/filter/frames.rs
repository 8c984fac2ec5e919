//! Frame-level filtering and per-plant aggregation.

use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::merge::outer_join;
use crate::records::{AreaSummary, CountSummary, PlantSummary, RatioRecord, TraitRecord};
use crate::stats::{group_indices, mean};

use super::{split_outliers, FrameFilterConfig, OutlierViews, Split};

/// Everything produced by the frame-level stage, including every removed
/// subset.
#[derive(Clone, Debug)]
pub struct FrameFilterOutput {
    pub zero_upper: Split<TraitRecord>,
    pub zero_bottom: Split<TraitRecord>,
    pub ratios: Split<RatioRecord>,
    pub views: OutlierViews<RatioRecord>,
    pub summary: Vec<PlantSummary>,
}

/// Run steps A to E on the raw trait table.
pub fn filter_frames(records: Vec<TraitRecord>, config: &FrameFilterConfig) -> FrameFilterOutput {
    let zero_upper = remove_zero_upper(records);
    let zero_bottom = remove_zero_bottom(zero_upper.kept.clone(), config.zero_bottom_threshold);
    let ratios = compute_ratios(zero_bottom.kept.clone());
    let views = split_frame_outliers(&ratios.kept, config);
    let summary = summarize_plants(&views);
    FrameFilterOutput {
        zero_upper,
        zero_bottom,
        ratios,
        views,
        summary,
    }
}

/// Step A: drop frames without any root in the upper counting band.
pub fn remove_zero_upper(records: Vec<TraitRecord>) -> Split<TraitRecord> {
    let split = Split::partition(records, |r| r.traits.upper_root_count > 0);
    info!(
        removed = split.removed.len(),
        kept = split.kept.len(),
        "Removed frames with 0 root count in upper layer"
    );
    split
}

/// Fraction of each plant's frames with a zero bottom root count.
pub fn zero_bottom_fractions(records: &[TraitRecord]) -> BTreeMap<String, f64> {
    group_indices(records, |r| r.plant().to_string())
        .into_iter()
        .map(|(plant, indices)| {
            let zeros = indices
                .iter()
                .filter(|&&i| records[i].traits.bottom_root_count == 0)
                .count();
            (plant, zeros as f64 / indices.len() as f64)
        })
        .collect()
}

/// Step B: drop zero-bottom frames of plants where they are a minority.
///
/// A plant whose zero-bottom fraction is at or above `threshold` keeps them:
/// the plant genuinely lacks lower roots.
pub fn remove_zero_bottom(records: Vec<TraitRecord>, threshold: f64) -> Split<TraitRecord> {
    let noisy: HashSet<String> = zero_bottom_fractions(&records)
        .into_iter()
        .filter(|&(_, fraction)| fraction < threshold)
        .map(|(plant, _)| plant)
        .collect();

    let split = Split::partition(records, |r| {
        !(r.traits.bottom_root_count == 0 && noisy.contains(r.plant()))
    });
    info!(
        removed = split.removed.len(),
        kept = split.kept.len(),
        threshold,
        "Removed zero-bottom frames below threshold"
    );
    split
}

/// Step C: attach ratios and drop rows where either is NaN or infinite.
pub fn compute_ratios(records: Vec<TraitRecord>) -> Split<RatioRecord> {
    let rows = records.into_iter().map(RatioRecord::from_traits).collect();
    let split = Split::partition(rows, RatioRecord::is_finite);
    info!(
        removed = split.removed.len(),
        "Dropped frames with non-finite ratios"
    );
    split
}

/// Step D: per-plant z-score filtering into count and area views.
pub fn split_frame_outliers(
    rows: &[RatioRecord],
    config: &FrameFilterConfig,
) -> OutlierViews<RatioRecord> {
    let views = split_outliers(
        rows,
        |r| r.plant().to_string(),
        |r| r.root_count_ratio,
        |r| r.root_area_ratio,
        config.z_score_threshold,
        config.combination,
    );
    info!(
        count_outliers = views.count.removed.len(),
        area_outliers = views.area.removed.len(),
        "Removed frame outliers per plant"
    );
    views
}

/// Step E: per-plant means of each view, outer-merged on plant path.
pub fn summarize_plants(views: &OutlierViews<RatioRecord>) -> Vec<PlantSummary> {
    let count = summarize_by_plant(&views.count.kept, count_summary);
    let area = summarize_by_plant(&views.area.kept, area_summary);
    outer_join(count, area)
        .into_iter()
        .map(|j| PlantSummary {
            plant_path: j.key,
            count: j.left,
            area: j.right,
        })
        .collect()
}

fn summarize_by_plant<S>(
    rows: &[RatioRecord],
    summarize: impl Fn(&[&RatioRecord]) -> S,
) -> Vec<(String, S)> {
    group_indices(rows, |r| r.plant().to_string())
        .into_iter()
        .map(|(plant, indices)| {
            let group: Vec<&RatioRecord> = indices.iter().map(|&i| &rows[i]).collect();
            (plant, summarize(&group))
        })
        .collect()
}

fn count_summary(rows: &[&RatioRecord]) -> CountSummary {
    let column = |f: fn(&RatioRecord) -> f64| mean(&rows.iter().map(|r| f(r)).collect::<Vec<_>>());
    CountSummary {
        root_count_ratio: column(|r| r.root_count_ratio),
        upper_root_count: column(|r| r.record.traits.upper_root_count as f64),
        bottom_root_count: column(|r| r.record.traits.bottom_root_count as f64),
        samples: rows.len(),
    }
}

fn area_summary(rows: &[&RatioRecord]) -> AreaSummary {
    let column = |f: fn(&RatioRecord) -> f64| mean(&rows.iter().map(|r| f(r)).collect::<Vec<_>>());
    AreaSummary {
        root_area_ratio: column(|r| r.root_area_ratio),
        upper_area: column(|r| r.record.traits.upper_area as f64),
        bottom_area: column(|r| r.record.traits.bottom_area as f64),
        samples: rows.len(),
    }
}
