//! Plant-level filtering and per-group aggregation.

use tracing::{info, warn};

use crate::io::metadata::Metadata;
use crate::merge::outer_join;
use crate::records::{
    plant_name_from_path, AreaSummary, CountSummary, GroupStatistics, GroupSummary, PlantRecord,
    PlantSummary, RatioStatistics,
};
use crate::stats::{group_indices, mean, median, std_sample};

use super::{split_outliers, OutlierViews, PlantFilterConfig, Split};

/// Plant summaries with their group attached.
#[derive(Clone, Debug)]
pub struct GroupAssignment {
    pub plants: Vec<PlantRecord>,
    /// Plant names that could not be assigned a group.
    pub unmatched: Vec<String>,
}

/// Everything produced by the plant-level stage.
#[derive(Clone, Debug)]
pub struct PlantFilterOutput {
    /// Grouped plants missing one of the two ratios; not filtered.
    pub incomplete: Vec<PlantRecord>,
    pub views: OutlierViews<PlantRecord>,
    /// Count and area views merged on plant path, ungrouped plants appended,
    /// sorted by group.
    pub filtered_plants: Vec<PlantRecord>,
    pub group_summary: Vec<GroupSummary>,
    pub group_statistics: Vec<GroupStatistics>,
}

/// Left-join plant summaries with metadata on plant name == barcode.
pub fn join_metadata(summaries: Vec<PlantSummary>, metadata: &Metadata) -> GroupAssignment {
    assign_groups(summaries, |plant| {
        metadata
            .group_of(plant_name_from_path(&plant.plant_path))
            .map(str::to_string)
    })
}

/// Group each plant by the directory that contains the plant directory.
pub fn group_by_parent_directory(summaries: Vec<PlantSummary>) -> GroupAssignment {
    assign_groups(summaries, |plant| {
        let mut segments = plant.plant_path.rsplit('/').filter(|s| !s.is_empty());
        segments.next();
        segments.next().map(str::to_string)
    })
}

fn assign_groups(
    summaries: Vec<PlantSummary>,
    group_of: impl Fn(&PlantSummary) -> Option<String>,
) -> GroupAssignment {
    let mut unmatched = Vec::new();
    let plants: Vec<PlantRecord> = summaries
        .into_iter()
        .map(|summary| {
            let group = group_of(&summary);
            let record = PlantRecord::from_summary(summary, group);
            if record.group.is_none() {
                unmatched.push(record.plant_name.clone());
            }
            record
        })
        .collect();

    if !unmatched.is_empty() {
        warn!(
            unmatched = unmatched.len(),
            plants = plants.len(),
            "Plants without a group are excluded from group aggregates"
        );
    }
    GroupAssignment { plants, unmatched }
}

/// Run the group-level z-score filtering and aggregation.
pub fn filter_plants(plants: Vec<PlantRecord>, config: &PlantFilterConfig) -> PlantFilterOutput {
    let (grouped, ungrouped): (Vec<_>, Vec<_>) =
        plants.into_iter().partition(|p| p.group.is_some());
    let Split {
        kept: eligible,
        removed: incomplete,
    } = Split::partition(grouped, |p| p.count_ratio().is_some() && p.area_ratio().is_some());
    if !incomplete.is_empty() {
        info!(
            incomplete = incomplete.len(),
            "Skipped grouped plants missing a ratio"
        );
    }

    let views = split_plant_outliers(&eligible, config);
    let filtered_plants = merge_filtered_plants(&views, ungrouped);
    let group_summary = summarize_groups(&views);
    let group_statistics = group_statistics(&views);

    PlantFilterOutput {
        incomplete,
        views,
        filtered_plants,
        group_summary,
        group_statistics,
    }
}

/// Z-score filtering of plants within each group.
///
/// Rows must carry a group and both ratios; see [`filter_plants`].
pub fn split_plant_outliers(
    plants: &[PlantRecord],
    config: &PlantFilterConfig,
) -> OutlierViews<PlantRecord> {
    let views = split_outliers(
        plants,
        |p| p.group.clone().unwrap_or_default(),
        |p| p.count_ratio().unwrap_or(f64::NAN),
        |p| p.area_ratio().unwrap_or(f64::NAN),
        config.z_score_threshold,
        config.combination,
    );
    info!(
        count_outliers = views.count.removed.len(),
        area_outliers = views.area.removed.len(),
        "Removed plant outliers per group"
    );
    views
}

/// Merge the two plant views on plant path.
///
/// Plant names repeat across scanner directories, so the path is the join
/// key. The count side provides count traits, the area side area traits;
/// plant name and group follow the left-unless-missing rule. `ungrouped` plants are
/// appended unchanged and the result is sorted by group, missing groups last.
pub fn merge_filtered_plants(
    views: &OutlierViews<PlantRecord>,
    ungrouped: Vec<PlantRecord>,
) -> Vec<PlantRecord> {
    let count = views.count.kept.iter().map(|p| (p.plant_path.clone(), p));
    let area = views.area.kept.iter().map(|p| (p.plant_path.clone(), p));

    let mut merged: Vec<PlantRecord> = outer_join(count, area)
        .into_iter()
        .map(|j| PlantRecord {
            plant_name: j
                .coalesce(|l| Some(l.plant_name.clone()), |r| Some(r.plant_name.clone()))
                .unwrap_or_default(),
            group: j.coalesce(|l| l.group.clone(), |r| r.group.clone()),
            count: j.left.and_then(|l| l.count.clone()),
            area: j.right.and_then(|r| r.area.clone()),
            plant_path: j.key,
        })
        .collect();
    merged.extend(ungrouped);

    merged.sort_by(|a, b| match (&a.group, &b.group) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    merged
}

/// Per-group means of each view, outer-merged on group.
pub fn summarize_groups(views: &OutlierViews<PlantRecord>) -> Vec<GroupSummary> {
    let count = by_group(&views.count.kept, |plants| {
        let column = |f: fn(&CountSummary) -> f64| {
            mean(&plants.iter().filter_map(|p| p.count.as_ref().map(f)).collect::<Vec<_>>())
        };
        CountSummary {
            root_count_ratio: column(|c| c.root_count_ratio),
            upper_root_count: column(|c| c.upper_root_count),
            bottom_root_count: column(|c| c.bottom_root_count),
            samples: plants.len(),
        }
    });
    let area = by_group(&views.area.kept, |plants| {
        let column = |f: fn(&AreaSummary) -> f64| {
            mean(&plants.iter().filter_map(|p| p.area.as_ref().map(f)).collect::<Vec<_>>())
        };
        AreaSummary {
            root_area_ratio: column(|a| a.root_area_ratio),
            upper_area: column(|a| a.upper_area),
            bottom_area: column(|a| a.bottom_area),
            samples: plants.len(),
        }
    });

    outer_join(count, area)
        .into_iter()
        .map(|j| GroupSummary {
            group: j.key,
            count: j.left,
            area: j.right,
        })
        .collect()
}

/// Mean, median, standard deviation and range of both ratios per group.
pub fn group_statistics(views: &OutlierViews<PlantRecord>) -> Vec<GroupStatistics> {
    let count = by_group(&views.count.kept, |plants| {
        ratio_statistics(&plants.iter().filter_map(|p| p.count_ratio()).collect::<Vec<_>>())
    });
    let area = by_group(&views.area.kept, |plants| {
        ratio_statistics(&plants.iter().filter_map(|p| p.area_ratio()).collect::<Vec<_>>())
    });

    outer_join(count, area)
        .into_iter()
        .map(|j| GroupStatistics {
            group: j.key,
            root_count_ratio: j.left,
            root_area_ratio: j.right,
        })
        .collect()
}

fn ratio_statistics(values: &[f64]) -> RatioStatistics {
    RatioStatistics {
        mean: mean(values),
        median: median(values),
        std: std_sample(values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

fn by_group<S>(
    plants: &[PlantRecord],
    summarize: impl Fn(&[&PlantRecord]) -> S,
) -> Vec<(String, S)> {
    group_indices(plants, |p| p.group.clone())
        .into_iter()
        .filter_map(|(group, indices)| {
            let group = group?;
            let members: Vec<&PlantRecord> = indices.iter().map(|&i| &plants[i]).collect();
            Some((group, summarize(&members)))
        })
        .collect()
}
