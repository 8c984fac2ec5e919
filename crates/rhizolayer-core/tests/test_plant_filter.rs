use approx::assert_relative_eq;

use rhizolayer_core::filter::plants::{
    filter_plants, group_by_parent_directory, join_metadata, merge_filtered_plants,
    split_plant_outliers,
};
use rhizolayer_core::filter::{OutlierCombination, PlantFilterConfig};
use rhizolayer_core::io::metadata::Metadata;
use rhizolayer_core::records::{AreaSummary, CountSummary, PlantRecord, PlantSummary};

fn summary(path: &str, count_ratio: Option<f64>, area_ratio: Option<f64>) -> PlantSummary {
    PlantSummary {
        plant_path: path.to_string(),
        count: count_ratio.map(|r| CountSummary {
            root_count_ratio: r,
            upper_root_count: 4.0,
            bottom_root_count: 4.0 * r,
            samples: 3,
        }),
        area: area_ratio.map(|r| AreaSummary {
            root_area_ratio: r,
            upper_area: 1000.0,
            bottom_area: 1000.0 * r,
            samples: 3,
        }),
    }
}

fn plant(name: &str, group: Option<&str>, count: f64, area: f64) -> PlantRecord {
    PlantRecord::from_summary(
        summary(&format!("scans/{name}"), Some(count), Some(area)),
        group.map(str::to_string),
    )
}

fn metadata(pairs: &[(&str, &str)]) -> Metadata {
    Metadata::from_pairs(
        "accession",
        pairs.iter().map(|(b, g)| (b.to_string(), g.to_string())),
    )
}

fn names(plants: &[PlantRecord]) -> Vec<&str> {
    plants.iter().map(|p| p.plant_name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Group assignment
// ---------------------------------------------------------------------------

#[test]
fn test_join_metadata_on_plant_name() {
    let summaries = vec![
        summary("run1/scans/P001", Some(1.0), Some(1.0)),
        summary("run1/scans/P002", Some(1.0), Some(1.0)),
        summary("run1/scans/P404", Some(1.0), Some(1.0)),
    ];
    let meta = metadata(&[("P001", "Col-0"), ("P002", "ler"), ("P003", "ler")]);
    let assignment = join_metadata(summaries, &meta);

    assert_eq!(assignment.plants[0].plant_name, "P001");
    assert_eq!(assignment.plants[0].group.as_deref(), Some("Col-0"));
    assert_eq!(assignment.plants[1].group.as_deref(), Some("ler"));
    assert_eq!(assignment.plants[2].group, None);
    assert_eq!(assignment.unmatched, vec!["P404".to_string()]);
}

#[test]
fn test_metadata_duplicates_and_empty_groups() {
    let meta = metadata(&[("P1", "first"), ("P1", "second"), ("P2", "")]);
    assert_eq!(meta.group_of("P1"), Some("first"));
    assert_eq!(meta.group_of("P2"), None);
    assert_eq!(meta.len(), 1);
}

#[test]
fn test_group_by_parent_directory() {
    let summaries = vec![
        summary("data/drought/P1", Some(1.0), Some(1.0)),
        summary("data/control/P2", Some(1.0), Some(1.0)),
        summary("P3", Some(1.0), Some(1.0)),
    ];
    let assignment = group_by_parent_directory(summaries);
    assert_eq!(assignment.plants[0].group.as_deref(), Some("drought"));
    assert_eq!(assignment.plants[1].group.as_deref(), Some("control"));
    assert_eq!(assignment.plants[2].group, None);
    assert_eq!(assignment.unmatched, vec!["P3".to_string()]);
}

// ---------------------------------------------------------------------------
// Group-level filtering
// ---------------------------------------------------------------------------

#[test]
fn test_outlier_plant_removed_within_group() {
    let mut plants: Vec<_> = (0..5)
        .map(|i| plant(&format!("A{i}"), Some("A"), 1.0, 0.8 + 0.1 * i as f64))
        .collect();
    plants.push(plant("A5", Some("A"), 10.0, 1.0));

    let views = split_plant_outliers(&plants, &PlantFilterConfig::default());
    assert_eq!(names(&views.count.removed), vec!["A5"]);
    assert_eq!(views.area.kept.len(), 6);
}

#[test]
fn test_groups_are_filtered_independently() {
    let plants = vec![
        plant("A1", Some("A"), 1.0, 1.0),
        plant("A2", Some("A"), 2.0, 2.0),
        plant("B1", Some("B"), 100.0, 100.0),
        plant("B2", Some("B"), 200.0, 200.0),
    ];
    let views = split_plant_outliers(&plants, &PlantFilterConfig::default());
    assert_eq!(views.count.kept.len(), 4);
    assert_eq!(views.area.kept.len(), 4);
}

#[test]
fn test_incomplete_and_ungrouped_plants() {
    let plants = vec![
        plant("A1", Some("A"), 1.0, 1.0),
        plant("A2", Some("A"), 2.0, 2.0),
        PlantRecord::from_summary(summary("scans/A3", None, Some(1.5)), Some("A".into())),
        plant("Z1", None, 3.0, 3.0),
    ];
    let output = filter_plants(plants, &PlantFilterConfig::default());

    assert_eq!(names(&output.incomplete), vec!["A3"]);
    assert_eq!(names(&output.filtered_plants), vec!["A1", "A2", "Z1"]);
    assert_eq!(output.filtered_plants[2].group, None);
    assert_eq!(output.group_summary.len(), 1);
    assert_eq!(output.group_summary[0].count.as_ref().unwrap().samples, 2);
}

#[test]
fn test_merged_plants_sorted_by_group_missing_last() {
    let views = split_plant_outliers(
        &[
            plant("B1", Some("B"), 1.0, 1.0),
            plant("B2", Some("B"), 2.0, 2.0),
            plant("A1", Some("A"), 1.0, 1.0),
            plant("A2", Some("A"), 2.0, 2.0),
        ],
        &PlantFilterConfig::default(),
    );
    let merged = merge_filtered_plants(&views, vec![plant("Z", None, 1.0, 1.0)]);
    let groups: Vec<_> = merged.iter().map(|p| p.group.as_deref()).collect();
    assert_eq!(
        groups,
        vec![Some("A"), Some("A"), Some("B"), Some("B"), None]
    );
}

#[test]
fn test_merged_plant_takes_each_side_from_its_view() {
    let mut plants: Vec<_> = (0..5)
        .map(|i| plant(&format!("A{i}"), Some("A"), 1.0 + 0.1 * i as f64, 1.0 + 0.1 * i as f64))
        .collect();
    plants.push(plant("A5", Some("A"), 10.0, 1.2));

    let views = split_plant_outliers(&plants, &PlantFilterConfig::default());
    let merged = merge_filtered_plants(&views, Vec::new());
    let outlier = merged.iter().find(|p| p.plant_name == "A5").unwrap();
    assert!(outlier.count.is_none());
    assert_relative_eq!(outlier.area_ratio().unwrap(), 1.2);
    assert_eq!(outlier.plant_path, "scans/A5");
    assert_eq!(outlier.group.as_deref(), Some("A"));
}

#[test]
fn test_same_plant_name_in_two_directories_kept_apart() {
    let summaries: Vec<_> = ["scannerA", "scannerB"]
        .iter()
        .enumerate()
        .flat_map(|(d, dir)| {
            (0..4).map(move |i| {
                let ratio = 1.0 + 0.1 * i as f64 + 0.05 * d as f64;
                summary(&format!("data/{dir}/P{i}"), Some(ratio), Some(ratio))
            })
        })
        .collect();
    let assignment = group_by_parent_directory(summaries);
    let output = filter_plants(assignment.plants, &PlantFilterConfig::default());

    assert_eq!(output.views.count.kept.len(), 8);
    assert_eq!(output.filtered_plants.len(), 8);

    let mut paths: Vec<_> = output
        .filtered_plants
        .iter()
        .map(|p| p.plant_path.as_str())
        .collect();
    paths.dedup();
    assert_eq!(paths.len(), 8);

    let b2 = output
        .filtered_plants
        .iter()
        .find(|p| p.plant_path == "data/scannerB/P2")
        .unwrap();
    assert_eq!(b2.plant_name, "P2");
    assert_eq!(b2.group.as_deref(), Some("scannerB"));
    assert_relative_eq!(b2.count_ratio().unwrap(), 1.25, epsilon = 1e-12);
    assert_relative_eq!(b2.area_ratio().unwrap(), 1.25, epsilon = 1e-12);
}

#[test]
fn test_shared_barcode_across_directories_kept_apart() {
    let summaries = vec![
        summary("run1/P1", Some(1.0), Some(2.0)),
        summary("run2/P1", Some(3.0), Some(4.0)),
        summary("run1/P2", Some(2.0), Some(3.0)),
    ];
    let meta = metadata(&[("P1", "Col-0"), ("P2", "Col-0")]);
    let assignment = join_metadata(summaries, &meta);
    let output = filter_plants(assignment.plants, &PlantFilterConfig::default());

    assert_eq!(names(&output.filtered_plants), vec!["P1", "P2", "P1"]);
    let run2 = &output.filtered_plants[2];
    assert_eq!(run2.plant_path, "run2/P1");
    assert_relative_eq!(run2.count_ratio().unwrap(), 3.0);
    assert_relative_eq!(run2.area_ratio().unwrap(), 4.0);
    assert_eq!(output.group_summary[0].count.as_ref().unwrap().samples, 3);
}

// ---------------------------------------------------------------------------
// Group aggregates
// ---------------------------------------------------------------------------

#[test]
fn test_group_present_in_one_view_appears_once() {
    let plants = vec![
        // X: count ratios vary, area ratios constant -> area view drops X.
        plant("X1", Some("X"), 1.0, 0.5),
        plant("X2", Some("X"), 2.0, 0.5),
        plant("X3", Some("X"), 3.0, 0.5),
        plant("Y1", Some("Y"), 1.0, 1.0),
        plant("Y2", Some("Y"), 3.0, 2.0),
    ];
    let output = filter_plants(plants, &PlantFilterConfig::default());

    let groups: Vec<_> = output.group_summary.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(groups, vec!["X", "Y"]);

    let x = &output.group_summary[0];
    assert_relative_eq!(x.count.as_ref().unwrap().root_count_ratio, 2.0);
    assert_eq!(x.count.as_ref().unwrap().samples, 3);
    assert!(x.area.is_none());

    let y = &output.group_summary[1];
    assert_relative_eq!(y.area.as_ref().unwrap().root_area_ratio, 1.5);
    assert_relative_eq!(y.area.as_ref().unwrap().bottom_area, 1500.0);
}

#[test]
fn test_group_statistics() {
    let plants = vec![
        plant("A1", Some("A"), 1.0, 2.0),
        plant("A2", Some("A"), 2.0, 4.0),
        plant("A3", Some("A"), 4.0, 6.0),
    ];
    let output = filter_plants(plants, &PlantFilterConfig::default());
    assert_eq!(output.group_statistics.len(), 1);

    let count = output.group_statistics[0].root_count_ratio.as_ref().unwrap();
    assert_relative_eq!(count.mean, 7.0 / 3.0);
    assert_relative_eq!(count.median, 2.0);
    assert_relative_eq!(count.min, 1.0);
    assert_relative_eq!(count.max, 4.0);
    assert_relative_eq!(count.std, (7.0f64 / 3.0).sqrt(), epsilon = 1e-12);

    let area = output.group_statistics[0].root_area_ratio.as_ref().unwrap();
    assert_relative_eq!(area.mean, 4.0);
    assert_relative_eq!(area.std, 2.0);
}

#[test]
fn test_combined_plant_filtering() {
    let mut plants: Vec<_> = (0..5)
        .map(|i| plant(&format!("A{i}"), Some("A"), 1.0, 0.8 + 0.1 * i as f64))
        .collect();
    // Varying counts so the count criterion is defined.
    for (i, p) in plants.iter_mut().enumerate() {
        p.count.as_mut().unwrap().root_count_ratio = 1.0 + 0.1 * i as f64;
    }
    plants.push(plant("A5", Some("A"), 10.0, 1.0));

    let config = PlantFilterConfig {
        combination: OutlierCombination::Combined,
        ..Default::default()
    };
    let output = filter_plants(plants, &config);
    assert_eq!(names(&output.views.area.removed), vec!["A5"]);
    assert_eq!(output.views.count.kept, output.views.area.kept);
    assert_eq!(output.filtered_plants.len(), 5);
}
