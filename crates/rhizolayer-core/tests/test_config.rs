use std::path::PathBuf;

use rhizolayer_core::boundary::{BoundaryConfig, GradientPolarity};
use rhizolayer_core::filter::{FrameFilterConfig, OutlierCombination, PlantFilterConfig};
use rhizolayer_core::pipeline::config::{GroupingScheme, PipelineConfig};
use rhizolayer_core::pipeline::PipelineStage;
use rhizolayer_core::traits::TraitConfig;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_polarity_display() {
    assert_eq!(format!("{}", GradientPolarity::Signed), "Signed");
    assert_eq!(format!("{}", GradientPolarity::Absolute), "Absolute");
    assert_eq!(GradientPolarity::default(), GradientPolarity::Signed);
}

#[test]
fn test_outlier_combination_display() {
    assert_eq!(format!("{}", OutlierCombination::Independent), "Independent");
    assert_eq!(format!("{}", OutlierCombination::Combined), "Combined");
    assert_eq!(OutlierCombination::default(), OutlierCombination::Independent);
}

#[test]
fn test_grouping_scheme_display_and_label() {
    let scheme = GroupingScheme::default();
    assert_eq!(format!("{scheme}"), "Metadata (metadata.csv by accession)");
    assert_eq!(scheme.column_label(), "accession");

    let scheme = GroupingScheme::ParentDirectory;
    assert_eq!(format!("{scheme}"), "Parent Directory");
    assert_eq!(scheme.column_label(), "parent_directory");
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(format!("{}", PipelineStage::Discovering), "Discovering images");
    assert_eq!(
        format!("{}", PipelineStage::LocatingBoundaries),
        "Locating boundaries"
    );
    assert_eq!(format!("{}", PipelineStage::FilteringPlants), "Filtering plants");
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_stage_defaults() {
    let boundary = BoundaryConfig::default();
    assert_eq!(boundary.strip_far_offset, 200);
    assert_eq!(boundary.strip_near_offset, 100);
    assert_eq!(boundary.exclude_top, 350);
    assert_eq!(boundary.exclude_bottom, 550);
    assert_eq!(boundary.min_height(), 901);

    let traits = TraitConfig::default();
    assert_eq!(traits.area_top_row, 170);
    assert_eq!(traits.bottom_margin, 5);
    assert_eq!(traits.threshold_area, 50);
    assert_eq!(traits.threshold_count, 5);

    let frames = FrameFilterConfig::default();
    assert_eq!(frames.zero_bottom_threshold, 0.5);
    assert_eq!(frames.z_score_threshold, 2.0);
    assert_eq!(PlantFilterConfig::default().z_score_threshold, 2.0);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_minimal_config_fills_defaults() {
    let json = r#"{"image_folder": "scans", "seg_folder": "masks", "output": "out"}"#;
    let config: PipelineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.image_folder, PathBuf::from("scans"));
    assert!(!config.reuse_boundaries);
    assert_eq!(config.grouping, GroupingScheme::default());
    assert_eq!(config.boundary, BoundaryConfig::default());
    assert_eq!(config.traits, TraitConfig::default());
    assert_eq!(config.frame_filter, FrameFilterConfig::default());
}

#[test]
fn test_partial_stage_config() {
    let json = r#"{
        "image_folder": "scans",
        "seg_folder": "masks",
        "output": "out",
        "grouping": "ParentDirectory",
        "boundary": {"exclude_top": 300, "polarity": "Absolute"},
        "frame_filter": {"combination": "Combined"}
    }"#;
    let config: PipelineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.grouping, GroupingScheme::ParentDirectory);
    assert_eq!(config.boundary.exclude_top, 300);
    assert_eq!(config.boundary.exclude_bottom, 550);
    assert_eq!(config.boundary.polarity, GradientPolarity::Absolute);
    assert_eq!(config.frame_filter.combination, OutlierCombination::Combined);
    assert_eq!(config.frame_filter.zero_bottom_threshold, 0.5);
}

#[test]
fn test_config_roundtrip() {
    let config = PipelineConfig {
        image_folder: "a".into(),
        seg_folder: "b".into(),
        output: "c".into(),
        reuse_boundaries: true,
        grouping: GroupingScheme::Metadata {
            table: "design.csv".into(),
            column: "genotype".into(),
        },
        boundary: BoundaryConfig::default(),
        traits: TraitConfig {
            threshold_count: 8,
            ..Default::default()
        },
        frame_filter: FrameFilterConfig::default(),
        plant_filter: PlantFilterConfig::default(),
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: PipelineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
