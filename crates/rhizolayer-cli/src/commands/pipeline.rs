use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use rhizolayer_core::filter::OutlierCombination;
use rhizolayer_core::pipeline::config::{GroupingScheme, PipelineConfig};
use rhizolayer_core::pipeline::run_pipeline_reported;

use crate::progress::BarReporter;
use crate::summary::{print_pipeline_summary, print_run_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Folder of scan images (PNG), one sub-folder per plant
    #[arg(long, required_unless_present = "config")]
    pub image_folder: Option<PathBuf>,

    /// Folder of segmentation masks mirroring the image folder
    #[arg(long, required_unless_present = "config")]
    pub seg_folder: Option<PathBuf>,

    /// Folder receiving traits and analysis tables
    #[arg(long, required_unless_present = "config")]
    pub save_path: Option<PathBuf>,

    /// Metadata CSV mapping plant barcodes to experimental groups
    #[arg(long, required_unless_present_any = ["config", "group_by_directory"])]
    pub master_data_csv: Option<PathBuf>,

    /// Metadata column used to group plants for outlier removal
    #[arg(long, required_unless_present_any = ["config", "group_by_directory"])]
    pub plant_group: Option<String>,

    /// Group plants by their parent directory instead of metadata
    #[arg(long, conflicts_with_all = ["master_data_csv", "plant_group"])]
    pub group_by_directory: bool,

    /// Zero-bottom frame fraction below which those frames are removed
    #[arg(long)]
    pub zero_bottom_threshold: Option<f64>,

    /// Leading rows excluded from the boundary search
    #[arg(long)]
    pub exclude_top: Option<usize>,

    /// Trailing rows excluded from the boundary search
    #[arg(long)]
    pub exclude_bottom: Option<usize>,

    /// Keep only rows passing both the count and area z-score criteria
    #[arg(long)]
    pub combined_outliers: bool,

    /// Reuse layer_index.csv from the output folder if present
    #[arg(long)]
    pub reuse_boundaries: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)?
    };
    apply_overrides(&mut config, args);

    if !config.image_folder.is_dir() {
        bail!("Image folder not found: {}", config.image_folder.display());
    }
    if !config.seg_folder.is_dir() {
        bail!(
            "Segmentation folder not found: {}",
            config.seg_folder.display()
        );
    }
    if let GroupingScheme::Metadata { ref table, .. } = config.grouping {
        if !table.is_file() {
            bail!("Metadata file not found: {}", table.display());
        }
    }

    print_pipeline_summary(&config);

    let reporter = Arc::new(BarReporter::new()?);
    let output = run_pipeline_reported(&config, reporter).context("Pipeline failed")?;

    print_run_summary(&output);
    println!("Tables saved to {}", config.output.display());

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let required = |value: &Option<PathBuf>, flag: &str| {
        value
            .clone()
            .with_context(|| format!("--{flag} is required without --config"))
    };

    let grouping = if args.group_by_directory {
        GroupingScheme::ParentDirectory
    } else {
        GroupingScheme::Metadata {
            table: required(&args.master_data_csv, "master-data-csv")?,
            column: args
                .plant_group
                .clone()
                .context("--plant-group is required without --config")?,
        }
    };

    Ok(PipelineConfig {
        image_folder: required(&args.image_folder, "image-folder")?,
        seg_folder: required(&args.seg_folder, "seg-folder")?,
        output: required(&args.save_path, "save-path")?,
        reuse_boundaries: false,
        grouping,
        boundary: Default::default(),
        traits: Default::default(),
        frame_filter: Default::default(),
        plant_filter: Default::default(),
    })
}

fn apply_overrides(config: &mut PipelineConfig, args: &RunArgs) {
    if let Some(threshold) = args.zero_bottom_threshold {
        config.frame_filter.zero_bottom_threshold = threshold;
    }
    if let Some(rows) = args.exclude_top {
        config.boundary.exclude_top = rows;
    }
    if let Some(rows) = args.exclude_bottom {
        config.boundary.exclude_bottom = rows;
    }
    if args.combined_outliers {
        config.frame_filter.combination = OutlierCombination::Combined;
        config.plant_filter.combination = OutlierCombination::Combined;
    }
    if args.reuse_boundaries {
        config.reuse_boundaries = true;
    }
}
