use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rhizolayer_core::boundary::BoundaryConfig;
use rhizolayer_core::filter::{FrameFilterConfig, PlantFilterConfig};
use rhizolayer_core::pipeline::config::{GroupingScheme, PipelineConfig};
use rhizolayer_core::traits::TraitConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default PipelineConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = PipelineConfig {
        image_folder: PathBuf::from("images"),
        seg_folder: PathBuf::from("segmentation"),
        output: PathBuf::from("results"),
        grouping: GroupingScheme::default(),
        boundary: BoundaryConfig::default(),
        traits: TraitConfig::default(),
        frame_filter: FrameFilterConfig::default(),
        plant_filter: PlantFilterConfig::default(),
        reuse_boundaries: false,
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
