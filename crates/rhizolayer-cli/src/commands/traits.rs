use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rhizolayer_core::boundary::{locate_boundary, BoundaryConfig};
use rhizolayer_core::io::image_io::{load_image, load_mask};
use rhizolayer_core::traits::{extract_traits, TraitConfig};

#[derive(Args)]
pub struct TraitsArgs {
    /// Scan image (PNG), used to locate the boundary
    pub image: PathBuf,

    /// Segmentation mask of the same frame
    pub mask: PathBuf,

    /// Use this boundary row instead of locating it
    #[arg(long)]
    pub boundary: Option<usize>,

    /// Rows excluded on each side of the boundary
    #[arg(long, default_value = "50")]
    pub threshold_area: usize,

    /// Height of the root counting bands
    #[arg(long, default_value = "5")]
    pub threshold_count: usize,
}

pub fn run(args: &TraitsArgs) -> Result<()> {
    let boundary = match args.boundary {
        Some(row) => row,
        None => {
            let frame = load_image(&args.image)
                .with_context(|| format!("Failed to load {}", args.image.display()))?;
            locate_boundary(&frame, &BoundaryConfig::default())?
        }
    };
    let mask = load_mask(&args.mask)
        .with_context(|| format!("Failed to load {}", args.mask.display()))?;

    let config = TraitConfig {
        threshold_area: args.threshold_area,
        threshold_count: args.threshold_count,
        ..Default::default()
    };
    let traits = extract_traits(&mask, boundary, &config);

    println!("Boundary:          row {}", boundary);
    println!("Upper area:        {}", traits.upper_area);
    println!("Bottom area:       {}", traits.bottom_area);
    println!("Upper root count:  {}", traits.upper_root_count);
    println!("Bottom root count: {}", traits.bottom_root_count);
    Ok(())
}
