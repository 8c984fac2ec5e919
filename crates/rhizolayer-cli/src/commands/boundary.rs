use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rhizolayer_core::boundary::{locate_boundary, BoundaryConfig, GradientPolarity};
use rhizolayer_core::io::image_io::load_image;

#[derive(Args)]
pub struct BoundaryArgs {
    /// Scan image (PNG)
    pub image: PathBuf,

    /// Leading rows excluded from the search
    #[arg(long, default_value = "350")]
    pub exclude_top: usize,

    /// Trailing rows excluded from the search
    #[arg(long, default_value = "550")]
    pub exclude_bottom: usize,

    /// Average absolute gradients instead of signed ones
    #[arg(long)]
    pub absolute: bool,
}

pub fn run(args: &BoundaryArgs) -> Result<()> {
    let frame = load_image(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let config = BoundaryConfig {
        exclude_top: args.exclude_top,
        exclude_bottom: args.exclude_bottom,
        polarity: if args.absolute {
            GradientPolarity::Absolute
        } else {
            GradientPolarity::Signed
        },
        ..Default::default()
    };

    let row = locate_boundary(&frame, &config)?;
    println!("Image:    {}", args.image.display());
    println!("Size:     {}x{}", frame.width(), frame.height());
    println!("Boundary: row {}", row);
    Ok(())
}
