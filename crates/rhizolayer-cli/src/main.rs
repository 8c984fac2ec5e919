mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rhizolayer", about = "Root distribution across soil layers")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run trait extraction and hierarchical filtering over a scan folder
    Run(commands::pipeline::RunArgs),
    /// Locate the layer boundary of a single image
    Boundary(commands::boundary::BoundaryArgs),
    /// Measure the traits of a single image/mask pair
    Traits(commands::traits::TraitsArgs),
    /// Print or save the default pipeline config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Boundary(args) => commands::boundary::run(args),
        Commands::Traits(args) => commands::traits::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
