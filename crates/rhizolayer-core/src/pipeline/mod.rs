pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    extract_all_traits, locate_all_boundaries, run_pipeline, run_pipeline_reported,
};
pub use types::{PipelineOutput, PipelineStage, ProgressReporter};
