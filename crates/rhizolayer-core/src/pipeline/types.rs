use crate::filter::frames::FrameFilterOutput;
use crate::filter::plants::PlantFilterOutput;
use crate::records::{ImageRecord, TraitRecord};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Discovering,
    LocatingBoundaries,
    ExtractingTraits,
    FilteringFrames,
    FilteringPlants,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovering => write!(f, "Discovering images"),
            Self::LocatingBoundaries => write!(f, "Locating boundaries"),
            Self::ExtractingTraits => write!(f, "Extracting traits"),
            Self::FilteringFrames => write!(f, "Filtering frames"),
            Self::FilteringPlants => write!(f, "Filtering plants"),
        }
    }
}

/// Everything one pipeline run produced. Every table here has also been
/// written to the output folder.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub boundaries: Vec<ImageRecord>,
    pub traits: Vec<TraitRecord>,
    pub frames: FrameFilterOutput,
    /// Plant names that could not be assigned a group.
    pub unmatched_plants: Vec<String>,
    pub plants: PlantFilterOutput,
}

/// Receives stage and per-frame progress from a pipeline run.
///
/// Called from rayon worker threads during boundary location and trait
/// extraction, hence `Send + Sync`. Every method defaults to doing nothing.
pub trait ProgressReporter: Send + Sync {
    /// `total_items` is the frame count for per-frame stages, `None` for the
    /// table-level stages.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` frames of the current stage have finished.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
