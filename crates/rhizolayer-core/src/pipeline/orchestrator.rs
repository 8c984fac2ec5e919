use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::boundary::{locate_boundary, BoundaryConfig};
use crate::consts::*;
use crate::error::Result;
use crate::filter::frames::{filter_frames, FrameFilterOutput};
use crate::filter::plants::{filter_plants, group_by_parent_directory, join_metadata};
use crate::io::discovery::{discover_images, FrameSource};
use crate::io::image_io::{load_image, load_mask};
use crate::io::metadata::Metadata;
use crate::io::tables::{read_image_records, write_table, ColumnLabels};
use crate::records::{ImageRecord, TraitRecord};
use crate::traits::{extract_traits, TraitConfig};

use super::config::{GroupingScheme, PipelineConfig};
use super::types::{NoOpReporter, PipelineOutput, PipelineStage, ProgressReporter};

/// Locate the layer boundary of every discovered image, in parallel.
///
/// Results keep the order of `sources`. The first unreadable image aborts the
/// whole batch.
pub fn locate_all_boundaries(
    image_folder: &Path,
    sources: &[FrameSource],
    config: &BoundaryConfig,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Result<Vec<ImageRecord>> {
    let done = AtomicUsize::new(0);
    sources
        .par_iter()
        .map(|source| -> Result<ImageRecord> {
            let frame = load_image(&source.image_path(image_folder))?;
            let boundary_row = locate_boundary(&frame, config)?;
            on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
            Ok(ImageRecord {
                image_name: source.image_name.clone(),
                plant: source.plant.clone(),
                frame: source.frame.clone(),
                boundary_row,
            })
        })
        .collect()
}

/// Measure traits on the mask of every boundary record, in parallel.
///
/// A missing mask is an error rather than a frame with zero traits.
pub fn extract_all_traits(
    seg_folder: &Path,
    images: &[ImageRecord],
    config: &TraitConfig,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Result<Vec<TraitRecord>> {
    let done = AtomicUsize::new(0);
    images
        .par_iter()
        .map(|image| -> Result<TraitRecord> {
            let mask = load_mask(&seg_folder.join(&image.image_name))?;
            let traits = extract_traits(&mask, image.boundary_row, config);
            on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
            Ok(TraitRecord::new(image.clone(), traits))
        })
        .collect()
}

/// Run the full pipeline with a thread-safe progress reporter.
///
/// Each table is written to the output folder as soon as its stage
/// completes, so a failure in a later stage keeps earlier results.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineOutput> {
    let out = config.output.as_path();
    std::fs::create_dir_all(out)?;
    let labels = ColumnLabels {
        group: config.grouping.column_label(),
    };

    // Fail on a bad metadata table before any image work.
    let metadata = match &config.grouping {
        GroupingScheme::Metadata { table, column } => Some(Metadata::load(table, column)?),
        GroupingScheme::ParentDirectory => None,
    };

    let boundaries = boundaries(config, &reporter, &labels)?;

    reporter.begin_stage(PipelineStage::ExtractingTraits, Some(boundaries.len()));
    let traits = extract_all_traits(&config.seg_folder, &boundaries, &config.traits, |n| {
        reporter.advance(n)
    })?;
    write_table(&out.join(TRAITS_FILE), &traits, &labels)?;
    reporter.finish_stage();
    info!(frames = traits.len(), "Extracted traits");

    reporter.begin_stage(PipelineStage::FilteringFrames, None);
    let frames = frame_stage(traits.clone(), config, out, &labels)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::FilteringPlants, None);
    let assignment = match &metadata {
        Some(metadata) => join_metadata(frames.summary.clone(), metadata),
        None => group_by_parent_directory(frames.summary.clone()),
    };
    let plants = filter_plants(assignment.plants, &config.plant_filter);
    write_table(&out.join(REMOVED_INCOMPLETE_PLANTS_FILE), &plants.incomplete, &labels)?;
    write_table(
        &out.join(REMOVED_PLANT_OUTLIERS_COUNT_FILE),
        &plants.views.count.removed,
        &labels,
    )?;
    write_table(
        &out.join(REMOVED_PLANT_OUTLIERS_AREA_FILE),
        &plants.views.area.removed,
        &labels,
    )?;
    write_table(&out.join(FILTERED_PLANTS_FILE), &plants.filtered_plants, &labels)?;
    write_table(&out.join(GROUP_SUMMARY_FILE), &plants.group_summary, &labels)?;
    write_table(&out.join(GROUP_STATISTICS_FILE), &plants.group_statistics, &labels)?;
    reporter.finish_stage();
    info!(
        groups = plants.group_summary.len(),
        unmatched = assignment.unmatched.len(),
        "Aggregated plants by group"
    );

    Ok(PipelineOutput {
        boundaries,
        traits,
        frames,
        unmatched_plants: assignment.unmatched,
        plants,
    })
}

/// Run the full pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

fn boundaries(
    config: &PipelineConfig,
    reporter: &Arc<dyn ProgressReporter>,
    labels: &ColumnLabels,
) -> Result<Vec<ImageRecord>> {
    let path = config.output.join(LAYER_INDEX_FILE);
    if config.reuse_boundaries && path.is_file() {
        let records = read_image_records(&path)?;
        info!(images = records.len(), path = %path.display(), "Reusing boundary table");
        return Ok(records);
    }

    reporter.begin_stage(PipelineStage::Discovering, None);
    let sources = discover_images(&config.image_folder)?;
    reporter.finish_stage();
    info!(
        images = sources.len(),
        folder = %config.image_folder.display(),
        "Discovered images"
    );

    reporter.begin_stage(PipelineStage::LocatingBoundaries, Some(sources.len()));
    let records = locate_all_boundaries(&config.image_folder, &sources, &config.boundary, |n| {
        reporter.advance(n)
    })?;
    write_table(&path, &records, labels)?;
    reporter.finish_stage();
    Ok(records)
}

fn frame_stage(
    traits: Vec<TraitRecord>,
    config: &PipelineConfig,
    out: &Path,
    labels: &ColumnLabels,
) -> Result<FrameFilterOutput> {
    let output = filter_frames(traits, &config.frame_filter);

    let FrameFilterOutput {
        zero_upper,
        zero_bottom,
        ratios,
        views,
        ..
    } = &output;
    write_table(&out.join(REMOVED_ZERO_UPPER_FILE), &zero_upper.removed, labels)?;
    write_table(&out.join(FILTERED_ZERO_FILE), &zero_bottom.kept, labels)?;
    write_table(&out.join(REMOVED_ZERO_BOTTOM_FILE), &zero_bottom.removed, labels)?;
    write_table(&out.join(REMOVED_INVALID_RATIO_FILE), &ratios.removed, labels)?;
    write_table(&out.join(FILTERED_FRAMES_COUNT_FILE), &views.count.kept, labels)?;
    write_table(&out.join(FILTERED_FRAMES_AREA_FILE), &views.area.kept, labels)?;
    write_table(
        &out.join(REMOVED_FRAME_OUTLIERS_COUNT_FILE),
        &views.count.removed,
        labels,
    )?;
    write_table(
        &out.join(REMOVED_FRAME_OUTLIERS_AREA_FILE),
        &views.area.removed,
        labels,
    )?;
    write_table(&out.join(FRAME_SUMMARY_FILE), &output.summary, labels)?;
    info!(plants = output.summary.len(), "Summarized frames per plant");
    Ok(output)
}
