//! Row types flowing between pipeline stages.
//!
//! Records are created once per run and never mutated afterwards; every
//! filtering stage produces new vectors of them.

use serde::{Deserialize, Serialize};

/// One source image and its located soil-layer boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image path relative to the image folder (`/`-separated).
    pub image_name: String,
    /// Plant identifier: the directory holding the image.
    pub plant: String,
    /// Frame identifier: the image file stem.
    pub frame: String,
    /// Absolute row index of the layer boundary.
    #[serde(rename = "layer_ind")]
    pub boundary_row: usize,
}

/// The four traits measured on one segmentation mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTraits {
    pub upper_area: u64,
    pub bottom_area: u64,
    pub upper_root_count: u64,
    pub bottom_root_count: u64,
}

/// An [`ImageRecord`] with its measured traits.
#[derive(Clone, Debug, PartialEq)]
pub struct TraitRecord {
    pub image: ImageRecord,
    pub traits: FrameTraits,
}

impl TraitRecord {
    pub fn new(image: ImageRecord, traits: FrameTraits) -> Self {
        Self { image, traits }
    }

    pub fn plant(&self) -> &str {
        &self.image.plant
    }
}

/// A [`TraitRecord`] with bottom/upper ratios attached.
///
/// Ratios may be non-finite when first computed; the frame filter drops such
/// rows before any statistics are taken.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioRecord {
    pub record: TraitRecord,
    pub root_area_ratio: f64,
    pub root_count_ratio: f64,
}

impl RatioRecord {
    pub fn from_traits(record: TraitRecord) -> Self {
        let t = record.traits;
        Self {
            root_area_ratio: t.bottom_area as f64 / t.upper_area as f64,
            root_count_ratio: t.bottom_root_count as f64 / t.upper_root_count as f64,
            record,
        }
    }

    pub fn plant(&self) -> &str {
        self.record.plant()
    }

    pub fn is_finite(&self) -> bool {
        self.root_area_ratio.is_finite() && self.root_count_ratio.is_finite()
    }
}

/// Mean count traits over the samples retained in the count view.
#[derive(Clone, Debug, PartialEq)]
pub struct CountSummary {
    pub root_count_ratio: f64,
    pub upper_root_count: f64,
    pub bottom_root_count: f64,
    /// Frames (frame level) or plants (group level) behind the means.
    pub samples: usize,
}

/// Mean area traits over the samples retained in the area view.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaSummary {
    pub root_area_ratio: f64,
    pub upper_area: f64,
    pub bottom_area: f64,
    pub samples: usize,
}

/// Frame-level summary of one plant. Either side may be missing when all of
/// the plant's frames were dropped from that view.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantSummary {
    pub plant_path: String,
    pub count: Option<CountSummary>,
    pub area: Option<AreaSummary>,
}

/// A plant summary joined with its experimental group.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantRecord {
    pub plant_path: String,
    pub plant_name: String,
    pub group: Option<String>,
    pub count: Option<CountSummary>,
    pub area: Option<AreaSummary>,
}

impl PlantRecord {
    pub fn from_summary(summary: PlantSummary, group: Option<String>) -> Self {
        Self {
            plant_name: plant_name_from_path(&summary.plant_path).to_string(),
            plant_path: summary.plant_path,
            group,
            count: summary.count,
            area: summary.area,
        }
    }

    pub fn count_ratio(&self) -> Option<f64> {
        self.count.as_ref().map(|c| c.root_count_ratio)
    }

    pub fn area_ratio(&self) -> Option<f64> {
        self.area.as_ref().map(|a| a.root_area_ratio)
    }
}

/// Group-level summary: means over the plants retained in each view.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub count: Option<CountSummary>,
    pub area: Option<AreaSummary>,
}

/// Descriptive statistics of one ratio within a group.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; NaN for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupStatistics {
    pub group: String,
    pub root_count_ratio: Option<RatioStatistics>,
    pub root_area_ratio: Option<RatioStatistics>,
}

/// Last `/`-separated segment of a plant path.
pub fn plant_name_from_path(plant_path: &str) -> &str {
    plant_path.rsplit('/').next().unwrap_or(plant_path)
}
