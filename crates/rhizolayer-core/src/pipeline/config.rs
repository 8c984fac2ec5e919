use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryConfig;
use crate::consts::DEFAULT_GROUP_COLUMN;
use crate::filter::{FrameFilterConfig, PlantFilterConfig};
use crate::traits::TraitConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root of the scan image tree.
    pub image_folder: PathBuf,
    /// Root of the segmentation mask tree, mirroring `image_folder`.
    pub seg_folder: PathBuf,
    /// Folder receiving every output table. Created if absent.
    pub output: PathBuf,
    /// Read an existing boundary table from `output` instead of recomputing.
    #[serde(default)]
    pub reuse_boundaries: bool,
    #[serde(default)]
    pub grouping: GroupingScheme,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub traits: TraitConfig,
    #[serde(default)]
    pub frame_filter: FrameFilterConfig,
    #[serde(default)]
    pub plant_filter: PlantFilterConfig,
}

/// How plants are assigned to experimental groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GroupingScheme {
    /// Join a metadata table on `barcode` and group by `column`.
    Metadata { table: PathBuf, column: String },
    /// Group by the directory containing each plant directory.
    ParentDirectory,
}

impl Default for GroupingScheme {
    fn default() -> Self {
        Self::Metadata {
            table: PathBuf::from("metadata.csv"),
            column: DEFAULT_GROUP_COLUMN.to_string(),
        }
    }
}

impl GroupingScheme {
    /// Header used for the group column in output tables.
    pub fn column_label(&self) -> String {
        match self {
            Self::Metadata { column, .. } => column.clone(),
            Self::ParentDirectory => "parent_directory".to_string(),
        }
    }
}

impl std::fmt::Display for GroupingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metadata { table, column } => {
                write!(f, "Metadata ({} by {})", table.display(), column)
            }
            Self::ParentDirectory => write!(f, "Parent Directory"),
        }
    }
}
