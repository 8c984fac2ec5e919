/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Left edge of the boundary strip, measured in pixels from the right border.
pub const DEFAULT_STRIP_FAR_OFFSET: usize = 200;

/// Right edge (exclusive) of the boundary strip, measured from the right border.
pub const DEFAULT_STRIP_NEAR_OFFSET: usize = 100;

/// Rows at the top of the gradient profile never considered as the boundary.
/// Tuned for crop scans; Arabidopsis scans used 200.
pub const DEFAULT_EXCLUDE_TOP: usize = 350;

/// Rows at the bottom of the gradient profile never considered as the boundary.
pub const DEFAULT_EXCLUDE_BOTTOM: usize = 550;

/// Smoothing half of the 5-tap Sobel kernel.
pub const SOBEL5_SMOOTH: [f64; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// Derivative half of the 5-tap Sobel kernel.
pub const SOBEL5_DERIV: [f64; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];

/// First mask row included in the upper area (container rim above it).
pub const DEFAULT_AREA_TOP_ROW: usize = 170;

/// Rows at the bottom of the mask excluded from the bottom area.
pub const DEFAULT_BOTTOM_MARGIN: usize = 5;

/// Half-height of the ambiguous band around the boundary.
pub const DEFAULT_THRESHOLD_AREA: usize = 50;

/// Height of the root counting bands.
pub const DEFAULT_THRESHOLD_COUNT: usize = 5;

/// Plants with a zero-bottom frame fraction below this lose those frames.
pub const DEFAULT_ZERO_BOTTOM_THRESHOLD: f64 = 0.5;

/// Absolute z-score above which a frame or plant is an outlier.
pub const DEFAULT_Z_SCORE_THRESHOLD: f64 = 2.0;

/// Metadata column holding the plant identifier.
pub const METADATA_BARCODE_COLUMN: &str = "barcode";

/// Default metadata grouping column.
pub const DEFAULT_GROUP_COLUMN: &str = "accession";

/// Boundary table file name.
pub const LAYER_INDEX_FILE: &str = "layer_index.csv";
pub const TRAITS_FILE: &str = "traits.csv";
pub const REMOVED_ZERO_UPPER_FILE: &str = "removed_0upper.csv";
pub const FILTERED_ZERO_FILE: &str = "filtered_frames_0upper_0bottom.csv";
pub const REMOVED_ZERO_BOTTOM_FILE: &str = "removed_0bottom.csv";
pub const REMOVED_INVALID_RATIO_FILE: &str = "removed_invalid_ratio.csv";
pub const FILTERED_FRAMES_COUNT_FILE: &str = "traits_filteredframes_count.csv";
pub const FILTERED_FRAMES_AREA_FILE: &str = "traits_filteredframes_area.csv";
pub const REMOVED_FRAME_OUTLIERS_COUNT_FILE: &str = "removed_outlier_frames_count.csv";
pub const REMOVED_FRAME_OUTLIERS_AREA_FILE: &str = "removed_outlier_frames_area.csv";
pub const FRAME_SUMMARY_FILE: &str = "traits_filteredframes_summary.csv";
pub const REMOVED_INCOMPLETE_PLANTS_FILE: &str = "removed_incomplete_plants.csv";
pub const REMOVED_PLANT_OUTLIERS_COUNT_FILE: &str = "removed_outlier_plants_count.csv";
pub const REMOVED_PLANT_OUTLIERS_AREA_FILE: &str = "removed_outlier_plants_area.csv";
pub const FILTERED_PLANTS_FILE: &str = "traits_filteredplants.csv";
pub const GROUP_SUMMARY_FILE: &str = "traits_filteredplants_summary.csv";
pub const GROUP_STATISTICS_FILE: &str = "traits_group_statistics.csv";
