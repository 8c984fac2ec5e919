//! CSV persistence of pipeline tables.

use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::error::{Result, RhizoError};
use crate::records::{
    AreaSummary, CountSummary, GroupStatistics, GroupSummary, ImageRecord, PlantRecord,
    PlantSummary, RatioRecord, RatioStatistics, TraitRecord,
};

/// Column names that depend on the run configuration.
#[derive(Clone, Debug)]
pub struct ColumnLabels {
    /// Header of the grouping attribute column.
    pub group: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            group: "group".to_string(),
        }
    }
}

/// A row type that can be written as one CSV record.
pub trait TableRow {
    fn header(labels: &ColumnLabels) -> Vec<String>;
    fn fields(&self) -> Vec<String>;
}

/// Write `rows` to `path` with a header line. An empty slice still produces
/// the header.
pub fn write_table<R: TableRow>(path: &Path, rows: &[R], labels: &ColumnLabels) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(R::header(labels))?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}

/// Read a boundary table written by [`write_table`].
pub fn read_image_records(path: &Path) -> Result<Vec<ImageRecord>> {
    if !path.is_file() {
        return Err(RhizoError::MissingInput(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<ImageRecord>, _>>()?;
    Ok(records)
}

fn float(v: f64) -> String {
    v.to_string()
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

const IMAGE_COLUMNS: [&str; 4] = ["image_name", "plant", "frame", "layer_ind"];
const TRAIT_COLUMNS: [&str; 4] = [
    "upper_area",
    "bottom_area",
    "upper_root_count",
    "bottom_root_count",
];
const COUNT_COLUMNS: [&str; 4] = [
    "root_count_ratio",
    "upper_root_count",
    "bottom_root_count",
    "frame_number_count",
];
const AREA_COLUMNS: [&str; 4] = [
    "root_area_ratio",
    "upper_area",
    "bottom_area",
    "frame_number_area",
];

fn count_fields(c: Option<&CountSummary>) -> [String; 4] {
    [
        opt(c.map(|c| c.root_count_ratio)),
        opt(c.map(|c| c.upper_root_count)),
        opt(c.map(|c| c.bottom_root_count)),
        opt(c.map(|c| c.samples)),
    ]
}

fn area_fields(a: Option<&AreaSummary>) -> [String; 4] {
    [
        opt(a.map(|a| a.root_area_ratio)),
        opt(a.map(|a| a.upper_area)),
        opt(a.map(|a| a.bottom_area)),
        opt(a.map(|a| a.samples)),
    ]
}

impl TableRow for ImageRecord {
    fn header(_: &ColumnLabels) -> Vec<String> {
        headers(&IMAGE_COLUMNS)
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.image_name.clone(),
            self.plant.clone(),
            self.frame.clone(),
            self.boundary_row.to_string(),
        ]
    }
}

impl TableRow for TraitRecord {
    fn header(labels: &ColumnLabels) -> Vec<String> {
        let mut h = ImageRecord::header(labels);
        h.extend(headers(&TRAIT_COLUMNS));
        h
    }

    fn fields(&self) -> Vec<String> {
        let t = &self.traits;
        let mut f = self.image.fields();
        f.extend([
            t.upper_area.to_string(),
            t.bottom_area.to_string(),
            t.upper_root_count.to_string(),
            t.bottom_root_count.to_string(),
        ]);
        f
    }
}

impl TableRow for RatioRecord {
    fn header(labels: &ColumnLabels) -> Vec<String> {
        let mut h = TraitRecord::header(labels);
        h.extend(headers(&["root_area_ratio", "root_count_ratio"]));
        h
    }

    fn fields(&self) -> Vec<String> {
        let mut f = self.record.fields();
        f.push(float(self.root_area_ratio));
        f.push(float(self.root_count_ratio));
        f
    }
}

impl TableRow for PlantSummary {
    fn header(_: &ColumnLabels) -> Vec<String> {
        let mut h = headers(&["plant_path"]);
        h.extend(headers(&COUNT_COLUMNS));
        h.extend(headers(&AREA_COLUMNS));
        h
    }

    fn fields(&self) -> Vec<String> {
        let mut f = vec![self.plant_path.clone()];
        f.extend(count_fields(self.count.as_ref()));
        f.extend(area_fields(self.area.as_ref()));
        f
    }
}

impl TableRow for PlantRecord {
    fn header(labels: &ColumnLabels) -> Vec<String> {
        let mut h = vec![
            labels.group.clone(),
            "plant_name".to_string(),
            "plant_path".to_string(),
        ];
        h.extend(headers(&COUNT_COLUMNS));
        h.extend(headers(&AREA_COLUMNS));
        h
    }

    fn fields(&self) -> Vec<String> {
        let mut f = vec![
            self.group.clone().unwrap_or_default(),
            self.plant_name.clone(),
            self.plant_path.clone(),
        ];
        f.extend(count_fields(self.count.as_ref()));
        f.extend(area_fields(self.area.as_ref()));
        f
    }
}

impl TableRow for GroupSummary {
    fn header(labels: &ColumnLabels) -> Vec<String> {
        let mut h = vec![labels.group.clone()];
        h.extend(headers(&[
            "root_count_ratio_mean",
            "upper_root_count_mean",
            "bottom_root_count_mean",
            "plant_number_count",
            "root_area_ratio_mean",
            "upper_area_mean",
            "bottom_area_mean",
            "plant_number_area",
        ]));
        h
    }

    fn fields(&self) -> Vec<String> {
        let mut f = vec![self.group.clone()];
        f.extend(count_fields(self.count.as_ref()));
        f.extend(area_fields(self.area.as_ref()));
        f
    }
}

impl TableRow for GroupStatistics {
    fn header(labels: &ColumnLabels) -> Vec<String> {
        let mut h = vec![labels.group.clone()];
        for ratio in ["root_count_ratio", "root_area_ratio"] {
            for stat in ["mean", "median", "std", "min", "max"] {
                h.push(format!("{ratio}_{stat}"));
            }
        }
        h
    }

    fn fields(&self) -> Vec<String> {
        let mut f = vec![self.group.clone()];
        f.extend(statistics_fields(self.root_count_ratio.as_ref()));
        f.extend(statistics_fields(self.root_area_ratio.as_ref()));
        f
    }
}

fn statistics_fields(s: Option<&RatioStatistics>) -> [String; 5] {
    let field = |get: fn(&RatioStatistics) -> f64| {
        s.map(get)
            .filter(|v| v.is_finite())
            .map(float)
            .unwrap_or_default()
    };
    [
        field(|s| s.mean),
        field(|s| s.median),
        field(|s| s.std),
        field(|s| s.min),
        field(|s| s.max),
    ]
}
