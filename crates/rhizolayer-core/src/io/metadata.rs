use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::consts::METADATA_BARCODE_COLUMN;
use crate::error::{Result, RhizoError};

/// Experimental design table: plant barcode -> grouping attribute.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    /// Name of the grouping column the values were read from.
    pub column: String,
    groups: HashMap<String, String>,
}

impl Metadata {
    /// Build from `(barcode, group)` pairs. The first pair for a barcode wins;
    /// empty group values are treated as missing.
    pub fn from_pairs(
        column: impl Into<String>,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut groups = HashMap::new();
        let mut duplicates = 0usize;
        for (barcode, group) in pairs {
            if group.is_empty() {
                continue;
            }
            if groups.contains_key(&barcode) {
                duplicates += 1;
                continue;
            }
            groups.insert(barcode, group);
        }
        if duplicates > 0 {
            warn!(duplicates, "Metadata repeats barcodes; keeping the first row of each");
        }
        Self {
            column: column.into(),
            groups,
        }
    }

    /// Read the `barcode` column and `column` from a CSV file with headers.
    pub fn load(path: &Path, column: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(RhizoError::MissingInput(path.to_path_buf()));
        }
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| RhizoError::MissingColumn(name.to_string()))
        };
        let barcode_idx = position(METADATA_BARCODE_COLUMN)?;
        let group_idx = position(column)?;

        let mut pairs = Vec::new();
        for record in reader.records() {
            let record = record?;
            let barcode = record.get(barcode_idx).unwrap_or_default().trim();
            let group = record.get(group_idx).unwrap_or_default().trim();
            pairs.push((barcode.to_string(), group.to_string()));
        }
        debug!(rows = pairs.len(), column, "Loaded metadata");

        Ok(Self::from_pairs(column, pairs))
    }

    pub fn group_of(&self, barcode: &str) -> Option<&str> {
        self.groups.get(barcode).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
