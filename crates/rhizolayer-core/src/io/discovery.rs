use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RhizoError};

/// One discovered scan image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSource {
    /// Path relative to the image folder, `/`-separated.
    pub image_name: String,
    /// Directory holding the image, including the image folder prefix.
    pub plant: String,
    /// File stem of the image.
    pub frame: String,
}

impl FrameSource {
    pub fn image_path(&self, image_folder: &Path) -> PathBuf {
        image_folder.join(&self.image_name)
    }

    /// The mask mirrors the image tree under the segmentation folder.
    pub fn mask_path(&self, seg_folder: &Path) -> PathBuf {
        seg_folder.join(&self.image_name)
    }
}

/// Recursively find `.png`/`.PNG` images under `image_folder`, skipping
/// hidden files. Results are sorted by relative path.
pub fn discover_images(image_folder: &Path) -> Result<Vec<FrameSource>> {
    if !image_folder.is_dir() {
        return Err(RhizoError::MissingInput(image_folder.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(image_folder) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('.')
            || !(file_name.ends_with(".png") || file_name.ends_with(".PNG"))
        {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(image_folder)
            .map_err(|e| RhizoError::Pipeline(e.to_string()))?;
        let plant = entry
            .path()
            .parent()
            .map(to_slash_string)
            .unwrap_or_default();
        let frame = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        sources.push(FrameSource {
            image_name: to_slash_string(relative),
            plant,
            frame,
        });
    }

    sources.sort_by(|a, b| a.image_name.cmp(&b.image_name));
    Ok(sources)
}

fn to_slash_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
