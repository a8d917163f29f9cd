//! Locating and reading the raw files behind each dataset.

use std::fs::{read_dir, File};
use std::path::{Path, PathBuf};

use ndarray::{Array3, Array4};
use ndarray_npy::ReadNpyExt;
use walkdir::WalkDir;

use crate::constants::{FLOW_DATA_FILE, POI_DATA_FILE};
use crate::error::{DatasetError, Result};

/// Returns the first directory at most `max_depth` levels below `root`
/// (`root` itself included) for which `is_data_dir` holds.
///
/// Directories are visited depth-first in file-name order, so the result is
/// stable across runs. `wanted` only describes the target in the error.
pub fn find_data_dir<P>(root: &Path, max_depth: usize, wanted: &str, is_data_dir: P) -> Result<PathBuf>
where
    P: Fn(&Path) -> bool,
{
    for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry below {}: {err}", root.display());
                continue;
            }
        };
        if entry.file_type().is_dir() && is_data_dir(entry.path()) {
            log::info!("Found {wanted} in {}", entry.path().display());
            return Ok(entry.into_path());
        }
    }

    Err(DatasetError::MissingDataFile {
        root: root.to_path_buf(),
        wanted: wanted.to_string(),
        max_depth,
    })
}

/// Whether `dir` directly contains a regular file for each of `names`.
pub fn contains_files(dir: &Path, names: &[&str]) -> bool {
    names.iter().all(|name| dir.join(name).is_file())
}

/// Whether `dir` directly contains a directory for any of `names`.
pub fn contains_any_dir(dir: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| dir.join(name).is_dir())
}

/// Locates the directory holding both the flow and POI arrays.
pub fn find_grid_dir(root: &Path, max_depth: usize) -> Result<PathBuf> {
    let wanted = [FLOW_DATA_FILE, POI_DATA_FILE];
    find_data_dir(root, max_depth, &wanted.join(" and "), |dir| contains_files(dir, &wanted))
}

/// Reads the `[time, channel, row, col]` flow array.
pub fn read_flow(path: &Path) -> Result<Array4<f64>> {
    let flow = Array4::<f64>::read_npy(File::open(path)?)?;
    log::debug!("Read flow array {:?} from {}", flow.shape(), path.display());
    Ok(flow)
}

/// Reads the `[channel, row, col]` POI array.
pub fn read_poi(path: &Path) -> Result<Array3<f64>> {
    let poi = Array3::<f64>::read_npy(File::open(path)?)?;
    log::debug!("Read POI array {:?} from {}", poi.shape(), path.display());
    Ok(poi)
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
