use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use ndarray::{Array2, Array3, Axis};

use super::Band;
use crate::core::dataset::Dataset;
use crate::error::{DatasetError, Result};
use crate::utils::io;

const GT_FOLDER: &str = "train_gt";
const GT_NAME: &str = "gt";

pub type ImageTransform = Box<dyn Fn(Array3<f32>) -> Array3<f32> + Send + Sync>;
pub type TargetTransform = Box<dyn Fn(Array2<i64>) -> Array2<i64> + Send + Sync>;

/// One scene patch: the selected bands stacked as `[band, row, col]` and the
/// cloud mask as `[row, col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationSample {
    pub image: Array3<f32>,
    pub label: Array2<i64>,
}

/// Paths to one patch's band images, in the order the bands were selected,
/// and to its ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchPaths {
    pub bands: Vec<PathBuf>,
    pub gt: PathBuf,
}

/// The 38-Cloud training patches for cloud segmentation.
///
/// Only the file index is built eagerly; each `get` decodes the patch's band
/// images and mask from disk.
pub struct Cloud38Dataset {
    bands: Vec<Band>,
    patches: Vec<PatchPaths>,
    transform: Option<ImageTransform>,
    target_transform: Option<TargetTransform>,
}

impl fmt::Debug for Cloud38Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cloud38Dataset")
            .field("bands", &self.bands)
            .field("patches", &self.patches.len())
            .field("transform", &self.transform.is_some())
            .field("target_transform", &self.target_transform.is_some())
            .finish()
    }
}

impl Cloud38Dataset {
    /// Indexes the patches below `root` for the given `bands`.
    ///
    /// The data directory is the first one, at most `max_depth` levels down,
    /// with a `train_red`, `train_green` or `train_blue` folder. Patches are
    /// enumerated from the first selected band's folder; sibling bands and the
    /// mask are found by swapping the colour prefix of each file name.
    pub fn new(root: &Path, bands: &[Band], max_depth: usize) -> Result<Self> {
        let Some(&first) = bands.first() else {
            return Err(DatasetError::InvalidBands("no bands were selected".to_string()));
        };

        let wanted = [Band::Red.folder(), Band::Green.folder(), Band::Blue.folder()];
        let data_dir = io::find_data_dir(root, max_depth, &wanted.join(" or "), |dir| {
            io::contains_any_dir(dir, &wanted)
        })?;

        let first_dir = data_dir.join(first.folder());
        if !first_dir.is_dir() {
            return Err(DatasetError::MissingDataFile {
                root: data_dir,
                wanted: first.folder().to_string(),
                max_depth,
            });
        }

        let files = io::list_files(&first_dir)?;
        let patches = match files.first() {
            Some(head) => {
                let prefix = colour_prefix(head);
                files
                    .iter()
                    .map(|file| patch_paths(&data_dir, bands, file, &prefix))
                    .collect()
            }
            None => Vec::new(),
        };

        log::info!(
            "Indexed {} patches with bands {:?} in {}",
            patches.len(),
            bands,
            data_dir.display()
        );

        Ok(Self {
            bands: bands.to_vec(),
            patches,
            transform: None,
            target_transform: None,
        })
    }

    pub fn with_transform(mut self, transform: ImageTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_target_transform(mut self, target_transform: TargetTransform) -> Self {
        self.target_transform = Some(target_transform);
        self
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn patches(&self) -> &[PatchPaths] {
        &self.patches
    }
}

impl Dataset<SegmentationSample> for Cloud38Dataset {
    fn name(&self) -> String {
        "38-cloud".to_string()
    }

    fn cardinality(&self) -> usize {
        self.patches.len()
    }

    fn get(&self, index: usize) -> Result<SegmentationSample> {
        self.check_index(index)?;
        let patch = &self.patches[index];

        let planes = patch
            .bands
            .iter()
            .map(|path| read_band(path))
            .collect::<Result<Vec<_>>>()?;
        let mut image = stack_planes(&planes)?;
        let mut label = read_mask(&patch.gt)?;

        if let Some(transform) = &self.transform {
            image = transform(image);
        }
        if let Some(target_transform) = &self.target_transform {
            label = target_transform(label);
        }

        Ok(SegmentationSample { image, label })
    }
}

/// Text before the first `_` of a file name, e.g. `red` in `red_patch_1.TIF`.
fn colour_prefix(path: &Path) -> String {
    let name = file_name(path);
    name.split('_').next().unwrap_or_default().to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn patch_paths(data_dir: &Path, bands: &[Band], file: &Path, prefix: &str) -> PatchPaths {
    let name = file_name(file);
    let sibling = |folder: &str, replacement: &str| data_dir.join(folder).join(name.replacen(prefix, replacement, 1));

    PatchPaths {
        bands: bands.iter().map(|band| sibling(band.folder(), band.name())).collect(),
        gt: sibling(GT_FOLDER, GT_NAME),
    }
}

/// Raw single-channel intensities; 8- and 16-bit images keep their values.
///
/// Any other pixel layout fails with `InvalidBands` rather than being
/// converted.
fn read_band(path: &Path) -> Result<Array2<f32>> {
    let plane = match image::open(path)? {
        DynamicImage::ImageLuma8(buffer) => {
            let (width, height) = buffer.dimensions();
            Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
                f32::from(buffer.get_pixel(c as u32, r as u32)[0])
            })
        }
        DynamicImage::ImageLuma16(buffer) => {
            let (width, height) = buffer.dimensions();
            Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
                f32::from(buffer.get_pixel(c as u32, r as u32)[0])
            })
        }
        other => {
            return Err(DatasetError::InvalidBands(format!(
                "{} is {:?}, expected a single-channel 8- or 16-bit image",
                path.display(),
                other.color()
            )));
        }
    };
    Ok(plane)
}

fn read_mask(path: &Path) -> Result<Array2<i64>> {
    let buffer = image::open(path)?.into_luma8();
    let (width, height) = buffer.dimensions();
    Ok(Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        i64::from(buffer.get_pixel(c as u32, r as u32)[0])
    }))
}

fn stack_planes(planes: &[Array2<f32>]) -> Result<Array3<f32>> {
    let (height, width) = planes.first().map(|p| p.dim()).unwrap_or((0, 0));
    let mut image = Array3::<f32>::zeros((planes.len(), height, width));
    for (mut slot, plane) in image.axis_iter_mut(Axis(0)).zip(planes.iter()) {
        if plane.dim() != (height, width) {
            return Err(DatasetError::ShapeMismatch {
                expected: vec![height, width],
                found: plane.shape().to_vec(),
            });
        }
        slot.assign(plane);
    }
    Ok(image)
}
