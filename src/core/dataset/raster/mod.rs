//! Satellite band images paired with segmentation masks.

mod bands;
mod cloud38;

pub use bands::{Band, RGB_BANDS, SPECTRAL_BANDS};
pub use cloud38::{Cloud38Dataset, ImageTransform, PatchPaths, SegmentationSample, TargetTransform};
