//! geoloader: dataset loaders that turn gridded flow arrays and satellite band
//! images into arrays ready for a training loop.
//!
//! The grid datasets slice a long hourly series of spatial frames into
//! closeness, period and trend windows, with a one-hot time encoding and a
//! static POI covariate alongside each target frame.

mod core;
mod error;

pub mod constants;
pub mod prelude;
pub mod utils;

pub use crate::core::dataset::{
    grid::{GridConfig, GridSample, NycBikeDataset},
    raster::{
        Band, Cloud38Dataset, ImageTransform, PatchPaths, SegmentationSample, TargetTransform, RGB_BANDS,
        SPECTRAL_BANDS,
    },
    Dataset,
};
pub use crate::core::features::{
    broadcast_poi, check_split, day_of_week, encode_time, extract_windows, hour_of_day, scale_poi, skip_hours,
    split_rows, GridFeatures, NormalizationRange, Scale, ScaleSpec, Split, Windows,
};
pub use error::{DatasetError, Result};
