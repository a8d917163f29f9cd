//! Common imports from geoloader.

pub use crate::core::dataset::Dataset;
pub use crate::error::{DatasetError, Result};

pub use crate::core::dataset::grid::{GridConfig, GridSample, NycBikeDataset};
pub use crate::core::features::{NormalizationRange, Scale, Split};
