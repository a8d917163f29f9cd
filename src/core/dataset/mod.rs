mod _dataset;

pub mod grid;
pub mod raster;

pub use _dataset::Dataset;
