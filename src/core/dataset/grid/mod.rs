//! Gridded spatio-temporal flow datasets.

mod config;
mod nyc_bike;
mod sample;
mod tests;

pub use config::GridConfig;
pub use nyc_bike::NycBikeDataset;
pub use sample::GridSample;
