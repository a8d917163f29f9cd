pub mod dataset;
pub mod features;
