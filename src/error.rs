//! The error type shared by every loader in the crate.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Everything that can go wrong while building or reading a dataset.
///
/// All of these surface directly to the caller. Construction stops at the first
/// one, so a dataset is never left half-built.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not find {wanted} within {max_depth} levels below {}", .root.display())]
    MissingDataFile {
        root: PathBuf,
        wanted: String,
        max_depth: usize,
    },

    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    #[error("invalid window configuration: {0}")]
    InvalidWindowConfig(String),

    #[error("insufficient history: {needed} timesteps needed but only {available} available")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("index {index} is out of range for a dataset of {cardinality} records")]
    IndexOutOfRange { index: usize, cardinality: usize },

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    #[error("invalid bands: {0}")]
    InvalidBands(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to read npy array: {0}")]
    NpyRead(#[from] ndarray_npy::ReadNpyError),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}
