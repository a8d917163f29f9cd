//! Train/test partitioning of windowed arrays and the POI broadcast.

use ndarray::{Array, Array3, Array4, ArrayBase, Axis, Data, Dimension};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Which side of the trailing `len_test` cut a dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Test,
}

impl Split {
    pub fn from_is_training(is_training_data: bool) -> Self {
        if is_training_data {
            Self::Train
        } else {
            Self::Test
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }

    /// Row range this split takes out of `n` windowed rows.
    pub fn rows(&self, n: usize, len_test: usize) -> std::ops::Range<usize> {
        match self {
            Self::Train => 0..n - len_test,
            Self::Test => n - len_test..n,
        }
    }
}

/// Both partitions of `n` rows must be non-empty.
pub fn check_split(n: usize, len_test: usize) -> Result<()> {
    if len_test == 0 {
        return Err(DatasetError::InvalidWindowConfig(
            "len_test must be positive or the test split is empty".to_string(),
        ));
    }
    if len_test >= n {
        return Err(DatasetError::InsufficientHistory {
            needed: len_test.saturating_add(1),
            available: n,
        });
    }
    Ok(())
}

/// Takes this split's rows of `array` along the leading axis.
///
/// The caller is expected to have validated `len_test` with `check_split`.
pub fn split_rows<S, D>(array: &ArrayBase<S, D>, split: Split, len_test: usize) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let rows = split.rows(array.len_of(Axis(0)), len_test);
    array.slice_axis(Axis(0), rows.into()).to_owned()
}

/// Rescales each POI channel into `[0, 1]` by dividing by its own maximum.
///
/// POI values are counts: a channel with a negative value, or whose maximum
/// is not a positive finite number, fails with `NumericalDegeneracy`.
pub fn scale_poi(mut poi: Array3<f64>) -> Result<Array3<f64>> {
    for (i, mut channel) in poi.outer_iter_mut().enumerate() {
        let min = channel.iter().copied().fold(f64::INFINITY, f64::min);
        let max = channel.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min < 0. {
            return Err(DatasetError::NumericalDegeneracy(format!(
                "POI channel {i} has negative value {min} and cannot be rescaled into [0, 1]"
            )));
        }
        if max <= 0. || !max.is_finite() {
            return Err(DatasetError::NumericalDegeneracy(format!(
                "POI channel {i} has maximum {max} and cannot be rescaled"
            )));
        }
        channel.mapv_inplace(|v| v / max);
    }
    Ok(poi)
}

/// Repeats the `[channel, row, col]` POI grid once per output timestep.
pub fn broadcast_poi(poi: &Array3<f64>, n: usize) -> Array4<f64> {
    let (channels, height, width) = poi.dim();
    let mut broadcast = Array4::<f64>::zeros((n, channels, height, width));
    broadcast.assign(&poi.view().insert_axis(Axis(0)));
    broadcast
}
