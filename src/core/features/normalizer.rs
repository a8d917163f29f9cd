//! Global min-max rescaling of a flow series into `[-1, 1]`.

use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// The `(min, max)` pair observed over an entire raw series.
///
/// Consumers keep this around to map model outputs back into raw flow units.
/// The statistics cover the whole series, evaluation suffix included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRange {
    min: f64,
    max: f64,
}

impl NormalizationRange {
    /// Computes the range over every element of `series`.
    ///
    /// Fails with `NumericalDegeneracy` if `series` is empty, is constant, or
    /// has an infinite bound.
    pub fn fit<S, D>(series: &ArrayBase<S, D>) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if series.is_empty() {
            return Err(DatasetError::NumericalDegeneracy(
                "cannot normalize an empty series".to_string(),
            ));
        }

        let (min, max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));

        Self::new(min, max)
    }

    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DatasetError::NumericalDegeneracy(format!(
                "series range [{min}, {max}] is not finite"
            )));
        }
        if max <= min {
            return Err(DatasetError::NumericalDegeneracy(format!(
                "series is constant at {min}, so max - min is zero"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`, the scale needed to undo the normalization.
    pub fn diff(&self) -> f64 {
        self.max - self.min
    }

    /// Maps `min` to -1 and `max` to 1.
    pub fn normalize(&self, value: f64) -> f64 {
        (2. * value - (self.max + self.min)) / self.diff()
    }

    pub fn denormalize(&self, value: f64) -> f64 {
        (value * self.diff() + (self.max + self.min)) / 2.
    }

    pub fn normalize_array<S, D>(&self, series: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        series.mapv(|v| self.normalize(v))
    }

    pub fn denormalize_array<S, D>(&self, series: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        series.mapv(|v| self.denormalize(v))
    }
}
