use std::collections::BTreeMap;

use ndarray::Array3;

use crate::constants::{KEY_POI, KEY_TARGET, KEY_TIME};
use crate::core::features::Scale;

/// One output timestep of a grid dataset.
///
/// Each array is `[channel, row, col]`. A scale configured with zero lags has
/// no window at all.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSample {
    pub x_closeness: Option<Array3<f64>>,
    pub x_period: Option<Array3<f64>>,
    pub x_trend: Option<Array3<f64>>,
    pub t_data: Array3<f64>,
    pub p_data: Array3<f64>,
    pub y_data: Array3<f64>,
}

impl GridSample {
    pub fn window(&self, scale: Scale) -> Option<&Array3<f64>> {
        match scale {
            Scale::Closeness => self.x_closeness.as_ref(),
            Scale::Period => self.x_period.as_ref(),
            Scale::Trend => self.x_trend.as_ref(),
        }
    }

    /// The record as a keyed mapping; keys of absent windows are left out.
    pub fn into_map(self) -> BTreeMap<&'static str, Array3<f64>> {
        let windows = [
            (Scale::Closeness, self.x_closeness),
            (Scale::Period, self.x_period),
            (Scale::Trend, self.x_trend),
        ];

        windows
            .into_iter()
            .filter_map(|(scale, window)| window.map(|w| (scale.key(), w)))
            .chain([(KEY_TIME, self.t_data), (KEY_POI, self.p_data), (KEY_TARGET, self.y_data)])
            .collect()
    }
}
