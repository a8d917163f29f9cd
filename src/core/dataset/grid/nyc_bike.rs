use std::path::Path;

use ndarray::{Array3, Array4, Axis};

use super::{GridConfig, GridSample};
use crate::constants::{FLOW_DATA_FILE, POI_DATA_FILE};
use crate::core::dataset::Dataset;
use crate::core::features::{
    broadcast_poi, check_split, scale_poi, split_rows, GridFeatures, NormalizationRange, Scale, Split,
};
use crate::error::{DatasetError, Result};
use crate::utils::io;

/// Hourly NYC bike in/out flows on a `21 x 12` grid, windowed the way DeepSTN
/// consumes them.
///
/// Construction normalizes the flows into `[-1, 1]` with global min/max
/// statistics, cuts closeness/period/trend windows, attaches the one-hot time
/// encoding and the rescaled POI grid, and keeps only the configured split.
/// All arrays are held in memory and never change afterwards.
///
/// ## Note on normalization
/// The min/max are taken over the whole series before splitting, so the test
/// suffix influences the scale seen by training. This matches the reference
/// preprocessing; use `normalization()` to map predictions back to raw flows.
#[derive(Debug, Clone)]
pub struct NycBikeDataset {
    name: String,
    config: GridConfig,
    normalization: NormalizationRange,
    skip_hours: usize,
    x_closeness: Option<Array4<f64>>,
    x_period: Option<Array4<f64>>,
    x_trend: Option<Array4<f64>>,
    t_data: Array4<f64>,
    p_data: Array4<f64>,
    y_data: Array4<f64>,
}

impl NycBikeDataset {
    /// Finds `flow_data.npy` and `poi_data.npy` below `root` and builds the
    /// dataset from them.
    ///
    /// # Args
    /// - `root`: directory under which the two arrays live, at most
    ///     `config.max_search_depth` levels down.
    /// - `config`: split and window parameters.
    pub fn new(root: &Path, config: &GridConfig) -> Result<Self> {
        let data_dir = io::find_grid_dir(root, config.max_search_depth)?;
        let flow = io::read_flow(&data_dir.join(FLOW_DATA_FILE))?;
        let poi = io::read_poi(&data_dir.join(POI_DATA_FILE))?;
        Self::from_arrays(flow, poi, config)
    }

    /// Builds the dataset from a `[time, channel, row, col]` flow array and a
    /// `[channel, row, col]` POI array on the same grid.
    pub fn from_arrays(flow: Array4<f64>, poi: Array3<f64>, config: &GridConfig) -> Result<Self> {
        let (_, _, height, width) = flow.dim();
        let (poi_channels, poi_height, poi_width) = poi.dim();
        if (poi_height, poi_width) != (height, width) {
            return Err(DatasetError::ShapeMismatch {
                expected: vec![poi_channels, height, width],
                found: poi.shape().to_vec(),
            });
        }

        let features = GridFeatures::build(&flow, &config.scale_specs(), config.t_period)?;
        drop(flow);

        let windows = &features.windows;
        check_split(windows.len(), config.len_test)?;

        let split = config.split;
        let len_test = config.len_test;
        let take = |array: Option<&Array4<f64>>| array.map(|a| split_rows(a, split, len_test));

        let y_data = split_rows(&windows.target, split, len_test);
        let records = y_data.len_of(Axis(0));
        let p_data = broadcast_poi(&scale_poi(poi)?, records);

        log::info!("len_data={records} ({} split)", split.name());

        Ok(Self {
            name: "nyc-bike-deepstn".to_string(),
            config: *config,
            normalization: features.normalization,
            skip_hours: windows.skip,
            x_closeness: take(windows.get(Scale::Closeness)),
            x_period: take(windows.get(Scale::Period)),
            x_trend: take(windows.get(Scale::Trend)),
            t_data: split_rows(&features.time, split, len_test),
            p_data,
            y_data,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn split(&self) -> Split {
        self.config.split
    }

    /// Range used to normalize the flows; invert predictions with it.
    pub fn normalization(&self) -> NormalizationRange {
        self.normalization
    }

    /// `max - min` of the raw flows.
    pub fn min_max_diff(&self) -> f64 {
        self.normalization.diff()
    }

    /// Leading timesteps of the raw series that never become targets.
    pub fn skip_hours(&self) -> usize {
        self.skip_hours
    }

    pub fn window(&self, scale: Scale) -> Option<&Array4<f64>> {
        match scale {
            Scale::Closeness => self.x_closeness.as_ref(),
            Scale::Period => self.x_period.as_ref(),
            Scale::Trend => self.x_trend.as_ref(),
        }
    }

    pub fn x_closeness(&self) -> Option<&Array4<f64>> {
        self.x_closeness.as_ref()
    }

    pub fn x_period(&self) -> Option<&Array4<f64>> {
        self.x_period.as_ref()
    }

    pub fn x_trend(&self) -> Option<&Array4<f64>> {
        self.x_trend.as_ref()
    }

    pub fn t_data(&self) -> &Array4<f64> {
        &self.t_data
    }

    pub fn p_data(&self) -> &Array4<f64> {
        &self.p_data
    }

    pub fn y_data(&self) -> &Array4<f64> {
        &self.y_data
    }
}

impl Dataset<GridSample> for NycBikeDataset {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn cardinality(&self) -> usize {
        self.y_data.len_of(Axis(0))
    }

    fn get(&self, index: usize) -> Result<GridSample> {
        self.check_index(index)?;

        let row = |array: &Array4<f64>| array.index_axis(Axis(0), index).to_owned();
        Ok(GridSample {
            x_closeness: self.x_closeness.as_ref().map(row),
            x_period: self.x_period.as_ref().map(row),
            x_trend: self.x_trend.as_ref().map(row),
            t_data: row(&self.t_data),
            p_data: row(&self.p_data),
            y_data: row(&self.y_data),
        })
    }
}
