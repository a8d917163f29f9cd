mod normalizer;
mod split;
mod time_encoding;
mod window;

pub use normalizer::NormalizationRange;
pub use split::{broadcast_poi, check_split, scale_poi, split_rows, Split};
pub use time_encoding::{day_of_week, encode_time, hour_of_day};
pub use window::{extract_windows, skip_hours, Scale, ScaleSpec, Windows};

use ndarray::{s, Array4};

use crate::error::Result;

/// Everything derived from one flow series before it is split.
///
/// `time` is already trimmed to the same `len_total - skip` rows as the
/// windows.
#[derive(Debug, Clone)]
pub struct GridFeatures {
    pub normalization: NormalizationRange,
    pub windows: Windows,
    pub time: Array4<f64>,
}

impl GridFeatures {
    /// Normalizes `flow` (`[time, channel, row, col]`), encodes time with
    /// `t_period` steps per day and cuts the lag windows described by `specs`.
    pub fn build(flow: &Array4<f64>, specs: &[ScaleSpec], t_period: usize) -> Result<Self> {
        let normalization = NormalizationRange::fit(flow)?;
        let (len_total, _, height, width) = flow.dim();
        let time = encode_time(len_total, t_period, height, width)?;

        let normalized = normalization.normalize_array(flow);
        let windows = extract_windows(normalized.view(), specs)?;
        let time = time.slice(s![windows.skip.., .., .., ..]).to_owned();

        log::info!(
            "Built {} windows after skipping {} timesteps (range {} to {})",
            windows.len(),
            windows.skip,
            normalization.min(),
            normalization.max()
        );

        Ok(Self {
            normalization,
            windows,
            time,
        })
    }
}
