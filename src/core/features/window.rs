//! Lagged closeness, period and trend windows over a normalized series.

use ndarray::{s, Array4, ArrayView4};
use serde::{Deserialize, Serialize};

use crate::constants::{KEY_CLOSENESS, KEY_PERIOD, KEY_TREND};
use crate::error::{DatasetError, Result};

/// The three temporal scales a window can be drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Closeness,
    Period,
    Trend,
}

impl Scale {
    /// Ordered by the priority used when picking the warm-up length.
    pub const BY_PRIORITY: [Scale; 3] = [Scale::Trend, Scale::Period, Scale::Closeness];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Closeness => KEY_CLOSENESS,
            Self::Period => KEY_PERIOD,
            Self::Trend => KEY_TREND,
        }
    }
}

/// How many lags to take at a scale, and how many timesteps apart they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSpec {
    pub scale: Scale,
    pub len: usize,
    pub stride: usize,
}

impl ScaleSpec {
    pub fn new(scale: Scale, len: usize, stride: usize) -> Self {
        Self { scale, len, stride }
    }

    pub fn is_enabled(&self) -> bool {
        self.len > 0
    }

    /// History consumed by the oldest lag.
    pub fn horizon(&self) -> Result<usize> {
        self.len.checked_mul(self.stride).ok_or_else(|| {
            DatasetError::InvalidWindowConfig(format!(
                "{:?} horizon of {} lags at stride {} overflows",
                self.scale, self.len, self.stride
            ))
        })
    }
}

/// Number of leading timesteps that cannot be a target because some enabled
/// scale would reach before the start of the series.
///
/// In the standard setting the trend horizon dominates, then period, then
/// closeness; taking the maximum keeps every lag in bounds even when the
/// strides are not ordered that way.
pub fn skip_hours(specs: &[ScaleSpec]) -> Result<usize> {
    let enabled = specs.iter().filter(|spec| spec.is_enabled()).collect::<Vec<_>>();
    if enabled.is_empty() {
        return Err(DatasetError::InvalidWindowConfig(
            "at least one of closeness, period or trend must have a positive length".to_string(),
        ));
    }

    if let Some(spec) = enabled.iter().find(|spec| spec.stride == 0) {
        return Err(DatasetError::InvalidWindowConfig(format!(
            "{:?} has {} lags but a stride of zero",
            spec.scale, spec.len
        )));
    }

    let horizons = enabled
        .iter()
        .map(|spec| spec.horizon().map(|horizon| (spec.scale, horizon)))
        .collect::<Result<Vec<_>>>()?;

    let priority_pick = Scale::BY_PRIORITY
        .iter()
        .find_map(|&scale| horizons.iter().find(|(other, _)| *other == scale))
        .map(|&(_, horizon)| horizon)
        .unwrap_or_default();
    let skip = horizons.iter().map(|&(_, horizon)| horizon).max().unwrap_or_default();
    if skip != priority_pick {
        log::debug!("Warm-up raised from {priority_pick} to {skip} to cover every enabled scale");
    }

    Ok(skip)
}

/// The windowed view of one series.
///
/// Every array shares the leading dimension `len_total - skip`; row `i`
/// corresponds to timestep `skip + i` of the source series.
#[derive(Debug, Clone)]
pub struct Windows {
    pub skip: usize,
    pub target: Array4<f64>,
    pub closeness: Option<Array4<f64>>,
    pub period: Option<Array4<f64>>,
    pub trend: Option<Array4<f64>>,
}

impl Windows {
    pub fn get(&self, scale: Scale) -> Option<&Array4<f64>> {
        match scale {
            Scale::Closeness => self.closeness.as_ref(),
            Scale::Period => self.period.as_ref(),
            Scale::Trend => self.trend.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.target.len_of(ndarray::Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stacks the `len` lags of one scale along the channel axis, most recent
/// first. Lag `k` is the series shifted back by `stride * k` timesteps.
///
/// `skip` bounds `stride * len` below `len_total`, so the lag shifts and the
/// channel count cannot overflow.
fn stack_lags(series: &ArrayView4<f64>, spec: &ScaleSpec, skip: usize) -> Array4<f64> {
    let (len_total, features, height, width) = series.dim();
    let mut window = Array4::<f64>::zeros((len_total - skip, features * spec.len, height, width));

    for k in 1..=spec.len {
        let shift = spec.stride * k;
        let channels = (k - 1) * features..k * features;
        window
            .slice_mut(s![.., channels, .., ..])
            .assign(&series.slice(s![skip - shift..len_total - shift, .., .., ..]));
    }

    window
}

/// Cuts `series` (`[time, channel, row, col]`) into targets and lag windows.
///
/// A scale with no lags yields `None`. Fails with `InvalidWindowConfig` if no
/// scale is enabled, and with `InsufficientHistory` if the warm-up consumes
/// the whole series.
pub fn extract_windows(series: ArrayView4<f64>, specs: &[ScaleSpec]) -> Result<Windows> {
    let skip = skip_hours(specs)?;
    let len_total = series.dim().0;
    if skip >= len_total {
        return Err(DatasetError::InsufficientHistory {
            needed: skip.saturating_add(1),
            available: len_total,
        });
    }

    let mut windows = Windows {
        skip,
        target: series.slice(s![skip.., .., .., ..]).to_owned(),
        closeness: None,
        period: None,
        trend: None,
    };

    for spec in specs.iter().filter(|spec| spec.is_enabled()) {
        let window = stack_lags(&series, spec, skip);
        log::debug!("{:?} window has shape {:?}", spec.scale, window.shape());
        let slot = match spec.scale {
            Scale::Closeness => &mut windows.closeness,
            Scale::Period => &mut windows.period,
            Scale::Trend => &mut windows.trend,
        };
        *slot = Some(window);
    }

    Ok(windows)
}
