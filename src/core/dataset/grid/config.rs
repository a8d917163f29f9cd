use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_LEN_CLOSENESS, DEFAULT_LEN_PERIOD, DEFAULT_LEN_TEST, DEFAULT_LEN_TREND, DEFAULT_T_CLOSENESS,
    DEFAULT_T_PERIOD, DEFAULT_T_TREND, MAX_SEARCH_DEPTH,
};
use crate::core::features::{Scale, ScaleSpec, Split};
use crate::error::Result;

/// Construction parameters for a grid flow dataset.
///
/// Lengths count lags and `t_*` fields are strides in timesteps (hours for
/// the bike data). Missing fields in a JSON config take their defaults. The
/// split may also be given as `"is_training_data": true | false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    #[serde(alias = "is_training_data", deserialize_with = "split_or_flag")]
    pub split: Split,
    pub len_test: usize,
    pub len_closeness: usize,
    pub len_period: usize,
    pub len_trend: usize,
    pub t_closeness: usize,
    pub t_period: usize,
    pub t_trend: usize,
    pub max_search_depth: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SplitOrFlag {
    Split(Split),
    Flag(bool),
}

fn split_or_flag<'de, D>(deserializer: D) -> std::result::Result<Split, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SplitOrFlag::deserialize(deserializer)? {
        SplitOrFlag::Split(split) => split,
        SplitOrFlag::Flag(is_training_data) => Split::from_is_training(is_training_data),
    })
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            split: Split::Train,
            len_test: DEFAULT_LEN_TEST,
            len_closeness: DEFAULT_LEN_CLOSENESS,
            len_period: DEFAULT_LEN_PERIOD,
            len_trend: DEFAULT_LEN_TREND,
            t_closeness: DEFAULT_T_CLOSENESS,
            t_period: DEFAULT_T_PERIOD,
            t_trend: DEFAULT_T_TREND,
            max_search_depth: MAX_SEARCH_DEPTH,
        }
    }
}

impl GridConfig {
    pub fn new(is_training_data: bool) -> Self {
        Self::default().with_split(Split::from_is_training(is_training_data))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.split = split;
        self
    }

    pub fn with_len_test(mut self, len_test: usize) -> Self {
        self.len_test = len_test;
        self
    }

    pub fn with_closeness(mut self, len: usize, stride: usize) -> Self {
        self.len_closeness = len;
        self.t_closeness = stride;
        self
    }

    pub fn with_period(mut self, len: usize, stride: usize) -> Self {
        self.len_period = len;
        self.t_period = stride;
        self
    }

    pub fn with_trend(mut self, len: usize, stride: usize) -> Self {
        self.len_trend = len;
        self.t_trend = stride;
        self
    }

    pub fn with_max_search_depth(mut self, max_search_depth: usize) -> Self {
        self.max_search_depth = max_search_depth;
        self
    }

    pub fn is_training_data(&self) -> bool {
        self.split == Split::Train
    }

    pub fn scale_specs(&self) -> [ScaleSpec; 3] {
        [
            ScaleSpec::new(Scale::Closeness, self.len_closeness, self.t_closeness),
            ScaleSpec::new(Scale::Period, self.len_period, self.t_period),
            ScaleSpec::new(Scale::Trend, self.len_trend, self.t_trend),
        ]
    }
}
