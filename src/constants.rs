//! Hard-coded constants for geoloader and its dependents.

/// Slots in the one-hot hour-of-day block.
pub const HOURS_PER_DAY: usize = 24;

/// Slots in the one-hot day-of-week block.
pub const DAYS_PER_WEEK: usize = 7;

/// Channels of the time encoding: hour block followed by day block.
pub const TIME_CHANNELS: usize = HOURS_PER_DAY + DAYS_PER_WEEK;

/// Deepest directory level searched below a dataset root.
pub const MAX_SEARCH_DEPTH: usize = 8;

pub const FLOW_DATA_FILE: &str = "flow_data.npy";
pub const POI_DATA_FILE: &str = "poi_data.npy";

// Kept for reference; fetching is left to the caller.
pub const FLOW_DATA_URL: &str =
    "https://raw.githubusercontent.com/FIBLAB/DeepSTN/master/BikeNYC/DATA/dataBikeNYC/flow_data.npy";
pub const POI_DATA_URL: &str =
    "https://raw.githubusercontent.com/FIBLAB/DeepSTN/master/BikeNYC/DATA/dataBikeNYC/poi_data.npy";

/// Two weeks of hourly frames held out for evaluation.
pub const DEFAULT_LEN_TEST: usize = 24 * 14;
pub const DEFAULT_LEN_CLOSENESS: usize = 3;
pub const DEFAULT_LEN_PERIOD: usize = 4;
pub const DEFAULT_LEN_TREND: usize = 4;
pub const DEFAULT_T_CLOSENESS: usize = 1;
pub const DEFAULT_T_PERIOD: usize = 24;
pub const DEFAULT_T_TREND: usize = 24 * 7;

/// Output record keys.
pub const KEY_CLOSENESS: &str = "x_closeness";
pub const KEY_PERIOD: &str = "x_period";
pub const KEY_TREND: &str = "x_trend";
pub const KEY_TIME: &str = "t_data";
pub const KEY_POI: &str = "p_data";
pub const KEY_TARGET: &str = "y_data";
