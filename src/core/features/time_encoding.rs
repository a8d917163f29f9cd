//! One-hot hour-of-day and day-of-week planes.

use ndarray::{s, Array4};

use crate::constants::{DAYS_PER_WEEK, HOURS_PER_DAY, TIME_CHANNELS};
use crate::error::{DatasetError, Result};

/// Hour-of-day slot for timestep `t`.
pub fn hour_of_day(t: usize, t_period: usize) -> usize {
    t % t_period
}

/// Day-of-week slot for timestep `t`.
pub fn day_of_week(t: usize, t_period: usize) -> usize {
    (t / t_period) % DAYS_PER_WEEK
}

/// Builds the `[len_total, 31, height, width]` time encoding.
///
/// Channels `0..24` hold the hour of day and channels `24..31` the day of
/// week; each block has exactly one plane of ones per timestep. `t_period` is
/// the number of timesteps per day and must fit in the hour block.
pub fn encode_time(len_total: usize, t_period: usize, height: usize, width: usize) -> Result<Array4<f64>> {
    if t_period == 0 || t_period > HOURS_PER_DAY {
        return Err(DatasetError::InvalidWindowConfig(format!(
            "t_period must be in 1..={HOURS_PER_DAY} to index the hour block, got {t_period}"
        )));
    }

    let mut encoding = Array4::<f64>::zeros((len_total, TIME_CHANNELS, height, width));
    for (t, mut frame) in encoding.outer_iter_mut().enumerate() {
        frame
            .slice_mut(s![hour_of_day(t, t_period), .., ..])
            .fill(1.);
        frame
            .slice_mut(s![HOURS_PER_DAY + day_of_week(t, t_period), .., ..])
            .fill(1.);
    }

    log::debug!("Built time encoding with shape {:?}", encoding.shape());
    Ok(encoding)
}

#[cfg(test)]
mod tests {
    use ndarray::{s, Axis};

    use super::*;

    #[test]
    fn test_one_hot_blocks() {
        let (len_total, height, width) = (24 * 9, 3, 2);
        let encoding = encode_time(len_total, 24, height, width).unwrap();
        assert_eq!(encoding.shape(), &[len_total, TIME_CHANNELS, height, width]);

        let hours = encoding.slice(s![.., ..HOURS_PER_DAY, .., ..]).sum_axis(Axis(1));
        let days = encoding.slice(s![.., HOURS_PER_DAY.., .., ..]).sum_axis(Axis(1));
        assert!(hours.iter().all(|&v| v == 1.));
        assert!(days.iter().all(|&v| v == 1.));
    }

    #[test]
    fn test_cycles() {
        let encoding = encode_time(24 * 15, 24, 1, 1).unwrap();

        for t in [0, 1, 23, 24, 25, 167, 168, 200] {
            let frame = encoding.index_axis(Axis(0), t);
            assert_eq!(frame[[t % 24, 0, 0]], 1.);
            assert_eq!(frame[[HOURS_PER_DAY + (t / 24) % 7, 0, 0]], 1.);
        }

        // Same slots one day and one week apart.
        assert_eq!(encoding.slice(s![5, ..24, .., ..]), encoding.slice(s![29, ..24, .., ..]));
        assert_eq!(encoding.slice(s![5, .., .., ..]), encoding.slice(s![5 + 168, .., .., ..]));
    }

    #[test]
    fn test_short_period() {
        // Twelve steps per "day" only ever lights the first twelve hour slots.
        let encoding = encode_time(100, 12, 1, 1).unwrap();
        let late_hours = encoding.slice(s![.., 12..HOURS_PER_DAY, .., ..]);
        assert!(late_hours.iter().all(|&v| v == 0.));
        assert_eq!(day_of_week(95, 12), 0);
        assert_eq!(day_of_week(84, 12), 0);
        assert_eq!(day_of_week(83, 12), 6);
    }

    #[test]
    fn test_invalid_period() {
        assert!(matches!(encode_time(10, 0, 1, 1), Err(DatasetError::InvalidWindowConfig(_))));
        assert!(matches!(encode_time(10, 25, 1, 1), Err(DatasetError::InvalidWindowConfig(_))));
    }
}
