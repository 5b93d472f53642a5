//! # Water Level Aggregation
//!
//! NOAA reports Great Lakes water levels every 6 minutes, which is far more
//! detail than an hourly chart needs. This module resamples those readings
//! into one averaged point per hour.
//!
//! ## Algorithm
//! Each real reading that is not on the top of the hour is folded into the
//! nearest hour mark, located by its position in the sequence:
//!
//! | minutes past hour | 6  | 12 | 18 | 24 | 30 | 36 | 42 | 48 | 54 |
//! |-------------------|----|----|----|----|----|----|----|----|----|
//! | index offset      | -1 | -2 | -3 | -4 | +5 | +4 | +3 | +2 | +1 |
//!
//! Readings up to :24 belong to the hour that just started; readings from :30
//! on belong to the next hour. A reading whose target would fall outside the
//! sequence is dropped. Hour marks that end up with no real readings are not
//! emitted.
//!
//! ## Labels
//! Points are labeled `h:mm a` (`"6:00 pm"`). The first point, the last point
//! and any point at midnight also carry the date (`"Mar 16, 7:00 pm"`).

use crate::{AggregatedTidePoint, RawTideSample};
use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// NOAA's native sampling cadence
const SAMPLE_INTERVAL_MINUTES: u32 = 6;

/// Steps from an off-hour reading to its hour mark, indexed by
/// `minutes_past_hour / 6 - 1`
const INDEX_OFFSETS: [isize; 9] = [-1, -2, -3, -4, 5, 4, 3, 2, 1];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const TIME_LABEL: &str = "%-I:%M %P";
const DATED_TIME_LABEL: &str = "%b %d, %-I:%M %P";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterLevelError {
    #[error("invalid water level timestamp {0:?}")]
    Timestamp(String),

    #[error("invalid water level reading {value:?} at {timestamp}")]
    Reading { timestamp: String, value: String },
}

/// Working state for one raw sample while readings are folded together.
struct Slot {
    time: NaiveDateTime,
    reading: Option<f64>,
    total: f64,
    count: u32,
}

/// Resample 6-minute water levels into hourly averages.
///
/// `samples` must be in chronological order. The result preserves that order.
///
/// # Errors
/// Fails when a timestamp is not `YYYY-MM-DD HH:MM` or a non-empty value is
/// not a number. Empty values are treated as missing readings, not errors.
///
/// # Example
/// ```
/// use lake_station_lib::{water_level::aggregate_to_hourly, RawTideSample};
///
/// let samples = vec![
///     RawTideSample::new("2024-03-16 15:48", "1.124"),
///     RawTideSample::new("2024-03-16 15:54", "1.132"),
///     RawTideSample::new("2024-03-16 16:00", "1.158"),
/// ];
///
/// let hourly = aggregate_to_hourly(&samples).unwrap();
/// assert_eq!(hourly.len(), 1);
/// assert_eq!(hourly[0].label, "Mar 16, 4:00 pm");
/// assert_eq!(hourly[0].value, 1.138);
/// assert_eq!(hourly[0].sample_count, 3);
/// ```
pub fn aggregate_to_hourly(
    samples: &[RawTideSample],
) -> Result<Vec<AggregatedTidePoint>, WaterLevelError> {
    let mut slots = samples
        .iter()
        .map(parse_sample)
        .collect::<Result<Vec<_>, _>>()?;

    for index in 0..slots.len() {
        let minute = slots[index].time.minute();
        let Some(reading) = slots[index].reading else {
            continue;
        };
        if minute == 0 {
            continue;
        }

        let Some(target) = index_offset(minute)
            .and_then(|offset| index.checked_add_signed(offset))
            .filter(|&target| target < slots.len())
        else {
            continue;
        };

        slots[target].total += reading;
        slots[target].count += 1;
    }

    let hourly: Vec<&Slot> = slots
        .iter()
        .filter(|slot| slot.count > 0 && slot.time.minute() == 0)
        .collect();
    let last = hourly.len().saturating_sub(1);

    Ok(hourly
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let is_midnight = slot.time.hour() == 0;
            let pattern = if is_midnight || index == 0 || index == last {
                DATED_TIME_LABEL
            } else {
                TIME_LABEL
            };

            AggregatedTidePoint {
                label: slot.time.format(pattern).to_string(),
                value: round_to_thousandths(slot.total / slot.count as f64),
                sample_count: slot.count,
            }
        })
        .collect())
}

/// Round to 3 decimal places so averages compare cleanly.
pub fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn parse_sample(sample: &RawTideSample) -> Result<Slot, WaterLevelError> {
    let time = NaiveDateTime::parse_from_str(sample.timestamp.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| WaterLevelError::Timestamp(sample.timestamp.clone()))?;

    let raw = sample.value.trim();
    let reading = if raw.is_empty() {
        None
    } else {
        let value = raw.parse::<f64>().map_err(|_| WaterLevelError::Reading {
            timestamp: sample.timestamp.clone(),
            value: sample.value.clone(),
        })?;
        Some(value)
    };

    Ok(Slot {
        time,
        reading,
        total: reading.unwrap_or(0.0),
        count: u32::from(reading.is_some()),
    })
}

/// Offset from an off-hour reading to its hour mark. `None` for minutes that
/// are not on the 6-minute grid.
fn index_offset(minute: u32) -> Option<isize> {
    if minute == 0 || minute % SAMPLE_INTERVAL_MINUTES != 0 {
        return None;
    }
    INDEX_OFFSETS
        .get((minute / SAMPLE_INTERVAL_MINUTES - 1) as usize)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(raw: &[(&str, &str)]) -> Vec<RawTideSample> {
        raw.iter()
            .map(|(t, v)| RawTideSample::new(*t, *v))
            .collect()
    }

    #[test]
    fn test_index_offsets() {
        assert_eq!(index_offset(6), Some(-1));
        assert_eq!(index_offset(24), Some(-4));
        assert_eq!(index_offset(30), Some(5));
        assert_eq!(index_offset(54), Some(1));
        assert_eq!(index_offset(0), None);
        assert_eq!(index_offset(15), None);
    }

    #[test]
    fn test_readings_past_sequence_edges_are_dropped() {
        let hourly = aggregate_to_hourly(&samples(&[
            ("2024-03-16 10:54", "9.0"),
            ("2024-03-16 11:00", "1.0"),
            // would belong to 12:00, which is not in the sequence
            ("2024-03-16 11:30", "4.0"),
        ]))
        .unwrap();

        assert_eq!(hourly.len(), 1);
        assert_eq!(hourly[0].value, 5.0);
        assert_eq!(hourly[0].sample_count, 2);
    }

    #[test]
    fn test_leading_off_hour_reading_is_dropped() {
        let hourly = aggregate_to_hourly(&samples(&[
            ("2024-03-16 10:06", "3.0"),
            ("2024-03-16 10:12", "3.0"),
        ]))
        .unwrap();

        assert!(hourly.is_empty());
    }

    #[test]
    fn test_midnight_points_carry_the_date() {
        let hourly = aggregate_to_hourly(&samples(&[
            ("2024-03-16 23:00", "1.0"),
            ("2024-03-17 00:00", "2.0"),
            ("2024-03-17 01:00", "3.0"),
        ]))
        .unwrap();

        let labels: Vec<&str> = hourly.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Mar 16, 11:00 pm", "Mar 17, 12:00 am", "Mar 17, 1:00 am"]
        );
    }

    #[test]
    fn test_midnight_absorbs_both_sides() {
        let hourly = aggregate_to_hourly(&samples(&[
            ("2024-03-16 23:48", "1.0"),
            ("2024-03-16 23:54", "1.0"),
            ("2024-03-17 00:00", "2.0"),
            ("2024-03-17 00:06", "3.0"),
        ]))
        .unwrap();

        assert_eq!(
            hourly,
            vec![AggregatedTidePoint {
                label: "Mar 17, 12:00 am".to_string(),
                value: 1.75,
                sample_count: 4,
            }]
        );
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let err = aggregate_to_hourly(&samples(&[("16:00", "1.0")])).unwrap_err();
        assert_eq!(err, WaterLevelError::Timestamp("16:00".to_string()));

        let err = aggregate_to_hourly(&samples(&[("2024-03-16 16:00", "abc")])).unwrap_err();
        assert!(matches!(err, WaterLevelError::Reading { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_to_hourly(&[]).unwrap().is_empty());
    }
}
