//! # Great Lakes Station Core Library
//!
//! This library assembles weather, water level and air quality snapshots for
//! NOAA monitoring stations on the Great Lakes. Callers (a dashboard, the
//! bundled CLI) hand it a list of favorite station ids and receive plain
//! serializable records back.
//!
//! ## Data Flow
//! 1. **Registry**: fetch NOAA's station list once and keep the Great Lakes
//!    subset as [`StationMetadata`] keyed by station id
//! 2. **Retrieve**: for every favorite, request forecast, water level, water
//!    temperature and air quality data concurrently
//! 3. **Normalize**: canonicalize units (°F, mph, inches, feet), classify wind
//!    bearings, resample 6-minute water levels into hourly points, and trim
//!    the forecast to the next 24 hours and 7 days
//! 4. **Present**: convert to the user's preferred units only when formatting
//!
//! A station whose retrieval fails at any step is left out of the results;
//! no partial [`StationSnapshot`] is ever produced.
//!
//! ## Core Types
//! - [`RawTideSample`]: one 6-minute reading as NOAA returns it
//! - [`AggregatedTidePoint`]: an hourly averaged water level with display label
//! - [`StationSnapshot`]: the complete current + forecast record for a station

use serde::{Deserialize, Serialize};

pub mod api;
pub mod conditions;
pub mod config;
pub mod direction;
pub mod display;
pub mod forecast;
pub mod http;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod units;
pub mod water_level;

#[cfg(test)]
mod tests;

/// A single raw water level reading from NOAA's datagetter.
///
/// Readings arrive every 6 minutes. An empty `value` marks a missing reading.
///
/// # Example
/// ```
/// use lake_station_lib::RawTideSample;
///
/// let sample: RawTideSample =
///     serde_json::from_str(r#"{"t": "2024-03-16 15:48", "v": "1.124", "s": "0.003"}"#).unwrap();
/// assert_eq!(sample.timestamp, "2024-03-16 15:48");
/// assert_eq!(sample.value, "1.124");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTideSample {
    /// Local station time, `YYYY-MM-DD HH:MM`
    #[serde(rename = "t")]
    pub timestamp: String,
    /// Feet (or meters) above Low Water Datum, or `""` when missing
    #[serde(rename = "v")]
    pub value: String,
}

impl RawTideSample {
    pub fn new(timestamp: impl Into<String>, value: impl Into<String>) -> Self {
        RawTideSample {
            timestamp: timestamp.into(),
            value: value.into(),
        }
    }
}

/// An hourly water level produced by [`water_level::aggregate_to_hourly`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTidePoint {
    /// Display label such as `"6:00 pm"` or `"Mar 16, 7:00 pm"`
    pub label: String,
    /// Mean of the absorbed readings, rounded to 3 decimal places
    pub value: f64,
    /// Number of real readings averaged into `value` (always ≥ 1)
    pub sample_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Bearing in `[0, 360)`
    pub degrees: f64,
    /// One of the 16 labels in [`direction::CARDINAL_DIRECTIONS`]
    pub cardinal: String,
}

/// Current wind conditions. Speeds are always mph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindInfo {
    pub base_speed: f64,
    pub gust_speed: f64,
    pub direction: Direction,
}

/// Forecast wind: mph and a bearing in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastWind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastPoint {
    pub temperature: f64,
    pub wind: ForecastWind,
    /// WMO weather code
    pub weather_code: i32,
    pub is_daytime: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastPoint {
    /// Short weekday name, e.g. `"Sat"`
    pub date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind: ForecastWind,
    pub weather_code: i32,
    pub precipitation_chance_percent: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Registry data for one station. Built once from the station list and never
/// modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    pub city: String,
    pub state: String,
    pub coordinates: Coordinates,
}

/// Conditions at the time of retrieval, in canonical units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// °F
    pub air_temperature: f64,
    /// °F
    pub air_temperature_apparent: f64,
    /// Cloud cover, percent
    pub cloudiness: f64,
    /// Inches
    pub precipitation: f64,
    pub weather_code: i32,
    pub wind: WindInfo,
    pub is_daytime: bool,
    /// °F, `None` when the station has no water temperature sensor data
    pub water_temperature: Option<f64>,
    /// Feet above Low Water Datum
    pub tide_history: Vec<AggregatedTidePoint>,
    /// Feet
    pub visibility: f64,
    /// US AQI
    pub air_quality: f64,
}

/// The fully assembled record for one station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub id: String,
    pub metadata: StationMetadata,
    pub now: CurrentConditions,
    /// Local `HH:MM`
    pub today_sunrise: String,
    /// Local `HH:MM`
    pub today_sunset: String,
    /// The next 24 hours, starting with the hour after "now"
    pub hourly: Vec<HourlyForecastPoint>,
    /// Today plus the following 6 days
    pub daily: Vec<DailyForecastPoint>,
}
