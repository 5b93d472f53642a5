//! # Forecast Extraction
//!
//! Open-Meteo returns hourly data for the whole forecast range starting at
//! local midnight today, as parallel arrays (one per variable). This module
//! slices out the next 24 hours after "now" and the first 7 days, pairing the
//! arrays up into per-hour and per-day records.
//!
//! The "now" hour is an argument rather than a clock read, so parsing is a
//! pure function of its inputs.

use crate::units::RequestUnits;
use crate::{DailyForecastPoint, ForecastWind, HourlyForecastPoint};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

pub const HOURLY_WINDOW: usize = 24;
pub const DAILY_WINDOW: usize = 7;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Upstream returned fewer entries than the forecast window needs
    #[error("forecast series `{series}` has {available} entries, {needed} required")]
    Truncated {
        series: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("invalid forecast date {0:?}")]
    Date(String),
}

/// The `hourly` block of an Open-Meteo forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHourlyForecast {
    pub temperature_2m: Vec<f64>,
    pub windspeed_10m: Vec<f64>,
    pub winddirection_10m: Vec<f64>,
    pub weathercode: Vec<i32>,
    pub is_day: Vec<u8>,
}

/// The `daily` block of an Open-Meteo forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyForecast {
    pub time: Vec<String>,
    pub weathercode: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
    /// Open-Meteo reports `null` when no probability is available
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub windspeed_10m_max: Vec<f64>,
    pub winddirection_10m_dominant: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub hourly: Vec<HourlyForecastPoint>,
    pub daily: Vec<DailyForecastPoint>,
}

/// Extract the next 24 hours and the next 7 days from raw forecast arrays.
///
/// Hourly entries start at index `now_hour + 1`, skipping the current and
/// past hours. Daily entries start at index 0 (today) and are dated with the
/// short weekday name.
///
/// # Errors
/// [`ForecastError::Truncated`] when any array is too short for its window;
/// the forecast is never silently shortened.
pub fn parse_forecast(
    hourly: &RawHourlyForecast,
    daily: &RawDailyForecast,
    now_hour: usize,
) -> Result<Forecast, ForecastError> {
    Ok(Forecast {
        hourly: parse_hourly(hourly, now_hour + 1)?,
        daily: parse_daily(daily)?,
    })
}

fn parse_hourly(
    raw: &RawHourlyForecast,
    start: usize,
) -> Result<Vec<HourlyForecastPoint>, ForecastError> {
    let temperature = window("temperature_2m", &raw.temperature_2m, start, HOURLY_WINDOW)?;
    let speed = window("windspeed_10m", &raw.windspeed_10m, start, HOURLY_WINDOW)?;
    let direction = window("winddirection_10m", &raw.winddirection_10m, start, HOURLY_WINDOW)?;
    let code = window("weathercode", &raw.weathercode, start, HOURLY_WINDOW)?;
    let is_day = window("is_day", &raw.is_day, start, HOURLY_WINDOW)?;

    Ok((0..HOURLY_WINDOW)
        .map(|hour| HourlyForecastPoint {
            temperature: temperature[hour],
            wind: ForecastWind {
                speed: speed[hour],
                direction: direction[hour],
            },
            weather_code: code[hour],
            is_daytime: is_day[hour] != 0,
        })
        .collect())
}

fn parse_daily(raw: &RawDailyForecast) -> Result<Vec<DailyForecastPoint>, ForecastError> {
    let dates = window("time", &raw.time, 0, DAILY_WINDOW)?;
    let min_temp = window("temperature_2m_min", &raw.temperature_2m_min, 0, DAILY_WINDOW)?;
    let max_temp = window("temperature_2m_max", &raw.temperature_2m_max, 0, DAILY_WINDOW)?;
    let speed = window("windspeed_10m_max", &raw.windspeed_10m_max, 0, DAILY_WINDOW)?;
    let direction = window(
        "winddirection_10m_dominant",
        &raw.winddirection_10m_dominant,
        0,
        DAILY_WINDOW,
    )?;
    let code = window("weathercode", &raw.weathercode, 0, DAILY_WINDOW)?;
    let precipitation = window(
        "precipitation_probability_max",
        &raw.precipitation_probability_max,
        0,
        DAILY_WINDOW,
    )?;

    (0..DAILY_WINDOW)
        .map(|day| {
            Ok(DailyForecastPoint {
                date: weekday_name(&dates[day])?,
                min_temp: min_temp[day],
                max_temp: max_temp[day],
                wind: ForecastWind {
                    speed: speed[day],
                    direction: direction[day],
                },
                weather_code: code[day],
                precipitation_chance_percent: precipitation[day].unwrap_or(0.0),
            })
        })
        .collect()
}

fn window<'a, T>(
    series: &'static str,
    values: &'a [T],
    start: usize,
    len: usize,
) -> Result<&'a [T], ForecastError> {
    values
        .get(start..start + len)
        .ok_or(ForecastError::Truncated {
            series,
            needed: start + len,
            available: values.len(),
        })
}

/// `"2024-03-16"` → `"Sat"`
fn weekday_name(date: &str) -> Result<String, ForecastError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|date| date.format("%a").to_string())
        .map_err(|_| ForecastError::Date(date.to_string()))
}

impl Forecast {
    /// Convert temperatures to °F and wind speeds to mph from the units the
    /// forecast was requested in.
    pub fn canonicalize(mut self, units: RequestUnits) -> Self {
        for point in &mut self.hourly {
            point.temperature = units.system.temperature_to_fahrenheit(point.temperature);
            point.wind.speed = units.wind_speed.to_mph(point.wind.speed);
        }
        for point in &mut self.daily {
            point.min_temp = units.system.temperature_to_fahrenheit(point.min_temp);
            point.max_temp = units.system.temperature_to_fahrenheit(point.max_temp);
            point.wind.speed = units.wind_speed.to_mph(point.wind.speed);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{UnitSystem, WindSpeedUnit};

    /// Two days of hourly data where every value encodes its own index.
    fn raw_hourly(hours: usize) -> RawHourlyForecast {
        RawHourlyForecast {
            temperature_2m: (0..hours).map(|h| 40.0 + h as f64).collect(),
            windspeed_10m: (0..hours).map(|h| h as f64 / 2.0).collect(),
            winddirection_10m: (0..hours).map(|h| (h * 15 % 360) as f64).collect(),
            weathercode: (0..hours).map(|h| (h % 4) as i32).collect(),
            is_day: (0..hours).map(|h| u8::from((7..19).contains(&(h % 24)))).collect(),
        }
    }

    fn raw_daily(days: usize) -> RawDailyForecast {
        RawDailyForecast {
            time: (0..days).map(|d| format!("2024-03-{:02}", 16 + d)).collect(),
            weathercode: vec![3; days],
            temperature_2m_max: (0..days).map(|d| 50.0 + d as f64).collect(),
            temperature_2m_min: (0..days).map(|d| 30.0 + d as f64).collect(),
            sunrise: (0..days).map(|d| format!("2024-03-{:02}T07:41", 16 + d)).collect(),
            sunset: (0..days).map(|d| format!("2024-03-{:02}T19:42", 16 + d)).collect(),
            precipitation_probability_max: (0..days)
                .map(|d| if d == 2 { None } else { Some(10.0 * d as f64) })
                .collect(),
            windspeed_10m_max: vec![12.0; days],
            winddirection_10m_dominant: vec![225.0; days],
        }
    }

    #[test]
    fn test_window_sizes_for_every_hour() {
        let hourly = raw_hourly(48);
        let daily = raw_daily(7);

        for now_hour in 0..23 {
            let forecast = parse_forecast(&hourly, &daily, now_hour).unwrap();
            assert_eq!(forecast.hourly.len(), HOURLY_WINDOW);
            assert_eq!(forecast.daily.len(), DAILY_WINDOW);
            assert_eq!(forecast.hourly[0].temperature, 40.0 + (now_hour + 1) as f64);
        }
    }

    #[test]
    fn test_hourly_fields_stay_in_lockstep() {
        let forecast = parse_forecast(&raw_hourly(48), &raw_daily(7), 5).unwrap();

        let first = &forecast.hourly[0];
        assert_eq!(first.temperature, 46.0);
        assert_eq!(first.wind.speed, 3.0);
        assert_eq!(first.wind.direction, 90.0);
        assert_eq!(first.weather_code, 2);
        assert!(!first.is_daytime);

        let afternoon = &forecast.hourly[8];
        assert_eq!(afternoon.temperature, 54.0);
        assert!(afternoon.is_daytime);
    }

    #[test]
    fn test_daily_dates_are_weekdays() {
        let forecast = parse_forecast(&raw_hourly(48), &raw_daily(7), 0).unwrap();
        let dates: Vec<&str> = forecast.daily.iter().map(|d| d.date.as_str()).collect();

        assert_eq!(dates, vec!["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]);
        assert_eq!(forecast.daily[1].precipitation_chance_percent, 10.0);
        assert_eq!(forecast.daily[2].precipitation_chance_percent, 0.0);
    }

    #[test]
    fn test_short_upstream_arrays_fail_loudly() {
        let err = parse_forecast(&raw_hourly(24), &raw_daily(7), 10).unwrap_err();
        assert_eq!(
            err,
            ForecastError::Truncated {
                series: "temperature_2m",
                needed: 35,
                available: 24,
            }
        );

        let err = parse_forecast(&raw_hourly(48), &raw_daily(5), 0).unwrap_err();
        assert!(matches!(err, ForecastError::Truncated { series: "time", .. }));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut daily = raw_daily(7);
        daily.time[3] = "tomorrow".to_string();

        let err = parse_forecast(&raw_hourly(48), &daily, 0).unwrap_err();
        assert_eq!(err, ForecastError::Date("tomorrow".to_string()));
    }

    #[test]
    fn test_canonicalize_metric_forecast() {
        let mut daily = raw_daily(7);
        daily.temperature_2m_max = vec![100.0; 7];
        daily.windspeed_10m_max = vec![1.609344; 7];

        let units = RequestUnits {
            system: UnitSystem::Metric,
            wind_speed: WindSpeedUnit::Kph,
        };
        let forecast = parse_forecast(&raw_hourly(48), &daily, 0)
            .unwrap()
            .canonicalize(units);

        assert_eq!(forecast.daily[0].max_temp, 212.0);
        assert!((forecast.daily[0].wind.speed - 1.0).abs() < 1e-9);
    }
}
