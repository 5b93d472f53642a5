//! # Presentation Formatting
//!
//! Snapshots hold canonical units only. This module is the one place where
//! values are converted into the user's preferred units, rounded and labeled
//! for display. Nothing here mutates a snapshot.

use crate::conditions::{AirQualityLevel, WeatherCondition};
use crate::units::{feet_to_meters, UnitSystem, WindSpeedUnit};
use crate::{DailyForecastPoint, StationSnapshot, WindInfo};

const FEET_PER_MILE: f64 = 5280.0;

/// Round half away from zero, so `-0.4` shows as `0` rather than `-0`.
fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// `"70 °F"`, `"21 °C"`, or `"--"` when there is no reading.
pub fn format_temperature(fahrenheit: Option<f64>, system: UnitSystem) -> String {
    match fahrenheit {
        Some(temp) => format!(
            "{} {}",
            whole(system.temperature_from_fahrenheit(temp)),
            system.temperature_label()
        ),
        None => "--".to_string(),
    }
}

/// `"12 mph NNE (gusts 18)"`
pub fn format_wind(wind: &WindInfo, unit: WindSpeedUnit) -> String {
    format!(
        "{} {} {} (gusts {})",
        whole(unit.from_mph(wind.base_speed)),
        unit.label(),
        wind.direction.cardinal,
        whole(unit.from_mph(wind.gust_speed))
    )
}

/// Visibility in miles or kilometers with one decimal.
pub fn format_visibility(feet: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::English => format!("{:.1} miles", feet / FEET_PER_MILE),
        UnitSystem::Metric => format!("{:.1} km", feet_to_meters(feet) / 1000.0),
    }
}

/// Water level above Low Water Datum.
pub fn format_water_level(feet: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::English => format!("{feet:.2} ft"),
        UnitSystem::Metric => format!("{:.2} m", feet_to_meters(feet)),
    }
}

/// `"72 / 55 °F"`
pub fn format_daily_temps(day: &DailyForecastPoint, system: UnitSystem) -> String {
    format!(
        "{} / {} {}",
        whole(system.temperature_from_fahrenheit(day.max_temp)),
        whole(system.temperature_from_fahrenheit(day.min_temp)),
        system.temperature_label()
    )
}

/// `"42 (Good)"`
pub fn format_air_quality(aqi: f64) -> String {
    match AirQualityLevel::from_aqi(aqi) {
        Some(level) => format!("{} ({})", whole(aqi), level.description()),
        None => format!("{} (invalid)", whole(aqi)),
    }
}

/// Multi-line text summary of one station in the given units.
pub fn station_summary(
    snapshot: &StationSnapshot,
    system: UnitSystem,
    wind_unit: WindSpeedUnit,
) -> String {
    let now = &snapshot.now;
    let condition = WeatherCondition::from_code(now.weather_code).description(now.is_daytime);

    let mut lines = vec![
        format!(
            "{}, {} ({})",
            snapshot.metadata.city, snapshot.metadata.state, snapshot.id
        ),
        format!(
            "  Air          {} (feels like {}), {}",
            format_temperature(Some(now.air_temperature), system),
            format_temperature(Some(now.air_temperature_apparent), system),
            condition
        ),
        format!("  Wind         {}", format_wind(&now.wind, wind_unit)),
        format!(
            "  Water        {}",
            format_temperature(now.water_temperature, system)
        ),
    ];

    if let Some(latest) = now.tide_history.last() {
        lines.push(format!(
            "  Water level  {} at {}",
            format_water_level(latest.value, system),
            latest.label
        ));
    }

    lines.push(format!(
        "  Visibility   {}",
        format_visibility(now.visibility, system)
    ));
    lines.push(format!(
        "  Air quality  {}",
        format_air_quality(now.air_quality)
    ));
    lines.push(format!(
        "  Sun          {} - {}",
        snapshot.today_sunrise, snapshot.today_sunset
    ));

    let week: Vec<String> = snapshot
        .daily
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let label = if index == 0 { "Today" } else { day.date.as_str() };
            format!("{label} {}", format_daily_temps(day, system))
        })
        .collect();
    if !week.is_empty() {
        lines.push(format!("  Week         {}", week.join(", ")));
    }

    lines.join("\n")
}
