//! Classification of WMO weather codes and US AQI readings for display.

use serde::Serialize;

/// Broad sky/precipitation condition for a WMO weather code.
///
/// Codes per the WMO table Open-Meteo uses:
/// - 0: clear sky
/// - 1-2: mainly clear, partly cloudy
/// - 3: overcast
/// - 45, 48: fog
/// - 51-57: drizzle (56-57 freezing)
/// - 61-65: rain, 66-67: freezing rain
/// - 71-77: snow
/// - 80-82: rain showers, 85-86: snow showers
/// - 95-99: thunderstorm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Showers,
    Thunderstorm,
}

impl WeatherCondition {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1 | 2 => WeatherCondition::PartlyCloudy,
            45 | 48 => WeatherCondition::Fog,
            51..=57 => WeatherCondition::Drizzle,
            61..=65 => WeatherCondition::Rain,
            66 | 67 => WeatherCondition::FreezingRain,
            71..=77 | 85 | 86 => WeatherCondition::Snow,
            80..=82 => WeatherCondition::Showers,
            95..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Cloudy,
        }
    }

    pub fn description(self, is_daytime: bool) -> &'static str {
        match self {
            WeatherCondition::Clear if is_daytime => "Sunny",
            WeatherCondition::Clear => "Clear",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::FreezingRain => "Freezing rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Showers => "Showers",
            WeatherCondition::Thunderstorm => "Thunderstorms",
        }
    }
}

/// US AQI category. Bands are 50 wide up to 200, then 200-299 and 300+.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AirQualityLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Highest AQI the index defines
const MAX_AQI: f64 = 999.0;

impl AirQualityLevel {
    /// `None` for readings outside `[0, 999]`.
    pub fn from_aqi(aqi: f64) -> Option<Self> {
        if aqi.is_nan() || !(0.0..=MAX_AQI).contains(&aqi) {
            return None;
        }

        let level = match (aqi / 50.0).floor() as u32 {
            0 => AirQualityLevel::Good,
            1 => AirQualityLevel::Moderate,
            2 => AirQualityLevel::UnhealthyForSensitiveGroups,
            3 => AirQualityLevel::Unhealthy,
            4 | 5 => AirQualityLevel::VeryUnhealthy,
            _ => AirQualityLevel::Hazardous,
        };
        Some(level)
    }

    pub fn description(self) -> &'static str {
        match self {
            AirQualityLevel::Good => "Good",
            AirQualityLevel::Moderate => "Moderate",
            AirQualityLevel::UnhealthyForSensitiveGroups => "Unhealthy for sensitive groups",
            AirQualityLevel::Unhealthy => "Unhealthy",
            AirQualityLevel::VeryUnhealthy => "Very unhealthy",
            AirQualityLevel::Hazardous => "Hazardous",
        }
    }
}
