//! # Upstream API Contracts
//!
//! Request parameters and response shapes for the four services a station
//! snapshot is built from, plus NOAA's station list:
//!
//! - **Open-Meteo forecast** (`/v1/forecast`): current conditions, hourly and
//!   daily forecast
//! - **Open-Meteo air quality** (`/v1/air-quality`): current US AQI
//! - **NOAA Tides & Currents datagetter** (`/api/prod/datagetter`): the last 24
//!   hours of water levels and the latest water temperature
//! - **NOAA metadata API** (`/mdapi/prod/webapi/stations.json`): every station
//!
//! ## Request Parameters
//! One builder per request returns its query pairs in send order. Units
//! follow the caller's [`RequestUnits`]; NOAA times are local standard or
//! daylight time (`lst_ldt`) and Open-Meteo times are the station's local
//! time (`timezone=auto`).
//!
//! ## Response Structures
//! Only the fields the pipeline reads are modeled; everything else in the
//! payloads is ignored by serde.

use crate::forecast::{RawDailyForecast, RawHourlyForecast};
use crate::http::Query;
use crate::units::RequestUnits;
use crate::{Coordinates, RawTideSample};
use serde::{Deserialize, Serialize};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const TIDES_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";
pub const STATIONS_URL: &str =
    "https://api.tidesandcurrents.noaa.gov/mdapi/prod/webapi/stations.json";

pub const CURRENT_PARAMS: [&str; 10] = [
    "temperature_2m",
    "apparent_temperature",
    "is_day",
    "precipitation",
    "weathercode",
    "cloudcover",
    "windspeed_10m",
    "winddirection_10m",
    "windgusts_10m",
    "visibility",
];

pub const HOURLY_PARAMS: [&str; 5] = [
    "temperature_2m",
    "weathercode",
    "windspeed_10m",
    "winddirection_10m",
    "is_day",
];

pub const DAILY_PARAMS: [&str; 8] = [
    "weathercode",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunrise",
    "sunset",
    "precipitation_probability_max",
    "windspeed_10m_max",
    "winddirection_10m_dominant",
];

/// Hours of water level history requested from NOAA
pub const WATER_LEVEL_RANGE_HOURS: u32 = 24;

/// Vertical reference for Great Lakes water levels (Low Water Datum)
pub const WATER_LEVEL_DATUM: &str = "LWD";

/// Base URLs of the upstream services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast: String,
    pub air_quality: String,
    pub tides: String,
    pub stations: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            forecast: FORECAST_URL.to_string(),
            air_quality: AIR_QUALITY_URL.to_string(),
            tides: TIDES_URL.to_string(),
            stations: STATIONS_URL.to_string(),
        }
    }
}

pub fn forecast_query(coordinates: Coordinates, units: RequestUnits) -> Query {
    vec![
        ("latitude", coordinates.lat.to_string()),
        ("longitude", coordinates.lng.to_string()),
        ("timezone", "auto".to_string()),
        ("current", CURRENT_PARAMS.join(",")),
        ("hourly", HOURLY_PARAMS.join(",")),
        ("daily", DAILY_PARAMS.join(",")),
        ("temperature_unit", units.system.temperature_param().to_string()),
        ("windspeed_unit", units.wind_speed.open_meteo_param().to_string()),
        ("precipitation_unit", units.system.precipitation_param().to_string()),
    ]
}

pub fn air_quality_query(coordinates: Coordinates) -> Query {
    vec![
        ("latitude", coordinates.lat.to_string()),
        ("longitude", coordinates.lng.to_string()),
        ("current", "us_aqi".to_string()),
    ]
}

pub fn water_level_query(station_id: &str, units: RequestUnits) -> Query {
    vec![
        ("station", station_id.to_string()),
        ("product", "water_level".to_string()),
        ("range", WATER_LEVEL_RANGE_HOURS.to_string()),
        ("datum", WATER_LEVEL_DATUM.to_string()),
        ("units", units.system.noaa_param().to_string()),
        ("time_zone", "lst_ldt".to_string()),
        ("format", "json".to_string()),
    ]
}

pub fn water_temperature_query(station_id: &str, units: RequestUnits) -> Query {
    vec![
        ("station", station_id.to_string()),
        ("product", "water_temperature".to_string()),
        ("date", "latest".to_string()),
        ("units", units.system.noaa_param().to_string()),
        ("time_zone", "lst_ldt".to_string()),
        ("format", "json".to_string()),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentWeather,
    pub hourly: RawHourlyForecast,
    pub daily: RawDailyForecast,
}

/// The `current` block of a forecast response, in the requested units.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    /// Local time, `YYYY-MM-DDTHH:MM`
    pub time: String,
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub is_day: u8,
    pub precipitation: f64,
    pub weathercode: i32,
    pub cloudcover: f64,
    pub windspeed_10m: f64,
    pub winddirection_10m: f64,
    pub windgusts_10m: f64,
    pub visibility: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityResponse {
    pub current: CurrentAirQuality,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentAirQuality {
    pub us_aqi: f64,
}

/// Water level history. NOAA answers with an `error` object instead of
/// `data` when it has nothing, which fails to decode here.
#[derive(Debug, Clone, Deserialize)]
pub struct WaterLevelResponse {
    pub data: Vec<RawTideSample>,
}

/// Latest water temperature. `data` is absent for stations without a sensor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaterTemperatureResponse {
    #[serde(default)]
    pub data: Option<Vec<WaterTemperatureReading>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaterTemperatureReading {
    pub t: String,
    pub v: String,
}

impl WaterTemperatureResponse {
    /// Most recent reading, or `None` when the sensor reported nothing usable.
    pub fn latest(&self) -> Option<f64> {
        self.data
            .as_ref()?
            .last()
            .and_then(|reading| reading.v.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationListResponse {
    pub stations: Vec<NoaaStation>,
}

/// One record of NOAA's station list.
#[derive(Debug, Clone, Deserialize)]
pub struct NoaaStation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub greatlakes: bool,
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{UnitSystem, WindSpeedUnit};

    fn param<'a>(query: &'a Query, name: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_forecast_query_carries_units() {
        let units = RequestUnits {
            system: UnitSystem::Metric,
            wind_speed: WindSpeedUnit::MetersPerSecond,
        };
        let query = forecast_query(Coordinates { lat: 41.5, lng: -81.7 }, units);

        assert_eq!(param(&query, "latitude"), Some("41.5"));
        assert_eq!(param(&query, "longitude"), Some("-81.7"));
        assert_eq!(param(&query, "temperature_unit"), Some("celsius"));
        assert_eq!(param(&query, "windspeed_unit"), Some("ms"));
        assert_eq!(param(&query, "precipitation_unit"), Some("mm"));
        assert_eq!(
            param(&query, "hourly"),
            Some("temperature_2m,weathercode,windspeed_10m,winddirection_10m,is_day")
        );
    }

    #[test]
    fn test_noaa_queries() {
        let units = RequestUnits::default();

        let level = water_level_query("9063020", units);
        assert_eq!(param(&level, "product"), Some("water_level"));
        assert_eq!(param(&level, "range"), Some("24"));
        assert_eq!(param(&level, "datum"), Some("LWD"));
        assert_eq!(param(&level, "units"), Some("english"));
        assert_eq!(param(&level, "time_zone"), Some("lst_ldt"));

        let temperature = water_temperature_query("9063020", units);
        assert_eq!(param(&temperature, "product"), Some("water_temperature"));
        assert_eq!(param(&temperature, "date"), Some("latest"));
        assert_eq!(param(&temperature, "format"), Some("json"));
    }

    #[test]
    fn test_water_temperature_latest() {
        let with_data: WaterTemperatureResponse = serde_json::from_str(
            r#"{"data": [{"t": "2024-03-16 15:54", "v": "38.1", "f": "0,0,0"},
                         {"t": "2024-03-16 16:00", "v": "38.3", "f": "0,0,0"}]}"#,
        )
        .unwrap();
        assert_eq!(with_data.latest(), Some(38.3));

        let no_sensor: WaterTemperatureResponse = serde_json::from_str(
            r#"{"error": {"message": "No data was found. This product may not be offered at this station at the requested time."}}"#,
        )
        .unwrap();
        assert_eq!(no_sensor.latest(), None);

        let blank: WaterTemperatureResponse =
            serde_json::from_str(r#"{"data": [{"t": "2024-03-16 16:00", "v": ""}]}"#).unwrap();
        assert_eq!(blank.latest(), None);
    }

    #[test]
    fn test_water_level_requires_data() {
        assert!(serde_json::from_str::<WaterLevelResponse>(r#"{"error": {"message": "x"}}"#).is_err());
    }
}
