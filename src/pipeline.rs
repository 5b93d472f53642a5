//! # Station Data Retrieval
//!
//! Builds a [`StationSnapshot`] for every requested station.
//!
//! ## Concurrency
//! Each station needs four independent requests: forecast, water level
//! history, latest water temperature and air quality. They are issued together
//! and joined, and every station's bundle is in flight at the same time as
//! every other station's. Everything runs on the caller's task; nothing is
//! spawned and no state is shared between stations. Results are written to the
//! output map only after a station's bundle has fully resolved.
//!
//! ## Failure Boundary
//! A station whose requests fail, or whose responses cannot be assembled, is
//! dropped from the result and logged once with its id. Other stations are not
//! affected. [`StationDataPipeline::retrieve_station_results`] exposes the
//! per-station outcome for callers that need to tell "failed" from "not
//! requested".

use crate::api::{
    air_quality_query, forecast_query, water_level_query, water_temperature_query,
    AirQualityResponse, Endpoints, ForecastResponse, WaterLevelResponse,
    WaterTemperatureResponse,
};
use crate::direction::{degrees_to_cardinal, DirectionError};
use crate::forecast::{parse_forecast, ForecastError};
use crate::http::{get_typed, FetchError, HttpClient};
use crate::units::RequestUnits;
use crate::water_level::{aggregate_to_hourly, round_to_thousandths, WaterLevelError};
use crate::{
    AggregatedTidePoint, CurrentConditions, Direction, StationMetadata, StationSnapshot, WindInfo,
};
use chrono::{NaiveDateTime, Timelike};
use futures::future::join_all;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error};

const CURRENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Why a station could not be assembled.
#[derive(Error, Debug)]
pub enum StationError {
    #[error("no metadata for station {0}")]
    MissingMetadata(String),

    #[error(transparent)]
    Upstream(#[from] FetchError),

    #[error(transparent)]
    WaterLevel(#[from] WaterLevelError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Direction(#[from] DirectionError),

    #[error("invalid current observation time {0:?}")]
    CurrentTime(String),
}

/// Outcome of retrieving one station.
#[derive(Debug)]
pub enum StationResult {
    Ready(StationSnapshot),
    Failed(StationError),
}

impl StationResult {
    pub fn snapshot(&self) -> Option<&StationSnapshot> {
        match self {
            StationResult::Ready(snapshot) => Some(snapshot),
            StationResult::Failed(_) => None,
        }
    }

    pub fn into_snapshot(self) -> Option<StationSnapshot> {
        match self {
            StationResult::Ready(snapshot) => Some(snapshot),
            StationResult::Failed(_) => None,
        }
    }
}

impl From<Result<StationSnapshot, StationError>> for StationResult {
    fn from(result: Result<StationSnapshot, StationError>) -> Self {
        match result {
            Ok(snapshot) => StationResult::Ready(snapshot),
            Err(err) => StationResult::Failed(err),
        }
    }
}

/// Retrieves and assembles station snapshots.
///
/// Endpoints and request units are fixed at construction; nothing is read
/// from ambient configuration.
pub struct StationDataPipeline<C> {
    client: C,
    endpoints: Endpoints,
    units: RequestUnits,
}

impl<C: HttpClient> StationDataPipeline<C> {
    pub fn new(client: C, endpoints: Endpoints, units: RequestUnits) -> Self {
        StationDataPipeline {
            client,
            endpoints,
            units,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Snapshots for every station that could be fully assembled.
    ///
    /// Failed stations are logged and omitted, so a missing key means either
    /// "not requested" or "failed".
    pub async fn retrieve_station_data(
        &self,
        station_ids: &[String],
        metadata: &HashMap<String, StationMetadata>,
    ) -> HashMap<String, StationSnapshot> {
        self.retrieve_station_results(station_ids, metadata)
            .await
            .into_iter()
            .filter_map(|(id, result)| result.into_snapshot().map(|snapshot| (id, snapshot)))
            .collect()
    }

    /// Per-station outcome for every requested id.
    pub async fn retrieve_station_results(
        &self,
        station_ids: &[String],
        metadata: &HashMap<String, StationMetadata>,
    ) -> HashMap<String, StationResult> {
        let bundles = station_ids.iter().map(|id| async move {
            let result = match metadata.get(id) {
                Some(station) => self.retrieve_station(id, station).await,
                None => Err(StationError::MissingMetadata(id.clone())),
            };

            if let Err(err) = &result {
                error!(station = %id, "Could not retrieve station {id} data. {err}");
            }
            (id.clone(), StationResult::from(result))
        });

        join_all(bundles).await.into_iter().collect()
    }

    /// Retrieve and assemble a single station.
    pub async fn retrieve_station(
        &self,
        id: &str,
        metadata: &StationMetadata,
    ) -> Result<StationSnapshot, StationError> {
        let coordinates = metadata.coordinates;
        let forecast_params = forecast_query(coordinates, self.units);
        let level_params = water_level_query(id, self.units);
        let temperature_params = water_temperature_query(id, self.units);
        let air_quality_params = air_quality_query(coordinates);

        let (atmosphere, water_level, water_temperature, air_quality) = futures::try_join!(
            get_typed::<_, ForecastResponse>(
                &self.client,
                "forecast",
                &self.endpoints.forecast,
                &forecast_params,
            ),
            get_typed::<_, WaterLevelResponse>(
                &self.client,
                "water level",
                &self.endpoints.tides,
                &level_params,
            ),
            get_typed::<_, WaterTemperatureResponse>(
                &self.client,
                "water temperature",
                &self.endpoints.tides,
                &temperature_params,
            ),
            get_typed::<_, AirQualityResponse>(
                &self.client,
                "air quality",
                &self.endpoints.air_quality,
                &air_quality_params,
            ),
        )?;

        let snapshot = self.assemble(
            id,
            metadata,
            atmosphere,
            water_level,
            water_temperature,
            air_quality,
        )?;
        debug!(
            station = %id,
            tide_points = snapshot.now.tide_history.len(),
            "assembled station snapshot"
        );
        Ok(snapshot)
    }

    fn assemble(
        &self,
        id: &str,
        metadata: &StationMetadata,
        atmosphere: ForecastResponse,
        water_level: WaterLevelResponse,
        water_temperature: WaterTemperatureResponse,
        air_quality: AirQualityResponse,
    ) -> Result<StationSnapshot, StationError> {
        let system = self.units.system;
        let wind_unit = self.units.wind_speed;
        let current = &atmosphere.current;

        let forecast = parse_forecast(
            &atmosphere.hourly,
            &atmosphere.daily,
            current_hour(&current.time)?,
        )?
        .canonicalize(self.units);

        let tide_history: Vec<AggregatedTidePoint> = aggregate_to_hourly(&water_level.data)?
            .into_iter()
            .map(|mut point| {
                point.value = round_to_thousandths(system.length_to_feet(point.value));
                point
            })
            .collect();

        let wind = WindInfo {
            base_speed: wind_unit.to_mph(current.windspeed_10m),
            gust_speed: wind_unit.to_mph(current.windgusts_10m),
            direction: classify_bearing(current.winddirection_10m)?,
        };

        Ok(StationSnapshot {
            id: id.to_string(),
            metadata: metadata.clone(),
            now: CurrentConditions {
                air_temperature: system.temperature_to_fahrenheit(current.temperature_2m),
                air_temperature_apparent: system
                    .temperature_to_fahrenheit(current.apparent_temperature),
                cloudiness: current.cloudcover,
                precipitation: system.precipitation_to_inches(current.precipitation),
                weather_code: current.weathercode,
                wind,
                is_daytime: current.is_day != 0,
                water_temperature: water_temperature
                    .latest()
                    .map(|temp| system.temperature_to_fahrenheit(temp)),
                tide_history,
                visibility: system.length_to_feet(current.visibility),
                air_quality: air_quality.current.us_aqi,
            },
            today_sunrise: today(&atmosphere.daily.sunrise, "sunrise")?,
            today_sunset: today(&atmosphere.daily.sunset, "sunset")?,
            hourly: forecast.hourly,
            daily: forecast.daily,
        })
    }
}

/// Hour of Open-Meteo's current observation (`YYYY-MM-DDTHH:MM`).
fn current_hour(time: &str) -> Result<usize, StationError> {
    NaiveDateTime::parse_from_str(time, CURRENT_TIME_FORMAT)
        .map(|time| time.hour() as usize)
        .map_err(|_| StationError::CurrentTime(time.to_string()))
}

/// A bearing of exactly 360° is reported by some upstream models for north.
fn classify_bearing(degrees: f64) -> Result<Direction, DirectionError> {
    let degrees = if degrees == 360.0 { 0.0 } else { degrees };
    Ok(Direction {
        degrees,
        cardinal: degrees_to_cardinal(degrees)?.to_string(),
    })
}

/// Local `HH:MM` of today's entry in a daily ISO timestamp series.
fn today(series: &[String], name: &'static str) -> Result<String, ForecastError> {
    let first = series.first().ok_or(ForecastError::Truncated {
        series: name,
        needed: 1,
        available: 0,
    })?;

    Ok(first
        .split_once('T')
        .map_or(first.as_str(), |(_, time)| time)
        .to_string())
}
