//! # Configuration Management
//!
//! This module handles loading and saving the user's settings from
//! `lake-stations.toml`: favorite stations, unit preferences and upstream API
//! endpoints. The settings are handed explicitly to the registry and the
//! retrieval pipeline; nothing in the core reads them from global state.

use crate::api::Endpoints;
use crate::units::{RequestUnits, UnitSystem, WindSpeedUnit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "lake-stations.toml";

/// Application configuration loaded from lake-stations.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Favorite stations and which one is in view
    pub stations: StationsConfig,
    /// Unit preferences
    pub units: UnitPreferences,
    /// Display toggles consumed by front ends
    pub display: DisplayConfig,
    /// Upstream API endpoints and request limits
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StationsConfig {
    /// NOAA station ids in the order the user arranged them
    pub favorites: Vec<String>,
    /// Index into `favorites` of the station being viewed
    pub viewing_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitPreferences {
    /// `"english"` or `"metric"`
    pub general: UnitSystem,
    /// `"mph"`, `"km/h"`, `"m/s"` or `"kn"`
    pub wind_speed: WindSpeedUnit,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub wave_animation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(flatten)]
    pub endpoints: Endpoints,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for StationsConfig {
    fn default() -> Self {
        StationsConfig {
            // Cleveland, OH and Chicago, IL
            favorites: vec!["9063063".to_string(), "9087044".to_string()],
            viewing_index: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            wave_animation: true,
        }
    }
}

impl UnitPreferences {
    /// Units to ask the upstream APIs for.
    pub fn request_units(self) -> RequestUnits {
        RequestUnits {
            system: self.general,
            wind_speed: self.wind_speed,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from lake-stations.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        favorites = config.stations.favorites.len(),
                        "Loaded configuration from {}",
                        path.display()
                    );
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {e}", path.display());
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Write the configuration to `path` as TOML.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// The favorite currently in view, if the index is in range.
    pub fn viewing_station(&self) -> Option<&str> {
        self.stations
            .favorites
            .get(self.stations.viewing_index)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.stations.favorites, vec!["9063063", "9087044"]);
        assert_eq!(config.units.general, UnitSystem::English);
        assert_eq!(config.units.wind_speed, WindSpeedUnit::Mph);
        assert!(config.display.wave_animation);
        assert_eq!(config.api.endpoints, Endpoints::default());
        assert_eq!(config.api.request_timeout(), None);
        assert_eq!(config.viewing_station(), Some("9063063"));
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.units.general = UnitSystem::Metric;
        config.units.wind_speed = WindSpeedUnit::Knots;
        config.api.request_timeout_secs = Some(10);

        config.save_to_path(file.path()).unwrap();
        let loaded = Config::load_from_path(file.path());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [stations]
            favorites = ["9075080"]

            [units]
            wind_speed = "m/s"

            [api]
            forecast = "http://localhost:8080/v1/forecast"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(parsed.stations.favorites, vec!["9075080"]);
        assert_eq!(parsed.units.general, UnitSystem::English);
        assert_eq!(parsed.units.wind_speed, WindSpeedUnit::MetersPerSecond);
        assert_eq!(parsed.api.endpoints.forecast, "http://localhost:8080/v1/forecast");
        assert_eq!(parsed.api.endpoints.tides, crate::api::TIDES_URL);
        assert_eq!(parsed.api.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            parsed.units.request_units(),
            RequestUnits {
                system: UnitSystem::English,
                wind_speed: WindSpeedUnit::MetersPerSecond,
            }
        );
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[units]\ngeneral = \"imperial\"\n").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_viewing_index_out_of_range() {
        let mut config = Config::default();
        config.stations.viewing_index = 5;
        assert_eq!(config.viewing_station(), None);
    }
}
