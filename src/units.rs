//! # Unit Conversion
//!
//! Every value in a [`StationSnapshot`](crate::StationSnapshot) is stored in a
//! single canonical unit: degrees Fahrenheit, miles per hour, inches of
//! precipitation and feet for distances and water levels. Conversion into the
//! user's preferred units happens only at the presentation boundary
//! (see [`display`](crate::display)).
//!
//! The user's preferences are closed enumerations rather than free-form
//! strings, so every conversion table below is checked for exhaustiveness by
//! the compiler.

use serde::{Deserialize, Serialize};

const KPH_PER_MPH: f64 = 1.609344;
const MS_PER_MPH: f64 = 0.44704;
const KNOTS_PER_MPH: f64 = 0.868976;
const MM_PER_INCH: f64 = 25.4;
const FEET_PER_METER: f64 = 3.280_839_895;

/// Convert degrees Fahrenheit to degrees Celsius.
///
/// ```
/// use lake_station_lib::units::fahrenheit_to_celsius;
///
/// assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
/// assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
/// ```
pub fn fahrenheit_to_celsius(temp: f64) -> f64 {
    (temp - 32.0) * 5.0 / 9.0
}

/// Convert degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(temp: f64) -> f64 {
    temp * 9.0 / 5.0 + 32.0
}

/// Convert miles per hour to kilometers per hour.
pub fn mph_to_kph(value: f64) -> f64 {
    value * KPH_PER_MPH
}

/// Convert miles per hour to meters per second.
pub fn mph_to_meters_per_second(value: f64) -> f64 {
    value * MS_PER_MPH
}

/// Convert miles per hour to knots.
pub fn mph_to_knots(value: f64) -> f64 {
    value * KNOTS_PER_MPH
}

pub fn mm_to_inches(value: f64) -> f64 {
    value / MM_PER_INCH
}

pub fn meters_to_feet(value: f64) -> f64 {
    value * FEET_PER_METER
}

pub fn feet_to_meters(value: f64) -> f64 {
    value / FEET_PER_METER
}

/// The user's general measurement system.
///
/// Determines which units the upstream APIs are asked to return and how
/// temperatures, precipitation and distances are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    English,
    Metric,
}

impl UnitSystem {
    /// Open-Meteo `temperature_unit` query value.
    pub fn temperature_param(self) -> &'static str {
        match self {
            UnitSystem::English => "fahrenheit",
            UnitSystem::Metric => "celsius",
        }
    }

    /// Open-Meteo `precipitation_unit` query value.
    pub fn precipitation_param(self) -> &'static str {
        match self {
            UnitSystem::English => "inch",
            UnitSystem::Metric => "mm",
        }
    }

    /// NOAA datagetter `units` query value.
    pub fn noaa_param(self) -> &'static str {
        match self {
            UnitSystem::English => "english",
            UnitSystem::Metric => "metric",
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitSystem::English => "°F",
            UnitSystem::Metric => "°C",
        }
    }

    /// Canonicalize a temperature reported in this system to °F.
    pub fn temperature_to_fahrenheit(self, value: f64) -> f64 {
        match self {
            UnitSystem::English => value,
            UnitSystem::Metric => celsius_to_fahrenheit(value),
        }
    }

    /// Convert a canonical °F temperature into this system.
    pub fn temperature_from_fahrenheit(self, value: f64) -> f64 {
        match self {
            UnitSystem::English => value,
            UnitSystem::Metric => fahrenheit_to_celsius(value),
        }
    }

    /// Canonicalize a precipitation amount reported in this system to inches.
    pub fn precipitation_to_inches(self, value: f64) -> f64 {
        match self {
            UnitSystem::English => value,
            UnitSystem::Metric => mm_to_inches(value),
        }
    }

    /// Canonicalize a length (visibility, water level) reported in this
    /// system to feet.
    pub fn length_to_feet(self, value: f64) -> f64 {
        match self {
            UnitSystem::English => value,
            UnitSystem::Metric => meters_to_feet(value),
        }
    }
}

/// Wind speed display unit, chosen independently of [`UnitSystem`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    #[default]
    #[serde(rename = "mph")]
    Mph,
    #[serde(rename = "km/h")]
    Kph,
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "kn")]
    Knots,
}

impl WindSpeedUnit {
    pub const ALL: [WindSpeedUnit; 4] = [
        WindSpeedUnit::Mph,
        WindSpeedUnit::Kph,
        WindSpeedUnit::MetersPerSecond,
        WindSpeedUnit::Knots,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kph => "km/h",
            WindSpeedUnit::MetersPerSecond => "m/s",
            WindSpeedUnit::Knots => "kn",
        }
    }

    /// Open-Meteo `windspeed_unit` query value.
    pub fn open_meteo_param(self) -> &'static str {
        match self {
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kph => "kmh",
            WindSpeedUnit::MetersPerSecond => "ms",
            WindSpeedUnit::Knots => "kn",
        }
    }

    /// Convert a canonical mph speed into this unit.
    ///
    /// ```
    /// use lake_station_lib::units::WindSpeedUnit;
    ///
    /// assert_eq!(WindSpeedUnit::Mph.from_mph(10.0), 10.0);
    /// assert!((WindSpeedUnit::Kph.from_mph(30.0) - 48.28).abs() < 0.01);
    /// ```
    pub fn from_mph(self, value: f64) -> f64 {
        match self {
            WindSpeedUnit::Mph => value,
            WindSpeedUnit::Kph => mph_to_kph(value),
            WindSpeedUnit::MetersPerSecond => mph_to_meters_per_second(value),
            WindSpeedUnit::Knots => mph_to_knots(value),
        }
    }

    /// Canonicalize a speed reported in this unit back to mph.
    pub fn to_mph(self, value: f64) -> f64 {
        match self {
            WindSpeedUnit::Mph => value,
            WindSpeedUnit::Kph => value / KPH_PER_MPH,
            WindSpeedUnit::MetersPerSecond => value / MS_PER_MPH,
            WindSpeedUnit::Knots => value / KNOTS_PER_MPH,
        }
    }
}

/// Units the upstream APIs are asked to report in.
///
/// Whatever is requested here, the pipeline canonicalizes the responses
/// before building a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestUnits {
    pub system: UnitSystem,
    pub wind_speed: WindSpeedUnit,
}
