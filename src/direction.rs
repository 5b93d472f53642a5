//! Compass bearing classification.

use thiserror::Error;

/// Half-width of each cardinal sector, in degrees.
const SEGMENT_HALF_WIDTH: f64 = 11.25;

pub const CARDINAL_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DirectionError {
    /// Bearing outside `[0, 360)`
    #[error("Direction provided ({degrees} degrees) is invalid")]
    OutOfRange { degrees: f64 },
}

/// Map a compass bearing to one of the 16 cardinal/intercardinal labels.
///
/// Each label covers a 22.5° sector centered on its bearing, so `N` covers
/// `[348.75, 360) ∪ [0, 11.25)`.
///
/// ```
/// use lake_station_lib::direction::degrees_to_cardinal;
///
/// assert_eq!(degrees_to_cardinal(90.0).unwrap(), "E");
/// assert_eq!(degrees_to_cardinal(350.0).unwrap(), "N");
/// assert!(degrees_to_cardinal(360.0).is_err());
/// ```
pub fn degrees_to_cardinal(degrees: f64) -> Result<&'static str, DirectionError> {
    // NaN fails both comparisons, so reject it explicitly
    if degrees.is_nan() || !(0.0..360.0).contains(&degrees) {
        return Err(DirectionError::OutOfRange { degrees });
    }

    let sector = ((degrees + SEGMENT_HALF_WIDTH) % 360.0 / (SEGMENT_HALF_WIDTH * 2.0)).floor();
    Ok(CARDINAL_DIRECTIONS[sector as usize])
}
