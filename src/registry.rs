//! # Great Lakes Station Registry
//!
//! NOAA publishes one list of every Tides & Currents station. The dashboard
//! only deals with Great Lakes stations, so the list is fetched once, filtered
//! on its `greatlakes` flag and kept as [`StationMetadata`] keyed by station id.

use crate::api::{Endpoints, NoaaStation, StationListResponse};
use crate::http::{get_typed, HttpClient};
use crate::{Coordinates, StationMetadata};
use std::collections::HashMap;
use tracing::{debug, error};

/// Fetch NOAA's station list and keep the Great Lakes stations.
///
/// Never fails: any request or decode error is logged once and an empty map
/// is returned, so callers simply see no stations.
pub async fn fetch_great_lakes_stations<C>(
    client: &C,
    endpoints: &Endpoints,
) -> HashMap<String, StationMetadata>
where
    C: HttpClient + ?Sized,
{
    match get_typed::<_, StationListResponse>(client, "station list", &endpoints.stations, &[])
        .await
    {
        Ok(list) => {
            let stations = great_lakes_stations(list.stations);
            debug!(count = stations.len(), "loaded Great Lakes station metadata");
            stations
        }
        Err(err) => {
            error!("Could not retrieve station metadata. {err}");
            HashMap::new()
        }
    }
}

/// Project Great Lakes records to `{city, state, coordinates}` keyed by id.
pub fn great_lakes_stations(
    stations: impl IntoIterator<Item = NoaaStation>,
) -> HashMap<String, StationMetadata> {
    stations
        .into_iter()
        .filter(|station| station.greatlakes)
        .map(|station| {
            let metadata = StationMetadata {
                city: station.name,
                state: station.state.unwrap_or_default(),
                coordinates: Coordinates {
                    lat: station.lat,
                    lng: station.lng,
                },
            };
            (station.id, metadata)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, greatlakes: bool) -> NoaaStation {
        NoaaStation {
            id: id.to_string(),
            name: format!("City {id}"),
            state: Some("MI".to_string()),
            greatlakes,
            lat: 45.0,
            lng: -84.0,
        }
    }

    #[test]
    fn test_filters_on_great_lakes_flag() {
        let stations = great_lakes_stations(vec![
            station("1", false),
            station("2", true),
            station("3", true),
        ]);

        assert_eq!(stations.len(), 2);
        assert!(stations.contains_key("2"));
        assert!(stations.contains_key("3"));
        assert!(!stations.contains_key("1"));
    }

    #[test]
    fn test_missing_state_becomes_empty() {
        let mut record = station("9", true);
        record.state = None;

        let stations = great_lakes_stations(vec![record]);
        assert_eq!(stations["9"].state, "");
    }
}
