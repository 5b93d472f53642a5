//! # Station Registry Scenarios

use super::fixtures::{capture_logs, rejected, station_list_json, test_endpoints, FakeHttp};
use crate::registry::fetch_great_lakes_stations;
use crate::{Coordinates, StationMetadata};
use serde_json::json;

/// Only stations flagged `greatlakes` survive, projected to city/state/coordinates.
#[tokio::test]
async fn keeps_only_great_lakes_stations() {
    let client = FakeHttp::new(|_, _| Ok(station_list_json()));

    let stations = fetch_great_lakes_stations(&client, &test_endpoints()).await;

    assert_eq!(stations.len(), 1);
    assert_eq!(
        stations["8311030"],
        StationMetadata {
            city: "Ogdensburg".to_string(),
            state: "NY".to_string(),
            coordinates: Coordinates {
                lat: 44.697944,
                lng: -75.497722,
            },
        }
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, test_endpoints().stations);
}

/// A rejected request yields an empty registry and one error log line.
#[tokio::test]
async fn rejected_station_list_is_logged_and_empty() {
    let (logs, _guard) = capture_logs();
    let client = FakeHttp::new(|url, _| Err(rejected(url, 429)));

    let stations = fetch_great_lakes_stations(&client, &test_endpoints()).await;

    assert!(stations.is_empty());
    let output = logs.contents();
    assert!(
        output.contains("Could not retrieve station metadata."),
        "missing error log in {output:?}"
    );
    assert!(output.contains("429"));
    assert_eq!(output.matches("Could not retrieve station metadata.").count(), 1);
}

/// A payload without a `stations` array is treated like a failed request.
#[tokio::test]
async fn malformed_station_list_is_logged_and_empty() {
    let (logs, _guard) = capture_logs();
    let client = FakeHttp::new(|_, _| Ok(json!({ "count": 0 })));

    let stations = fetch_great_lakes_stations(&client, &test_endpoints()).await;

    assert!(stations.is_empty());
    assert!(logs.contents().contains("unexpected station list response"));
}
