//! # Great Lakes Tides Entry Point
//!
//! Loads `lake-stations.toml`, resolves the favorite stations against NOAA's
//! Great Lakes station list and prints a snapshot of each one.
//!
//! ## Usage
//! ```text
//! great-lakes-tides            # text summaries in the configured units
//! great-lakes-tides --json     # canonical snapshots as pretty JSON
//! great-lakes-tides --verbose  # debug logging on stderr
//! ```

use lake_station_lib::config::Config;
use lake_station_lib::display::station_summary;
use lake_station_lib::http::ReqwestClient;
use lake_station_lib::logging;
use lake_station_lib::pipeline::StationDataPipeline;
use lake_station_lib::registry::fetch_great_lakes_stations;
use lake_station_lib::StationSnapshot;
use std::env;
use tracing::{info, warn};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let json_output = env::args().any(|arg| arg == "--json");
    let verbose = env::args().any(|arg| arg == "--verbose");

    logging::init(verbose)?;
    let config = Config::load();

    if config.stations.favorites.is_empty() {
        warn!("No favorite stations configured; add station ids under [stations] favorites");
        return Ok(());
    }

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let client = ReqwestClient::new(config.api.request_timeout())?;
    let pipeline = StationDataPipeline::new(
        client,
        config.api.endpoints.clone(),
        config.units.request_units(),
    );

    let snapshots = rt.block_on(async {
        let metadata = fetch_great_lakes_stations(pipeline.client(), pipeline.endpoints()).await;
        pipeline
            .retrieve_station_data(&config.stations.favorites, &metadata)
            .await
    });

    info!(
        requested = config.stations.favorites.len(),
        retrieved = snapshots.len(),
        "Station retrieval finished"
    );

    // Keep the order the user arranged their favorites in
    let ordered: Vec<&StationSnapshot> = config
        .stations
        .favorites
        .iter()
        .filter_map(|id| snapshots.get(id))
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
        return Ok(());
    }

    for snapshot in ordered {
        println!(
            "{}\n",
            station_summary(snapshot, config.units.general, config.units.wind_speed)
        );
    }

    Ok(())
}
