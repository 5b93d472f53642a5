//! Structured logging setup for the binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the executable (or to tests that want to capture output).

use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "lake_station_lib=info,great_lakes_tides=info";

/// Install a global stderr subscriber.
///
/// `verbose` raises this crate's own events to `debug`. Calling this twice
/// is an error from `tracing_subscriber`, surfaced here.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("lake_station_lib=debug,great_lakes_tides=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    debug!("Logging initialized");
    Ok(())
}
