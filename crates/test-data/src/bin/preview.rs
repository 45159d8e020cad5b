//! Trace preview tool - parses a GPX file and prints its derived statistics
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin preview -- path/to/trace.gpx
//! ```
//!
//! Without an argument a synthetic Black Forest stage is generated instead.

use rand::SeedableRng;
use rand::rngs::StdRng;
use test_data::prelude::*;
use time::OffsetDateTime;
use track_ingest::{IngestOptions, TrackProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bytes = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Reading {path}");
            std::fs::read(path)?
        }
        None => {
            tracing::info!("No file given, generating a synthetic stage");
            let start = OffsetDateTime::now_utc() - time::Duration::hours(6);
            let points = TraceGenerator::for_region(Region::BLACK_FOREST, 42)
                .with_distance(25_000.0)
                .with_start_time(start)
                .generate(&RiderProfile::touring(), &mut StdRng::seed_from_u64(42));
            generate_gpx(&points, "Synthetic stage")
        }
    };

    let processor = TrackProcessor::new(IngestOptions::default());
    let processed = processor.process(&bytes)?;

    if let Some(name) = &processed.name {
        tracing::info!("Trace: {name}");
    }

    println!("{}", serde_json::to_string_pretty(&processed.statistics)?);
    println!("{}", processed.preview.to_geojson());

    Ok(())
}
