//! Test data generation for tour-diary.
//!
//! This crate provides tools for generating realistic GPS traces and GPX files
//! to support manual verification and integration testing of the ingest pipeline.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let points = TraceGenerator::for_region(Region::BLACK_FOREST, 42)
//!     .with_distance(25_000.0)
//!     .generate(&RiderProfile::touring(), &mut rng);
//! let bytes = generate_gpx(&points, "Stage 3: Titisee loop");
//! ```

pub mod config;
pub mod gpx;
pub mod profiles;
pub mod terrain;
pub mod track;

// Re-export the point type traces are built from
pub use track_ingest::TrackPoint;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::TrackPoint;
    pub use crate::config::{BoundingBox, Region};
    pub use crate::gpx::{GpxFile, GpxTrack, generate_gpx};
    pub use crate::profiles::RiderProfile;
    pub use crate::terrain::ElevationGenerator;
    pub use crate::track::{TraceGenerator, TrackConfig};
}
